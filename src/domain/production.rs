// ==========================================
// 制造业进销存系统 - 生产领域模型
// ==========================================
// 对齐: schema v0.1 production_record 表
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionRecord - 生产记录
// ==========================================
// 不变量: input_quantity > 0, output_quantity >= 0, waste_quantity >= 0
// 投入/产出/废料三个量彼此独立,由录入方提供,系统不强制
// output + waste <= input (历史数据允许不一致的三元组)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    // ===== 主键 =====
    pub production_id: String, // 生产记录 ID

    // ===== 基础信息 =====
    pub production_date: NaiveDate, // 生产日期
    pub machine_code: String,       // 机台代码

    // ===== 数量维度 =====
    pub input_quantity: i64,  // 投入数量
    pub output_quantity: i64, // 产出数量
    pub waste_quantity: i64,  // 废料数量

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}
