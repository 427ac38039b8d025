// ==========================================
// 制造业进销存系统 - 库存领域模型
// ==========================================
// 对齐: schema v0.1 stock_inventory 表
// 用途: 持久层读写,引擎层只读
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// StockInventory - 库存记录
// ==========================================
// 不变量: current_quantity >= 0
// 派生字段 (库存状态/库存价值) 由估值引擎计算,不落库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInventory {
    // ===== 主键 =====
    pub product_id: String, // 关联 product (FK)

    // ===== 冗余信息 =====
    pub product_name: String, // 产品名称 (冗余,报表直读)

    // ===== 数量维度 =====
    pub current_quantity: i64, // 当前数量
    pub minimum_level: i64,    // 低库存下限
    pub maximum_level: i64,    // 积压上限

    // ===== 价格维度 =====
    pub unit_price: f64, // 单价

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}
