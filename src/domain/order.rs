// ==========================================
// 制造业进销存系统 - 订单领域模型
// ==========================================
// 对齐: schema v0.1 purchase_order / sales_order 表
// 采购单与销售单同构,按 OrderKind 区分存储表
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{OrderKind, PaymentMethod, PaymentStatus};

// ==========================================
// Order - 订单 (采购/销售)
// ==========================================
// 不变量: total_amount >= 0, 0 <= paid_amount <= total_amount
// payment_status 是派生状态的持久化快照,由付款台账引擎重算后回写
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    // ===== 主键 =====
    pub order_id: String, // 订单号

    // ===== 关联 =====
    pub party_id: String, // 交易方 (采购→供应商, 销售→客户)

    // ===== 金额维度 =====
    pub total_amount: f64,             // 订单总额
    pub paid_amount: f64,              // 已付金额
    pub payment_status: PaymentStatus, // 付款状态快照

    // ===== 时间信息 =====
    pub order_date: NaiveDate, // 下单日期

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}

impl Order {
    /// 未结金额 = 总额 - 已付
    pub fn outstanding_amount(&self) -> f64 {
        self.total_amount - self.paid_amount
    }
}

// ==========================================
// PaymentRecord - 付款流水
// ==========================================
// 追加式,创建后不可修改
// amount 记录的是本次请求金额 (审计口径),非截断后的入账金额
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub record_id: String,         // 流水 ID (UUID)
    pub order_id: String,          // 关联订单号
    pub order_kind: OrderKind,     // 订单类型 (采购/销售)
    pub amount: f64,               // 请求金额 (> 0)
    pub method: PaymentMethod,     // 付款方式
    pub reference: Option<String>, // 凭证号/流水号
    pub notes: Option<String>,     // 备注
    pub paid_at: DateTime<Utc>,    // 付款时间
}
