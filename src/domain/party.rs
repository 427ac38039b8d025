// ==========================================
// 制造业进销存系统 - 交易方领域模型
// ==========================================
// 供应商与客户分表存储,结构一致
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 供应商
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub supplier_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool, // 停用后不参与报表/驾驶舱统计
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 客户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
