// ==========================================
// 制造业进销存系统 - 产品领域模型
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::ProductCategory;

/// 产品主数据
///
/// category 是估值汇总的分桶依据,由调用方在聚合时随库存一并传入引擎
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub category: ProductCategory, // 原材料/成品/副产品
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
