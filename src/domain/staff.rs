// ==========================================
// 制造业进销存系统 - 员工领域模型
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 员工
///
/// monthly_salary 为固定月薪 (>= 0),工资报表按快照取数,无历史台账
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub employee_id: String,
    pub name: String,
    pub position: String,    // 岗位
    pub monthly_salary: f64, // 月薪
    pub is_active: bool,     // 在职标志
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
