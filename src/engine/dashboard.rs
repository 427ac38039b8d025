// ==========================================
// 制造业进销存系统 - 驾驶舱指标引擎
// ==========================================
// 职责: 组合下层引擎,生成首页驾驶舱单一快照
// 输入: 各实体快照列表
// 输出: DashboardSnapshot,纯展示数据,无告警副作用
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::party::{Customer, Supplier};
use crate::domain::product::Product;
use crate::domain::staff::Staff;
use crate::domain::stock::StockInventory;
use crate::domain::types::SystemHealth;
use crate::engine::stock_valuation::StockValuationEngine;

// ==========================================
// DashboardSnapshot - 驾驶舱快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    // ===== 实体计数 =====
    pub supplier_count: usize,
    pub customer_count: usize,
    pub product_count: usize,
    pub staff_count: usize,

    // ===== 库存指标 =====
    pub total_stock_value: f64, // 库存总价值
    pub low_stock_items: usize, // 预警条目数 (低库存 + 缺货)

    // ===== 健康状态 =====
    pub system_health: SystemHealth, // 有预警即 Warning,仅展示
}

// ==========================================
// DashboardMetricsComposer - 驾驶舱指标引擎
// ==========================================
pub struct DashboardMetricsComposer {
    valuation: StockValuationEngine,
}

impl DashboardMetricsComposer {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            valuation: StockValuationEngine::new(),
        }
    }

    /// 生成驾驶舱快照
    ///
    /// # 参数
    /// - `suppliers` / `customers` / `products` / `staff`: 实体快照,取计数
    /// - `stocks`: 库存快照,经估值引擎得出总价值与预警数
    ///
    /// # 返回
    /// DashboardSnapshot
    pub fn dashboard_metrics(
        &self,
        suppliers: &[Supplier],
        customers: &[Customer],
        products: &[Product],
        staff: &[Staff],
        stocks: &[StockInventory],
    ) -> DashboardSnapshot {
        let total_stock_value: f64 = stocks.iter().map(|s| self.valuation.value(s)).sum();

        let alerts = self.valuation.low_stock_alerts(stocks);
        let low_stock_items = alerts.low.len() + alerts.out_of_stock.len();

        let system_health = if low_stock_items > 0 {
            SystemHealth::Warning
        } else {
            SystemHealth::Ok
        };

        DashboardSnapshot {
            supplier_count: suppliers.len(),
            customer_count: customers.len(),
            product_count: products.len(),
            staff_count: staff.len(),
            total_stock_value,
            low_stock_items,
            system_health,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for DashboardMetricsComposer {
    fn default() -> Self {
        Self::new()
    }
}
