// ==========================================
// 制造业进销存系统 - 报表聚合引擎
// ==========================================
// 职责: 跨实体汇总 (客户/供应商/工资/库存报表)
// 输入: 调用方准备好的实体快照列表
// 输出: 纯数据报表行,不含任何 GUI 结构
// ==========================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::order::Order;
use crate::domain::party::{Customer, Supplier};
use crate::domain::staff::Staff;
use crate::domain::stock::StockInventory;
use crate::domain::types::StockStatus;
use crate::engine::stock_valuation::StockValuationEngine;

// ==========================================
// 报表行类型
// ==========================================

/// 客户明细报表行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerReportRow {
    pub customer_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub order_count: usize,     // 销售单数量
    pub total_purchases: f64,   // 累计采购额 (销售单总额合计)
    pub total_outstanding: f64, // 未结金额合计
}

/// 供应商明细报表行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierReportRow {
    pub supplier_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub order_count: usize,     // 采购单数量
    pub total_supplied: f64,    // 累计供货额 (采购单总额合计)
    pub total_outstanding: f64, // 未结金额合计
}

/// 工资报表行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryReportRow {
    pub employee_id: String,
    pub name: String,
    pub position: String,
    pub monthly_salary: f64,
}

/// 月度工资报表
///
/// 月薪为固定月额,报表是在职快照而非历史台账,month 仅作标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryReport {
    pub month: String, // "YYYY-MM"
    pub rows: Vec<SalaryReportRow>,
    pub total_payroll: f64, // 在职员工月薪合计
}

/// 库存报表行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockReportRow {
    pub product_id: String,
    pub product_name: String,
    pub current_quantity: i64,
    pub status: StockStatus,
    pub stock_value: f64,
}

// ==========================================
// ReportAggregator - 报表聚合引擎
// ==========================================
pub struct ReportAggregator {
    valuation: StockValuationEngine,
}

impl ReportAggregator {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            valuation: StockValuationEngine::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 客户明细报表
    ///
    /// 每个客户一行,累计采购额 = 该客户全部销售单 total_amount 之和
    ///
    /// # 参数
    /// - `customers`: 客户列表
    /// - `sales_orders`: 销售单列表
    pub fn customer_details_report(
        &self,
        customers: &[Customer],
        sales_orders: &[Order],
    ) -> Vec<CustomerReportRow> {
        // 先按交易方聚合订单,避免按客户反复扫描
        let totals = Self::totals_by_party(sales_orders);

        customers
            .iter()
            .map(|customer| {
                let (count, total, outstanding) = totals
                    .get(&customer.customer_id)
                    .copied()
                    .unwrap_or((0, 0.0, 0.0));

                CustomerReportRow {
                    customer_id: customer.customer_id.clone(),
                    name: customer.name.clone(),
                    phone: customer.phone.clone(),
                    order_count: count,
                    total_purchases: total,
                    total_outstanding: outstanding,
                }
            })
            .collect()
    }

    /// 供应商明细报表
    ///
    /// 与客户报表对称,对采购单聚合
    pub fn supplier_details_report(
        &self,
        suppliers: &[Supplier],
        purchase_orders: &[Order],
    ) -> Vec<SupplierReportRow> {
        let totals = Self::totals_by_party(purchase_orders);

        suppliers
            .iter()
            .map(|supplier| {
                let (count, total, outstanding) = totals
                    .get(&supplier.supplier_id)
                    .copied()
                    .unwrap_or((0, 0.0, 0.0));

                SupplierReportRow {
                    supplier_id: supplier.supplier_id.clone(),
                    name: supplier.name.clone(),
                    phone: supplier.phone.clone(),
                    order_count: count,
                    total_supplied: total,
                    total_outstanding: outstanding,
                }
            })
            .collect()
    }

    /// 月度工资报表
    ///
    /// 只列在职员工,每人一行固定月薪; month 仅作报表标签,不做期间过滤
    pub fn monthly_salary_report(&self, staff: &[Staff], month: &str) -> SalaryReport {
        let rows: Vec<SalaryReportRow> = staff
            .iter()
            .filter(|s| s.is_active)
            .map(|s| SalaryReportRow {
                employee_id: s.employee_id.clone(),
                name: s.name.clone(),
                position: s.position.clone(),
                monthly_salary: s.monthly_salary,
            })
            .collect();

        let total_payroll = rows.iter().map(|r| r.monthly_salary).sum();

        SalaryReport {
            month: month.to_string(),
            rows,
            total_payroll,
        }
    }

    /// 库存报表
    ///
    /// 每条库存一行,状态与价值由估值引擎计算
    pub fn stock_report(&self, stocks: &[StockInventory]) -> Vec<StockReportRow> {
        stocks
            .iter()
            .map(|stock| StockReportRow {
                product_id: stock.product_id.clone(),
                product_name: stock.product_name.clone(),
                current_quantity: stock.current_quantity,
                status: self.valuation.classify(stock),
                stock_value: self.valuation.value(stock),
            })
            .collect()
    }

    // ==========================================
    // 内部聚合
    // ==========================================

    /// 按交易方聚合订单: party_id → (单数, 总额合计, 未结合计)
    fn totals_by_party(orders: &[Order]) -> HashMap<String, (usize, f64, f64)> {
        let mut totals: HashMap<String, (usize, f64, f64)> = HashMap::new();

        for order in orders {
            let entry = totals.entry(order.party_id.clone()).or_insert((0, 0.0, 0.0));
            entry.0 += 1;
            entry.1 += order.total_amount;
            entry.2 += order.outstanding_amount();
        }

        totals
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ReportAggregator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PaymentStatus;
    use chrono::{NaiveDate, Utc};

    fn create_test_customer(id: &str, name: &str) -> Customer {
        Customer {
            customer_id: id.to_string(),
            name: name.to_string(),
            phone: Some("13800000000".to_string()),
            address: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_test_supplier(id: &str, name: &str) -> Supplier {
        Supplier {
            supplier_id: id.to_string(),
            name: name.to_string(),
            phone: None,
            address: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_test_order(order_id: &str, party_id: &str, total: f64, paid: f64) -> Order {
        Order {
            order_id: order_id.to_string(),
            party_id: party_id.to_string(),
            total_amount: total,
            paid_amount: paid,
            payment_status: PaymentStatus::Partial,
            order_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_test_staff(id: &str, name: &str, salary: f64, active: bool) -> Staff {
        Staff {
            employee_id: id.to_string(),
            name: name.to_string(),
            position: "操作工".to_string(),
            monthly_salary: salary,
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_customer_details_report() {
        let aggregator = ReportAggregator::new();
        let customers = vec![
            create_test_customer("C001", "华东经销"),
            create_test_customer("C002", "南方贸易"),
        ];
        let orders = vec![
            create_test_order("SO-001", "C001", 12000.0, 12000.0),
            create_test_order("SO-002", "C001", 8000.0, 3000.0),
            create_test_order("SO-003", "C002", 5000.0, 0.0),
        ];

        let rows = aggregator.customer_details_report(&customers, &orders);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].customer_id, "C001");
        assert_eq!(rows[0].order_count, 2);
        assert_eq!(rows[0].total_purchases, 20000.0);
        assert_eq!(rows[0].total_outstanding, 5000.0);
        assert_eq!(rows[1].total_purchases, 5000.0);
        assert_eq!(rows[1].total_outstanding, 5000.0);
    }

    #[test]
    fn test_customer_report_no_orders() {
        // 无订单客户也要有行,金额为 0
        let aggregator = ReportAggregator::new();
        let customers = vec![create_test_customer("C001", "新客户")];

        let rows = aggregator.customer_details_report(&customers, &[]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_count, 0);
        assert_eq!(rows[0].total_purchases, 0.0);
    }

    #[test]
    fn test_supplier_details_report() {
        let aggregator = ReportAggregator::new();
        let suppliers = vec![create_test_supplier("S001", "原料供应一厂")];
        let orders = vec![
            create_test_order("PO-001", "S001", 30000.0, 30000.0),
            create_test_order("PO-002", "S001", 20000.0, 10000.0),
        ];

        let rows = aggregator.supplier_details_report(&suppliers, &orders);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_count, 2);
        assert_eq!(rows[0].total_supplied, 50000.0);
        assert_eq!(rows[0].total_outstanding, 10000.0);
    }

    #[test]
    fn test_monthly_salary_report_active_only() {
        let aggregator = ReportAggregator::new();
        let staff = vec![
            create_test_staff("E001", "张三", 6500.0, true),
            create_test_staff("E002", "李四", 7200.0, true),
            create_test_staff("E003", "王五", 9000.0, false), // 离职,不计
        ];

        let report = aggregator.monthly_salary_report(&staff, "2026-06");

        assert_eq!(report.month, "2026-06");
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.total_payroll, 13700.0);
    }

    #[test]
    fn test_stock_report() {
        let aggregator = ReportAggregator::new();
        let stocks = vec![StockInventory {
            product_id: "P001".to_string(),
            product_name: "冷轧板".to_string(),
            current_quantity: 5,
            minimum_level: 10,
            maximum_level: 1000,
            unit_price: 50.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }];

        let rows = aggregator.stock_report(&stocks);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, StockStatus::Low);
        assert_eq!(rows[0].stock_value, 250.0);
    }
}
