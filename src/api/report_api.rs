// ==========================================
// 制造业进销存系统 - 报表 API
// ==========================================
// 职责: 组装实体快照,委托报表聚合引擎生成报表行
// 架构: API 层 → 仓储层 (取数) → 引擎层 (聚合)
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::validator;
use crate::engine::report::{
    CustomerReportRow, ReportAggregator, SalaryReport, StockReportRow, SupplierReportRow,
};
use crate::repository::order_repo::OrderRepository;
use crate::repository::party_repo::{CustomerRepository, SupplierRepository};
use crate::repository::staff_repo::StaffRepository;
use crate::repository::stock_repo::StockRepository;

// ==========================================
// ReportApi - 报表 API
// ==========================================
pub struct ReportApi {
    customer_repo: Arc<CustomerRepository>,
    supplier_repo: Arc<SupplierRepository>,
    purchase_repo: Arc<OrderRepository>,
    sales_repo: Arc<OrderRepository>,
    staff_repo: Arc<StaffRepository>,
    stock_repo: Arc<StockRepository>,
    aggregator: ReportAggregator,
}

impl ReportApi {
    /// 创建新的 ReportApi 实例
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        customer_repo: Arc<CustomerRepository>,
        supplier_repo: Arc<SupplierRepository>,
        purchase_repo: Arc<OrderRepository>,
        sales_repo: Arc<OrderRepository>,
        staff_repo: Arc<StaffRepository>,
        stock_repo: Arc<StockRepository>,
    ) -> Self {
        Self {
            customer_repo,
            supplier_repo,
            purchase_repo,
            sales_repo,
            staff_repo,
            stock_repo,
            aggregator: ReportAggregator::new(),
        }
    }

    /// 客户明细报表
    ///
    /// 每个在用客户一行,累计采购额为其全部销售单总额之和
    pub fn customer_details_report(&self) -> ApiResult<Vec<CustomerReportRow>> {
        let customers = self.customer_repo.find_all_active()?;
        let sales_orders = self.sales_repo.find_all()?;

        Ok(self
            .aggregator
            .customer_details_report(&customers, &sales_orders))
    }

    /// 供应商明细报表
    pub fn supplier_details_report(&self) -> ApiResult<Vec<SupplierReportRow>> {
        let suppliers = self.supplier_repo.find_all_active()?;
        let purchase_orders = self.purchase_repo.find_all()?;

        Ok(self
            .aggregator
            .supplier_details_report(&suppliers, &purchase_orders))
    }

    /// 月度工资报表
    ///
    /// month 为 "YYYY-MM" 标签; 月薪固定,报表是在职快照
    pub fn monthly_salary_report(&self, month: &str) -> ApiResult<SalaryReport> {
        let month = validator::validate_month_label(month)?;
        let staff = self.staff_repo.find_all()?;

        Ok(self.aggregator.monthly_salary_report(&staff, &month))
    }

    /// 库存报表
    pub fn stock_report(&self) -> ApiResult<Vec<StockReportRow>> {
        let stocks = self.stock_repo.find_all()?;
        Ok(self.aggregator.stock_report(&stocks))
    }
}
