// ==========================================
// 制造业进销存系统 - 驾驶舱 API
// ==========================================
// 职责: 首页驾驶舱单一快照查询
// 架构: API 层 → 仓储层 (取数) → 驾驶舱指标引擎 (组合)
// 每次调用重新取数计算,不缓存
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::engine::dashboard::{DashboardMetricsComposer, DashboardSnapshot};
use crate::repository::party_repo::{CustomerRepository, SupplierRepository};
use crate::repository::product_repo::ProductRepository;
use crate::repository::staff_repo::StaffRepository;
use crate::repository::stock_repo::StockRepository;

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================
pub struct DashboardApi {
    supplier_repo: Arc<SupplierRepository>,
    customer_repo: Arc<CustomerRepository>,
    product_repo: Arc<ProductRepository>,
    staff_repo: Arc<StaffRepository>,
    stock_repo: Arc<StockRepository>,
    composer: DashboardMetricsComposer,
}

impl DashboardApi {
    /// 创建新的 DashboardApi 实例
    pub fn new(
        supplier_repo: Arc<SupplierRepository>,
        customer_repo: Arc<CustomerRepository>,
        product_repo: Arc<ProductRepository>,
        staff_repo: Arc<StaffRepository>,
        stock_repo: Arc<StockRepository>,
    ) -> Self {
        Self {
            supplier_repo,
            customer_repo,
            product_repo,
            staff_repo,
            stock_repo,
            composer: DashboardMetricsComposer::new(),
        }
    }

    /// 生成驾驶舱快照
    ///
    /// 计数取在用实体; 库存指标经估值引擎计算
    pub fn get_dashboard_metrics(&self) -> ApiResult<DashboardSnapshot> {
        let suppliers = self.supplier_repo.find_all_active()?;
        let customers = self.customer_repo.find_all_active()?;
        let products = self.product_repo.find_all_active()?;
        let staff = self.staff_repo.find_all_active()?;
        let stocks = self.stock_repo.find_all()?;

        Ok(self
            .composer
            .dashboard_metrics(&suppliers, &customers, &products, &staff, &stocks))
    }
}
