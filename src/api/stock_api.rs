// ==========================================
// 制造业进销存系统 - 库存 API
// ==========================================
// 职责: 库存 CRUD + 估值总览 + 预警查询
// 架构: API 层 → 仓储层 (读写) + 引擎层 (计算)
// ==========================================

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::stock::StockInventory;
use crate::domain::types::ProductCategory;
use crate::engine::stock_valuation::{StockAlerts, StockValuationEngine, ValuationSummary};
use crate::repository::product_repo::ProductRepository;
use crate::repository::stock_repo::StockRepository;

// ==========================================
// StockOverview - 库存总览 DTO
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockOverview {
    pub item_count: usize,            // 库存条目数
    pub valuation: ValuationSummary,  // 估值汇总 (总值 + 分类别)
    pub low_count: usize,             // 低库存条目数
    pub out_of_stock_count: usize,    // 缺货条目数
}

// ==========================================
// StockApi - 库存 API
// ==========================================
pub struct StockApi {
    stock_repo: Arc<StockRepository>,
    product_repo: Arc<ProductRepository>,
    valuation: StockValuationEngine,
}

impl StockApi {
    /// 创建新的 StockApi 实例
    pub fn new(stock_repo: Arc<StockRepository>, product_repo: Arc<ProductRepository>) -> Self {
        Self {
            stock_repo,
            product_repo,
            valuation: StockValuationEngine::new(),
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询全部库存
    pub fn list_stocks(&self) -> ApiResult<Vec<StockInventory>> {
        Ok(self.stock_repo.find_all()?)
    }

    /// 按产品号查询库存
    pub fn get_stock(&self, product_id: &str) -> ApiResult<StockInventory> {
        let product_id = crate::api::validator::require_non_empty("产品号", product_id)?;

        self.stock_repo
            .find_by_product_id(&product_id)?
            .ok_or_else(|| ApiError::NotFound(format!("库存(product_id={})不存在", product_id)))
    }

    /// 库存总览（估值汇总 + 预警计数）
    ///
    /// 产品类别取自产品主数据,由本层组装后交给估值引擎
    pub fn stock_overview(&self) -> ApiResult<StockOverview> {
        let stocks = self.stock_repo.find_all()?;
        let categories = self.load_categories()?;

        let valuation = self.valuation.aggregate_valuation(&stocks, &categories);
        let alerts = self.valuation.low_stock_alerts(&stocks);

        Ok(StockOverview {
            item_count: stocks.len(),
            valuation,
            low_count: alerts.low.len(),
            out_of_stock_count: alerts.out_of_stock.len(),
        })
    }

    /// 低库存/缺货预警列表
    pub fn low_stock_alerts(&self) -> ApiResult<StockAlerts> {
        let stocks = self.stock_repo.find_all()?;
        Ok(self.valuation.low_stock_alerts(&stocks))
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 新建库存记录
    ///
    /// # 校验
    /// - 产品号/名称必填
    /// - 数量 >= 0, 下限/上限 >= 0 且 下限 <= 上限
    /// - 单价 >= 0
    pub fn create_stock(
        &self,
        product_id: &str,
        product_name: &str,
        current_quantity: i64,
        minimum_level: i64,
        maximum_level: i64,
        unit_price: f64,
    ) -> ApiResult<StockInventory> {
        let product_id = crate::api::validator::require_non_empty("产品号", product_id)?;
        let product_name = crate::api::validator::require_non_empty("产品名称", product_name)?;

        Self::validate_levels(current_quantity, minimum_level, maximum_level, unit_price)?;

        let now = Utc::now();
        let stock = StockInventory {
            product_id,
            product_name,
            current_quantity,
            minimum_level,
            maximum_level,
            unit_price,
            created_at: now,
            updated_at: now,
        };

        self.stock_repo.insert(&stock)?;
        tracing::info!(product_id = %stock.product_id, "新建库存记录");

        Ok(stock)
    }

    /// 更新库存记录（全字段）
    pub fn update_stock(&self, stock: &StockInventory) -> ApiResult<()> {
        Self::validate_levels(
            stock.current_quantity,
            stock.minimum_level,
            stock.maximum_level,
            stock.unit_price,
        )?;

        self.stock_repo.update(stock)?;
        Ok(())
    }

    /// 调整库存数量
    pub fn adjust_quantity(&self, product_id: &str, new_quantity: i64) -> ApiResult<()> {
        if new_quantity < 0 {
            return Err(ApiError::InvalidInput(format!(
                "库存数量不能为负数, 实际为 {}",
                new_quantity
            )));
        }

        self.stock_repo.update_quantity(product_id, new_quantity)?;
        Ok(())
    }

    /// 删除库存记录
    pub fn delete_stock(&self, product_id: &str) -> ApiResult<()> {
        self.stock_repo.delete(product_id)?;
        Ok(())
    }

    // ==========================================
    // 内部方法
    // ==========================================

    /// 数量/阈值/单价校验
    fn validate_levels(
        quantity: i64,
        minimum_level: i64,
        maximum_level: i64,
        unit_price: f64,
    ) -> ApiResult<()> {
        if quantity < 0 {
            return Err(ApiError::InvalidInput("库存数量不能为负数".to_string()));
        }
        if minimum_level < 0 || maximum_level < 0 {
            return Err(ApiError::InvalidInput("库存阈值不能为负数".to_string()));
        }
        if minimum_level > maximum_level {
            return Err(ApiError::InvalidInput(format!(
                "下限({})不能大于上限({})",
                minimum_level, maximum_level
            )));
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(ApiError::InvalidInput("单价必须为非负数".to_string()));
        }
        Ok(())
    }

    /// 加载产品类别映射 (product_id → category)
    fn load_categories(&self) -> ApiResult<HashMap<String, ProductCategory>> {
        let products = self.product_repo.find_all_active()?;

        Ok(products
            .into_iter()
            .map(|p| (p.product_id, p.category))
            .collect())
    }
}
