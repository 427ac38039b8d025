// ==========================================
// 制造业进销存系统 - 生产 API
// ==========================================
// 职责: 生产记录录入与成材率查询
// ==========================================

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator;
use crate::domain::production::ProductionRecord;
use crate::engine::production_yield::{ProductionSummary, ProductionYieldCalculator};
use crate::repository::production_repo::ProductionRepository;

// ==========================================
// ProductionRunView - 生产记录视图 DTO
// ==========================================
// 每条记录附带转化率,供表格直读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRunView {
    pub record: ProductionRecord,
    pub conversion_rate: f64, // 转化率 (%)
    pub waste_rate: f64,      // 废料率 (%)
}

// ==========================================
// ProductionApi - 生产 API
// ==========================================
pub struct ProductionApi {
    production_repo: Arc<ProductionRepository>,
    calculator: ProductionYieldCalculator,
}

impl ProductionApi {
    /// 创建新的 ProductionApi 实例
    pub fn new(production_repo: Arc<ProductionRepository>) -> Self {
        Self {
            production_repo,
            calculator: ProductionYieldCalculator::new(),
        }
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 录入一次生产
    ///
    /// # 校验
    /// - 机台代码必填
    /// - 投入 > 0, 产出/废料 >= 0 (由转化率计算一并兜底)
    /// - 投入/产出/废料彼此独立,不做对账约束
    pub fn record_run(
        &self,
        production_date: NaiveDate,
        machine_code: &str,
        input_quantity: i64,
        output_quantity: i64,
        waste_quantity: i64,
    ) -> ApiResult<ProductionRunView> {
        let machine_code = validator::require_non_empty("机台代码", machine_code)?;

        if waste_quantity < 0 {
            return Err(ApiError::InvalidInput("废料数量不能为负数".to_string()));
        }

        // 引擎校验投入/产出并给出转化率,失败即拒绝落库
        let conversion_rate = self
            .calculator
            .conversion_rate(input_quantity, output_quantity)?;
        let waste_rate = self.calculator.waste_rate(input_quantity, waste_quantity)?;

        let now = Utc::now();
        let record = ProductionRecord {
            production_id: Uuid::new_v4().to_string(),
            production_date,
            machine_code,
            input_quantity,
            output_quantity,
            waste_quantity,
            created_at: now,
            updated_at: now,
        };

        self.production_repo.insert(&record)?;
        tracing::info!(
            production_id = %record.production_id,
            machine = %record.machine_code,
            conversion_rate,
            "录入生产记录"
        );

        Ok(ProductionRunView {
            record,
            conversion_rate,
            waste_rate,
        })
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询全部生产记录（附转化率）
    ///
    /// 历史脏数据 (投入为 0) 的转化率按 0 展示,不中断列表
    pub fn list_runs(&self) -> ApiResult<Vec<ProductionRunView>> {
        let records = self.production_repo.find_all()?;

        Ok(records
            .into_iter()
            .map(|record| {
                let conversion_rate = self
                    .calculator
                    .conversion_rate(record.input_quantity, record.output_quantity)
                    .unwrap_or(0.0);
                let waste_rate = self
                    .calculator
                    .waste_rate(record.input_quantity, record.waste_quantity)
                    .unwrap_or(0.0);

                ProductionRunView {
                    record,
                    conversion_rate,
                    waste_rate,
                }
            })
            .collect())
    }

    /// 按日期范围汇总生产指标
    pub fn summary(&self, start_date: NaiveDate, end_date: NaiveDate) -> ApiResult<ProductionSummary> {
        if start_date > end_date {
            return Err(ApiError::InvalidInput(
                "开始日期不能晚于结束日期".to_string(),
            ));
        }

        let records = self.production_repo.find_by_date_range(start_date, end_date)?;
        Ok(self.calculator.summarize(&records))
    }
}
