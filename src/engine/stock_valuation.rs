// ==========================================
// 制造业进销存系统 - 库存估值引擎
// ==========================================
// 职责: 库存状态判定 + 库存价值计算 + 估值汇总 + 预警分拣
// 输入: 库存快照 (+ 产品类别映射)
// 输出: 状态/价值/汇总/预警列表,均为纯函数结果
// 红线: Engine 不拼 SQL,不写库
// ==========================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::stock::StockInventory;
use crate::domain::types::{ProductCategory, StockStatus};

// ==========================================
// ValuationSummary - 估值汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSummary {
    /// 全量库存总价值
    pub total: f64,
    /// 按产品类别分桶的价值 (类别由调用方提供,缺失类别的库存只计入 total)
    pub by_category: HashMap<ProductCategory, f64>,
}

// ==========================================
// StockAlerts - 库存预警
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAlerts {
    /// 低库存 (0 < 数量 <= 下限)
    pub low: Vec<StockInventory>,
    /// 缺货 (数量 = 0)
    pub out_of_stock: Vec<StockInventory>,
}

// ==========================================
// StockValuationEngine - 库存估值引擎
// ==========================================
pub struct StockValuationEngine {
    // 无状态引擎,不需要注入依赖
    // Repository 操作由调用方处理
}

impl StockValuationEngine {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 判定库存状态
    ///
    /// 规则 (按序短路,相等偏向更紧急的状态):
    /// 1. 数量 = 0       → OutOfStock
    /// 2. 数量 <= 下限   → Low
    /// 3. 数量 >= 上限   → Overstock
    /// 4. 其余           → Normal
    ///
    /// # 参数
    /// - `stock`: 库存记录
    ///
    /// # 返回
    /// StockStatus 库存状态
    pub fn classify(&self, stock: &StockInventory) -> StockStatus {
        if stock.current_quantity == 0 {
            StockStatus::OutOfStock
        } else if stock.current_quantity <= stock.minimum_level {
            StockStatus::Low
        } else if stock.current_quantity >= stock.maximum_level {
            StockStatus::Overstock
        } else {
            StockStatus::Normal
        }
    }

    /// 计算单条库存价值
    ///
    /// 价值 = 当前数量 × 单价,不做舍入 (展示层负责格式化)
    pub fn value(&self, stock: &StockInventory) -> f64 {
        stock.current_quantity as f64 * stock.unit_price
    }

    /// 估值汇总
    ///
    /// # 参数
    /// - `stocks`: 库存快照列表
    /// - `categories`: product_id → 产品类别映射 (来自产品主数据,由调用方准备)
    ///
    /// # 返回
    /// ValuationSummary { total, by_category }
    /// total 对全量库存求和; 映射中缺失类别的库存不进入 by_category
    pub fn aggregate_valuation(
        &self,
        stocks: &[StockInventory],
        categories: &HashMap<String, ProductCategory>,
    ) -> ValuationSummary {
        let mut total = 0.0;
        let mut by_category: HashMap<ProductCategory, f64> = HashMap::new();

        for stock in stocks {
            let stock_value = self.value(stock);
            total += stock_value;

            if let Some(category) = categories.get(&stock.product_id) {
                *by_category.entry(*category).or_insert(0.0) += stock_value;
            }
        }

        ValuationSummary { total, by_category }
    }

    /// 低库存预警分拣
    ///
    /// 依据 `classify` 将库存分拣为两个预警列表,其余状态不进入结果
    ///
    /// # 返回
    /// StockAlerts { low, out_of_stock }
    pub fn low_stock_alerts(&self, stocks: &[StockInventory]) -> StockAlerts {
        let mut low = Vec::new();
        let mut out_of_stock = Vec::new();

        for stock in stocks {
            match self.classify(stock) {
                StockStatus::Low => low.push(stock.clone()),
                StockStatus::OutOfStock => out_of_stock.push(stock.clone()),
                _ => {}
            }
        }

        StockAlerts { low, out_of_stock }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for StockValuationEngine {
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
    use chrono::Utc;

    /// 创建测试用的库存记录
    fn create_test_stock(
        product_id: &str,
        quantity: i64,
        min_level: i64,
        max_level: i64,
        unit_price: f64,
    ) -> StockInventory {
        StockInventory {
            product_id: product_id.to_string(),
            product_name: format!("产品{}", product_id),
            current_quantity: quantity,
            minimum_level: min_level,
            maximum_level: max_level,
            unit_price,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_classify_out_of_stock() {
        let engine = StockValuationEngine::new();
        let stock = create_test_stock("P001", 0, 10, 1000, 50.0);

        assert_eq!(engine.classify(&stock), StockStatus::OutOfStock);
    }

    #[test]
    fn test_classify_low() {
        let engine = StockValuationEngine::new();

        // 低于下限
        let stock = create_test_stock("P001", 5, 10, 1000, 50.0);
        assert_eq!(engine.classify(&stock), StockStatus::Low);

        // 等于下限 → 仍判 Low (相等偏向紧急状态)
        let stock = create_test_stock("P002", 10, 10, 1000, 50.0);
        assert_eq!(engine.classify(&stock), StockStatus::Low);
    }

    #[test]
    fn test_classify_overstock() {
        let engine = StockValuationEngine::new();

        // 超过上限
        let stock = create_test_stock("P001", 1500, 10, 1000, 50.0);
        assert_eq!(engine.classify(&stock), StockStatus::Overstock);

        // 等于上限 → 仍判 Overstock
        let stock = create_test_stock("P002", 1000, 10, 1000, 50.0);
        assert_eq!(engine.classify(&stock), StockStatus::Overstock);
    }

    #[test]
    fn test_classify_normal() {
        let engine = StockValuationEngine::new();
        let stock = create_test_stock("P001", 500, 10, 1000, 50.0);

        assert_eq!(engine.classify(&stock), StockStatus::Normal);
    }

    #[test]
    fn test_classify_is_deterministic() {
        // 相同输入必得相同状态
        let engine = StockValuationEngine::new();
        let stock = create_test_stock("P001", 7, 10, 1000, 50.0);

        let first = engine.classify(&stock);
        let second = engine.classify(&stock);

        assert_eq!(first, second);
    }

    #[test]
    fn test_value_scenario() {
        // 数量=5, 下限=10, 上限=1000, 单价=50 → 状态 Low, 价值 250
        let engine = StockValuationEngine::new();
        let stock = create_test_stock("P001", 5, 10, 1000, 50.0);

        assert_eq!(engine.classify(&stock), StockStatus::Low);
        assert_eq!(engine.value(&stock), 250.0);
    }

    #[test]
    fn test_value_zero_quantity() {
        let engine = StockValuationEngine::new();
        let stock = create_test_stock("P001", 0, 10, 1000, 50.0);

        assert_eq!(engine.value(&stock), 0.0);
    }

    #[test]
    fn test_aggregate_valuation() {
        let engine = StockValuationEngine::new();
        let stocks = vec![
            create_test_stock("P001", 100, 10, 1000, 2.5),  // 250
            create_test_stock("P002", 40, 10, 1000, 10.0),  // 400
            create_test_stock("P003", 10, 5, 1000, 35.0),   // 350
        ];

        let mut categories = HashMap::new();
        categories.insert("P001".to_string(), ProductCategory::RawMaterial);
        categories.insert("P002".to_string(), ProductCategory::FinishedGood);
        categories.insert("P003".to_string(), ProductCategory::RawMaterial);

        let summary = engine.aggregate_valuation(&stocks, &categories);

        assert_eq!(summary.total, 1000.0);
        assert_eq!(
            summary.by_category.get(&ProductCategory::RawMaterial),
            Some(&600.0)
        );
        assert_eq!(
            summary.by_category.get(&ProductCategory::FinishedGood),
            Some(&400.0)
        );
        assert_eq!(summary.by_category.get(&ProductCategory::ByProduct), None);
    }

    #[test]
    fn test_aggregate_valuation_missing_category() {
        // 类别映射缺失的库存: 计入 total,不进 by_category
        let engine = StockValuationEngine::new();
        let stocks = vec![
            create_test_stock("P001", 100, 10, 1000, 1.0), // 100, 无类别
            create_test_stock("P002", 50, 10, 1000, 2.0),  // 100
        ];

        let mut categories = HashMap::new();
        categories.insert("P002".to_string(), ProductCategory::FinishedGood);

        let summary = engine.aggregate_valuation(&stocks, &categories);

        assert_eq!(summary.total, 200.0);
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(
            summary.by_category.get(&ProductCategory::FinishedGood),
            Some(&100.0)
        );
    }

    #[test]
    fn test_low_stock_alerts() {
        let engine = StockValuationEngine::new();
        let stocks = vec![
            create_test_stock("P001", 0, 10, 1000, 50.0),   // 缺货
            create_test_stock("P002", 5, 10, 1000, 50.0),   // 低库存
            create_test_stock("P003", 500, 10, 1000, 50.0), // 正常
            create_test_stock("P004", 1200, 10, 1000, 50.0), // 积压(不预警)
        ];

        let alerts = engine.low_stock_alerts(&stocks);

        assert_eq!(alerts.out_of_stock.len(), 1);
        assert_eq!(alerts.out_of_stock[0].product_id, "P001");
        assert_eq!(alerts.low.len(), 1);
        assert_eq!(alerts.low[0].product_id, "P002");
    }

    #[test]
    fn test_low_stock_alerts_empty_input() {
        let engine = StockValuationEngine::new();
        let alerts = engine.low_stock_alerts(&[]);

        assert!(alerts.low.is_empty());
        assert!(alerts.out_of_stock.is_empty());
    }
}
