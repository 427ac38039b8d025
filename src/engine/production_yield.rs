// ==========================================
// 制造业进销存系统 - 生产成材率引擎
// ==========================================
// 职责: 生产转化率/废料率计算与批量汇总
// 输入: 投入/产出/废料数量 或 生产记录快照
// 输出: 百分比指标,不做舍入 (展示层负责格式化)
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::production::ProductionRecord;
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// ProductionSummary - 生产汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSummary {
    pub total_input: i64,  // 投入合计
    pub total_output: i64, // 产出合计
    pub total_waste: i64,  // 废料合计
    /// 整体转化率 (投入合计为 0 时为 None)
    pub overall_conversion_rate: Option<f64>,
}

// ==========================================
// ProductionYieldCalculator - 生产成材率引擎
// ==========================================
pub struct ProductionYieldCalculator {
    // 无状态引擎
}

impl ProductionYieldCalculator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算转化率 (%)
    ///
    /// 转化率 = 产出 / 投入 × 100
    ///
    /// # 参数
    /// - `input`: 投入数量
    /// - `output`: 产出数量
    ///
    /// # 返回
    /// - Ok(f64): 转化率百分比,未舍入
    /// - Err(EngineError::DivisionByZero): 投入为 0
    /// - Err(EngineError::Validation): 投入/产出为负数
    pub fn conversion_rate(&self, input: i64, output: i64) -> EngineResult<f64> {
        if input == 0 {
            return Err(EngineError::DivisionByZero(
                "投入数量为0, 无法计算转化率".to_string(),
            ));
        }
        if input < 0 {
            return Err(EngineError::field_value("input_quantity", "投入数量不能为负数"));
        }
        if output < 0 {
            return Err(EngineError::field_value("output_quantity", "产出数量不能为负数"));
        }

        Ok(output as f64 / input as f64 * 100.0)
    }

    /// 计算废料率 (%)
    ///
    /// 废料率 = 废料 / 投入 × 100,规则与转化率一致
    pub fn waste_rate(&self, input: i64, waste: i64) -> EngineResult<f64> {
        if input == 0 {
            return Err(EngineError::DivisionByZero(
                "投入数量为0, 无法计算废料率".to_string(),
            ));
        }
        if input < 0 {
            return Err(EngineError::field_value("input_quantity", "投入数量不能为负数"));
        }
        if waste < 0 {
            return Err(EngineError::field_value("waste_quantity", "废料数量不能为负数"));
        }

        Ok(waste as f64 / input as f64 * 100.0)
    }

    /// 批量汇总
    ///
    /// 汇总若干生产记录的投入/产出/废料,并给出整体转化率
    /// 投入/产出/废料三个量彼此独立,汇总不强制对账
    pub fn summarize(&self, records: &[ProductionRecord]) -> ProductionSummary {
        let total_input: i64 = records.iter().map(|r| r.input_quantity).sum();
        let total_output: i64 = records.iter().map(|r| r.output_quantity).sum();
        let total_waste: i64 = records.iter().map(|r| r.waste_quantity).sum();

        let overall_conversion_rate = if total_input > 0 {
            Some(total_output as f64 / total_input as f64 * 100.0)
        } else {
            None
        };

        ProductionSummary {
            total_input,
            total_output,
            total_waste,
            overall_conversion_rate,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ProductionYieldCalculator {
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
    use chrono::{NaiveDate, Utc};

    /// 创建测试用的生产记录
    fn create_test_record(id: &str, input: i64, output: i64, waste: i64) -> ProductionRecord {
        ProductionRecord {
            production_id: id.to_string(),
            production_date: NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
            machine_code: "M-07".to_string(),
            input_quantity: input,
            output_quantity: output,
            waste_quantity: waste,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_conversion_rate_scenario() {
        // 投入 1000, 产出 650 → 65.0
        let calc = ProductionYieldCalculator::new();

        let rate = calc.conversion_rate(1000, 650).expect("计算失败");
        assert_eq!(rate, 65.0);
    }

    #[test]
    fn test_conversion_rate_zero_input() {
        let calc = ProductionYieldCalculator::new();

        let result = calc.conversion_rate(0, 650);
        assert!(matches!(result, Err(EngineError::DivisionByZero(_))));
    }

    #[test]
    fn test_conversion_rate_negative_rejected() {
        let calc = ProductionYieldCalculator::new();

        assert!(calc.conversion_rate(-10, 5).is_err());
        assert!(calc.conversion_rate(10, -5).is_err());
    }

    #[test]
    fn test_conversion_rate_zero_output() {
        let calc = ProductionYieldCalculator::new();

        assert_eq!(calc.conversion_rate(500, 0).expect("计算失败"), 0.0);
    }

    #[test]
    fn test_conversion_rate_unrounded() {
        // 1/3 → 33.33...%,引擎不舍入
        let calc = ProductionYieldCalculator::new();

        let rate = calc.conversion_rate(3, 1).expect("计算失败");
        assert!((rate - 100.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_waste_rate() {
        let calc = ProductionYieldCalculator::new();

        assert_eq!(calc.waste_rate(1000, 50).expect("计算失败"), 5.0);
        assert!(matches!(
            calc.waste_rate(0, 50),
            Err(EngineError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_summarize() {
        let calc = ProductionYieldCalculator::new();
        let records = vec![
            create_test_record("R001", 1000, 650, 300),
            create_test_record("R002", 500, 400, 80),
        ];

        let summary = calc.summarize(&records);

        assert_eq!(summary.total_input, 1500);
        assert_eq!(summary.total_output, 1050);
        assert_eq!(summary.total_waste, 380);
        assert_eq!(summary.overall_conversion_rate, Some(70.0));
    }

    #[test]
    fn test_summarize_empty() {
        let calc = ProductionYieldCalculator::new();

        let summary = calc.summarize(&[]);

        assert_eq!(summary.total_input, 0);
        assert_eq!(summary.overall_conversion_rate, None);
    }
}
