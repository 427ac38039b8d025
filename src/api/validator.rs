// ==========================================
// 制造业进销存系统 - 输入校验器
// ==========================================
// 职责: 表单文本的数值/必填校验,全部收口到 API 层
// 展示层只做显示,不再各自解析数字
// ==========================================

use crate::api::error::{ApiError, ApiResult};

/// 必填字段校验（去首尾空白）
///
/// # 返回
/// - Ok(String): 清洗后的值
/// - Err(ApiError::InvalidInput): 为空
pub fn require_non_empty(field: &str, value: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{}不能为空", field)));
    }
    Ok(trimmed.to_string())
}

/// 解析金额文本（必须为有限数值且 >= 0）
pub fn parse_amount(field: &str, text: &str) -> ApiResult<f64> {
    let amount: f64 = text.trim().parse().map_err(|_| {
        ApiError::InvalidInput(format!("{}不是合法数字: '{}'", field, text))
    })?;

    if !amount.is_finite() || amount < 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "{}必须为非负数, 实际为 {}",
            field, text
        )));
    }

    Ok(amount)
}

/// 解析正金额文本（必须 > 0,用于付款）
pub fn parse_positive_amount(field: &str, text: &str) -> ApiResult<f64> {
    let amount = parse_amount(field, text)?;
    if amount <= 0.0 {
        return Err(ApiError::InvalidInput(format!("{}必须为正数", field)));
    }
    Ok(amount)
}

/// 解析数量文本（非负整数）
pub fn parse_quantity(field: &str, text: &str) -> ApiResult<i64> {
    let quantity: i64 = text.trim().parse().map_err(|_| {
        ApiError::InvalidInput(format!("{}不是合法整数: '{}'", field, text))
    })?;

    if quantity < 0 {
        return Err(ApiError::InvalidInput(format!("{}不能为负数", field)));
    }

    Ok(quantity)
}

/// 校验月份标签格式 "YYYY-MM"
pub fn validate_month_label(month: &str) -> ApiResult<String> {
    let trimmed = month.trim();
    let valid = trimmed.is_ascii()
        && trimmed.len() == 7
        && trimmed.as_bytes()[4] == b'-'
        && trimmed[..4].chars().all(|c| c.is_ascii_digit())
        && trimmed[5..].chars().all(|c| c.is_ascii_digit())
        && matches!(trimmed[5..].parse::<u8>(), Ok(1..=12));

    if !valid {
        return Err(ApiError::InvalidInput(format!(
            "月份格式应为YYYY-MM: '{}'",
            month
        )));
    }

    Ok(trimmed.to_string())
}
