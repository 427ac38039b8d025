// ==========================================
// 制造业进销存系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 引擎校验失败即返回,不做恢复,由调用方决定提示/记录/中止
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 校验错误 =====
    #[error("数据验证失败: {0}")]
    Validation(String),

    #[error("字段值错误 (field={field}): {message}")]
    FieldValue { field: String, message: String },

    // ===== 计算错误 =====
    #[error("除零错误: {0}")]
    DivisionByZero(String),
}

impl EngineError {
    /// 构造校验错误
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }

    /// 构造字段值错误
    pub fn field_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::FieldValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
