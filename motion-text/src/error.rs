//! # Error 模块
//!
//! 定义 motion-text 中使用的错误类型。
//!
//! 组件内部的异常情况（越界跳转、容器尚未布局等）一律降级处理，
//! 只有构造期的非法配置才会以错误的形式返回。

use thiserror::Error;

/// motion-text 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// 标题列表为空
    #[error("标题列表不能为空")]
    EmptyCaptions,

    /// 无效的配置项
    #[error("配置项 '{field}' 无效 - {message}")]
    InvalidConfig { field: String, message: String },
}

impl MotionError {
    /// 创建配置错误
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type MotionResult<T> = Result<T, MotionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(MotionError::EmptyCaptions.to_string(), "标题列表不能为空");

        let err = MotionError::invalid_config("rotation_interval_ms", "必须大于 0");
        assert_eq!(
            err.to_string(),
            "配置项 'rotation_interval_ms' 无效 - 必须大于 0"
        );
    }
}
