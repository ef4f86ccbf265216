// crates/aq_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `AqError` 枚举和 `AqResult` 类型别名，用于整个项目的错误处理。
//!
//! # 设计原则
//!
//! 1. **层次化**: 基础层只定义核心错误，模拟相关错误在 aq_physics 中定义
//! 2. **易用性**: 提供便捷的构造方法
//! 3. **可追溯**: 越界错误携带字段名与期望范围
//!
//! # 示例
//!
//! ```
//! use aq_foundation::error::{AqError, AqResult};
//!
//! fn read_depth(raw: f64) -> AqResult<f64> {
//!     AqError::check_range("depth", raw, 0.1, 200.0)?;
//!     Ok(raw)
//! }
//! ```

use thiserror::Error;

/// 统一结果类型
pub type AqResult<T> = Result<T, AqError>;

/// AquaTwin 错误类型
///
/// 核心错误类型，用于整个项目。模拟计算相关的错误应在 `aq_physics` 中扩展。
#[derive(Error, Debug)]
pub enum AqError {
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 非有限浮点值（NaN 或 Inf）
    #[error("非有限浮点值: {field}={value}")]
    NonFinite {
        /// 字段名
        field: &'static str,
        /// 非法的值
        value: f64,
    },

    /// 缺少必需字段
    #[error("缺少必需字段: {field}")]
    MissingField {
        /// 字段名
        field: &'static str,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },

    /// 锁获取失败
    #[error("锁获取失败: {resource}")]
    LockError {
        /// 失败的资源名
        resource: String,
    },

    /// 验证失败
    #[error("验证失败: {0}")]
    Validation(String),

    /// 资源未找到
    #[error("资源未找到: {resource}")]
    NotFound {
        /// 资源名称
        resource: String,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl AqError {
    /// 从IO错误创建
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 从IO错误创建（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// 非有限浮点值
    pub fn non_finite(field: &'static str, value: f64) -> Self {
        Self::NonFinite { field, value }
    }

    /// 缺少必需字段
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// 锁错误
    pub fn lock_error(resource: impl Into<String>) -> Self {
        Self::LockError {
            resource: resource.into(),
        }
    }

    /// 验证失败
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 资源未找到
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl AqError {
    /// 检查值是否在范围内
    #[inline]
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> AqResult<()> {
        if value < min || value > max {
            Err(Self::out_of_range(field, value, min, max))
        } else {
            Ok(())
        }
    }

    /// 检查值是否有限
    #[inline]
    pub fn check_finite(field: &'static str, value: f64) -> AqResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::non_finite(field, value))
        }
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for AqError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for AqError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::LockError {
            resource: "mutex".into(),
        }
    }
}

// ========================================================================
// 测试
// ========================================================================
