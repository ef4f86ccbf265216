// crates/aq_foundation/src/lib.rs

//! AquaTwin Foundation Layer
//!
//! 零依赖基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `AqError` / `AqResult`
//! - [`float`]: 浮点有限性守卫与数值工具
//! - [`validation`]: 运行时验证报告
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 serde 和 thiserror
//! 2. **纯计算**: 本层不做任何 IO
//! 3. **可追溯**: 错误携带字段名与越界范围
//!
//! # 示例
//!
//! ```
//! use aq_foundation::{AqError, AqResult, float::ensure_finite};
//!
//! fn half(value: f64) -> AqResult<f64> {
//!     let v = ensure_finite("value", value)?;
//!     Ok(v * 0.5)
//! }
//!
//! assert!(half(4.0).is_ok());
//! assert!(half(f64::NAN).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;
pub mod validation;

// 重导出常用类型
pub use error::{AqError, AqResult};
pub use validation::{ValidationError, ValidationReport, ValidationWarning};

/// 条件不满足时提前返回错误
///
/// # 示例
///
/// ```
/// use aq_foundation::{ensure, AqError, AqResult};
///
/// fn check(v: i32) -> AqResult<()> {
///     ensure!(v > 0, AqError::invalid_input("必须为正"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

/// 从 `Option` 中取值，`None` 时提前返回错误
///
/// # 示例
///
/// ```
/// use aq_foundation::{require, AqError, AqResult};
///
/// fn unwrap_depth(depth: Option<f64>) -> AqResult<f64> {
///     let d = require!(depth, AqError::missing_field("depth"));
///     Ok(d)
/// }
/// ```
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr) => {
        match $opt {
            Some(v) => v,
            None => return Err($err),
        }
    };
}

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{AqError, AqResult};
    pub use crate::float::{clamp_to, ensure_finite, round_to, DEFAULT_EPSILON};
    pub use crate::validation::{ValidationError, ValidationReport, ValidationWarning};
    pub use crate::{ensure, require};
}
