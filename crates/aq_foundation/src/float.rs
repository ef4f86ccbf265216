// crates/aq_foundation/src/float.rs

//! 浮点有限性守卫与数值工具
//!
//! 模拟引擎的每一步都依赖有限的载荷状态，任何 NaN/Inf 都意味着
//! 模型缺陷而非数据噪声，因此这里的守卫返回错误而不是静默替换。
//!
//! # 示例
//!
//! ```
//! use aq_foundation::float::{clamp_to, ensure_finite, round_to};
//!
//! assert_eq!(clamp_to(30.0, 3.0, 26.5), 26.5);
//! assert_eq!(round_to(3.14159, 1), 3.1);
//! assert!(ensure_finite("t", f64::NAN).is_err());
//! ```

use crate::error::{AqError, AqResult};

// ============================================================================
// 数值常量
// ============================================================================

/// 浮点数相等性比较的默认容差
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// 安全除法的最小分母阈值
pub const SAFE_DIV_EPSILON: f64 = 1e-12;

// ============================================================================
// 守卫与工具函数
// ============================================================================

/// 检查值有限并原样返回，否则返回 [`AqError::NonFinite`]
#[inline]
pub fn ensure_finite(field: &'static str, value: f64) -> AqResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AqError::non_finite(field, value))
    }
}

/// 将值夹入闭区间 `[min, max]`
#[inline]
pub fn clamp_to(value: f64, min: f64, max: f64) -> f64 {
    debug_assert!(min <= max, "clamp_to: min > max");
    value.clamp(min, max)
}

/// 四舍五入到指定小数位
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// 容差相等比较
#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// 安全除法，分母过小时返回 fallback
#[inline]
pub fn safe_div(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator.abs() < SAFE_DIV_EPSILON {
        fallback
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", 1.5).unwrap(), 1.5);
        assert!(ensure_finite("x", f64::NAN).is_err());
        assert!(ensure_finite("x", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_clamp_to() {
        assert_eq!(clamp_to(2.0, 3.0, 26.5), 3.0);
        assert_eq!(clamp_to(30.0, 3.0, 26.5), 26.5);
        assert_eq!(clamp_to(10.0, 3.0, 26.5), 10.0);
    }

    #[test]
    fn test_round_to() {
        assert!((round_to(12.34, 1) - 12.3).abs() < DEFAULT_EPSILON);
        assert!((round_to(12.36, 1) - 12.4).abs() < DEFAULT_EPSILON);
        assert!((round_to(12.34, 0) - 12.0).abs() < DEFAULT_EPSILON);
    }

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(10.0, 2.0, 0.0), 5.0);
        assert_eq!(safe_div(10.0, 0.0, -1.0), -1.0);
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + 1e-12, DEFAULT_EPSILON));
        assert!(!approx_eq(1.0, 1.1, DEFAULT_EPSILON));
    }
}
