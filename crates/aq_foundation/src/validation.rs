// crates/aq_foundation/src/validation.rs

//! 运行时验证工具
//!
//! 提供验证报告和错误/警告类型，用于输入数据验证。
//! 错误表示不允许继续的配置缺陷，警告表示可以继续但值得记录的不一致。
//!
//! # 示例
//!
//! ```
//! use aq_foundation::validation::{ValidationError, ValidationReport};
//!
//! let depth = -1.0f64;
//! let mut report = ValidationReport::new();
//! if depth <= 0.0 {
//!     report.add_error(ValidationError::OutOfRange {
//!         field: "mean_depth",
//!         value: depth,
//!         min: 0.0,
//!         max: f64::MAX,
//!     });
//! }
//! assert!(report.has_errors());
//! ```

use serde::Serialize;
use std::fmt;

/// 验证报告
///
/// 可序列化以便嵌入诊断输出；反序列化无意义（字段名是静态的）。
#[derive(Debug, Default, Clone, Serialize)]
pub struct ValidationReport {
    /// 错误列表
    pub errors: Vec<ValidationError>,
    /// 警告列表
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// 创建空的验证报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加错误
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 是否有警告
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 是否通过（无错误）
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// 合并另一个报告
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// 生成单行摘要，用于嵌入错误信息
    pub fn summary(&self) -> String {
        let errors: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        errors.join("; ")
    }
}

/// 验证错误（不允许继续）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValidationError {
    /// 数值超出允许范围
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
    /// 缺少必需字段
    Missing {
        /// 字段名
        field: &'static str,
    },
    /// 字段间不一致
    Inconsistent {
        /// 字段名
        field: &'static str,
        /// 说明
        message: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field}={value} 超出范围 [{min}, {max}]"),
            Self::Missing { field } => write!(f, "缺少字段 {field}"),
            Self::Inconsistent { field, message } => write!(f, "{field} 不一致: {message}"),
        }
    }
}

/// 验证警告（可以继续，但值得记录）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValidationWarning {
    /// 字段间不一致，已按文档化规则解决
    Inconsistent {
        /// 字段名
        field: &'static str,
        /// 说明与解决方式
        message: String,
    },
    /// 可疑但合法的值
    Suspicious {
        /// 字段名
        field: &'static str,
        /// 说明
        message: String,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inconsistent { field, message } => write!(f, "{field} 不一致: {message}"),
            Self::Suspicious { field, message } => write!(f, "{field} 可疑: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_error_makes_invalid() {
        let mut report = ValidationReport::new();
        report.add_error(ValidationError::Missing { field: "area" });
        assert!(!report.is_valid());
        assert!(report.summary().contains("area"));
    }

    #[test]
    fn test_warning_keeps_valid() {
        let mut report = ValidationReport::new();
        report.add_warning(ValidationWarning::Suspicious {
            field: "shape_factor",
            message: "异常大".into(),
        });
        assert!(report.is_valid());
        assert!(report.has_warnings());
    }

    #[test]
    fn test_report_serializes() {
        let mut report = ValidationReport::new();
        report.add_error(ValidationError::Missing { field: "area" });
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("area"));
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationReport::new();
        a.add_error(ValidationError::Missing { field: "area" });
        let mut b = ValidationReport::new();
        b.add_error(ValidationError::Missing { field: "depth" });
        a.merge(b);
        assert_eq!(a.errors.len(), 2);
    }
}
