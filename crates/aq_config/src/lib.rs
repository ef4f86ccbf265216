// crates/aq_config/src/lib.rs

//! AquaTwin Config Layer
//!
//! 配置层，提供同步策略与运行窗口的运维参数。
//!
//! # 模块概览
//!
//! - [`sync_config`]: SyncConfig 同步/缓存策略配置（全部带默认值）
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: aq_workflow   ─> uses SyncConfig
//! Layer 4: aq_config     ─> SyncConfig (本层)
//! Layer 3: aq_physics    ─> 模型与引擎（标定常数在代码中，不在配置里）
//! Layer 1: aq_foundation
//! ```
//!
//! # 设计原则
//!
//! 1. **运维参数与标定常数分离**: 回看天数、节流窗口等可调；
//!    模型曲线参数是代码，改动必须过测试
//! 2. **全默认值**: 空 JSON `{}` 反序列化出可用配置
//! 3. **构造后验证**: `validate()` 拒绝自相矛盾的窗口组合

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod sync_config;

pub use error::ConfigError;
pub use sync_config::{SyncConfig, CURRENT_SCHEMA_VERSION};
