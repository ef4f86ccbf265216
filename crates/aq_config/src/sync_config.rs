// crates/aq_config/src/sync_config.rs

//! SyncConfig - 同步/缓存策略配置
//!
//! 定义同步决策与运行窗口的全部运维参数，带字段级默认值，
//! 空 JSON 即可得到生产默认配置。模型标定常数不在这里——
//! 曲线参数是代码，由 aq_physics 的测试钉住。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 当前缓存模式版本
///
/// 模型语义变更（曲线、常数、状态布局）时递增；缓存条目的
/// 版本号不等于此值时整体作废，强制冷启动。
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

/// 同步/缓存策略配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// 冷启动回看天数
    #[serde(default = "default_cold_start_days")]
    pub cold_start_days: u32,

    /// 长陈旧阈值 [天]，超过则放弃增量、整体冷启动
    #[serde(default = "default_stale_days")]
    pub stale_days: u32,

    /// 节流窗口 [h]，未超过则直接返回缓存值
    #[serde(default = "default_throttle_hours")]
    pub throttle_hours: u32,

    /// 增量重放的安全边际 [h]
    #[serde(default = "default_incremental_margin_hours")]
    pub incremental_margin_hours: u32,

    /// 预报前瞻 [h]
    #[serde(default = "default_forecast_horizon_hours")]
    pub forecast_horizon_hours: u32,

    /// 输出窗口回看 [h]
    #[serde(default = "default_output_window_hours")]
    pub output_window_hours: u32,

    /// 缓存模式版本
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
}

fn default_cold_start_days() -> u32 {
    30
}
fn default_stale_days() -> u32 {
    15
}
fn default_throttle_hours() -> u32 {
    6
}
fn default_incremental_margin_hours() -> u32 {
    1
}
fn default_forecast_horizon_hours() -> u32 {
    96
}
fn default_output_window_hours() -> u32 {
    168
}
fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            cold_start_days: default_cold_start_days(),
            stale_days: default_stale_days(),
            throttle_hours: default_throttle_hours(),
            incremental_margin_hours: default_incremental_margin_hours(),
            forecast_horizon_hours: default_forecast_horizon_hours(),
            output_window_hours: default_output_window_hours(),
            schema_version: default_schema_version(),
        }
    }
}

impl SyncConfig {
    /// 验证配置自洽
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cold_start_days == 0 {
            return Err(ConfigError::invalid(
                "cold_start_days",
                self.cold_start_days,
                "必须为正",
            ));
        }
        if self.stale_days == 0 {
            return Err(ConfigError::invalid(
                "stale_days",
                self.stale_days,
                "必须为正",
            ));
        }
        if self.throttle_hours == 0 {
            return Err(ConfigError::invalid(
                "throttle_hours",
                self.throttle_hours,
                "必须为正",
            ));
        }
        if u64::from(self.throttle_hours) >= u64::from(self.stale_days) * 24 {
            return Err(ConfigError::invalid(
                "throttle_hours",
                self.throttle_hours,
                "节流窗口必须短于长陈旧阈值",
            ));
        }
        if self.stale_days > self.cold_start_days {
            return Err(ConfigError::invalid(
                "stale_days",
                self.stale_days,
                "长陈旧阈值不应超过冷启动回看",
            ));
        }
        Ok(())
    }

    /// 从 JSON 字符串解析并验证
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
