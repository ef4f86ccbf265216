// crates/aq_physics/src/engine/flow.rs

//! 流量强度代理：土壤饱和度累积量
//!
//! 每小时一步：
//!
//! ```text
//! coef_daily  = clamp(0.96 − 0.006·T_air, 0.80, 0.98)
//! sat'        = sat · coef_daily^(1/24) + precip
//! ```
//!
//! 温度越高蒸散越强、衰减越快。流量强度即累积量本身；趋势由
//! 小时差分在 ±0.02 死区内分类。

use crate::state::FlowTrend;
use aq_foundation::float::clamp_to;

/// 趋势分类死区
const TREND_DEAD_BAND: f64 = 0.02;

/// 日衰减系数下限
const DAILY_COEF_MIN: f64 = 0.80;

/// 日衰减系数上限
const DAILY_COEF_MAX: f64 = 0.98;

/// 温度敏感的日衰减系数
#[inline]
pub fn daily_decay_coef(air_temp: f64) -> f64 {
    clamp_to(0.96 - 0.006 * air_temp, DAILY_COEF_MIN, DAILY_COEF_MAX)
}

/// 单步推进土壤饱和度累积量
#[inline]
pub fn step_saturation(saturation: f64, air_temp: f64, precipitation_mm: f64) -> f64 {
    saturation * daily_decay_coef(air_temp).powf(1.0 / 24.0) + precipitation_mm
}

/// 由小时差分分类流量趋势
#[inline]
pub fn classify_trend(intensity: f64, prev_intensity: Option<f64>) -> FlowTrend {
    let Some(prev) = prev_intensity else {
        return FlowTrend::Stable;
    };
    let delta = intensity - prev;
    if delta > TREND_DEAD_BAND {
        FlowTrend::Rising
    } else if delta < -TREND_DEAD_BAND {
        FlowTrend::Falling
    } else {
        FlowTrend::Stable
    }
}
