// crates/aq_physics/src/models/turbidity.rs

//! 浊度模型：向基线的指数衰减与降雨注入
//!
//! 每条记录一步：
//!
//! ```text
//! t' = baseline + (t − baseline)·(1 − DECAY_RATE)
//! 若 precip > 0.1 mm: t' += precip·RAIN_COEF
//! ```
//!
//! DECAY_RATE 标定为日沉降率，但按"每条记录应用一次"的节奏
//! 与热力模型保持一致——下游标定常数假定了这一节奏，属于
//! 刻意保留的行为，不要改成真实的日速率。
//!
//! 输出夹入 [0, 100] NTU 并保留一位小数。

use crate::types::LandUse;
use aq_foundation::float::{clamp_to, round_to};

// ============================================================
// 常量
// ============================================================

/// 浊度下限 [NTU]
pub const TURBIDITY_MIN: f64 = 0.0;

/// 浊度上限 [NTU]
pub const TURBIDITY_MAX: f64 = 100.0;

/// 沉降衰减率（标定为日速率，按记录应用）
const DECAY_RATE: f64 = 0.77;

/// 触发注入的最小降水量 [mm]
const RAIN_THRESHOLD_MM: f64 = 0.1;

/// 降雨浊度注入系数 [NTU/mm]
pub const RAIN_COEF: f64 = 2.0;

/// 土地利用浊度基线 [NTU]
///
/// 城市径流携带最多悬浮物，森林集水区最少。
fn baseline_ntu(land_use: LandUse) -> f64 {
    match land_use {
        LandUse::Urban => 18.0,
        LandUse::Agricultural => 14.0,
        LandUse::Grassland => 8.0,
        LandUse::Forested => 4.0,
    }
}

// ============================================================
// 模型
// ============================================================

/// 浊度模型
#[derive(Debug, Clone, Copy)]
pub struct TurbidityModel {
    /// 基线浊度 [NTU]
    baseline: f64,
}

impl TurbidityModel {
    /// 从土地利用类别构造
    pub fn new(land_use: LandUse) -> Self {
        Self {
            baseline: baseline_ntu(land_use),
        }
    }

    /// 基线浊度 [NTU]
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// 单步推进
    ///
    /// `turbidity` 为 None 时从基线出发。返回夹入 [0, 100] NTU、
    /// 保留一位小数后的下一步浊度。
    pub fn step(&self, precipitation_mm: f64, turbidity: Option<f64>) -> f64 {
        let current = turbidity.unwrap_or(self.baseline);

        // 向基线沉降
        let mut next = self.baseline + (current - self.baseline) * (1.0 - DECAY_RATE);

        // 降雨注入
        if precipitation_mm > RAIN_THRESHOLD_MM {
            next += precipitation_mm * RAIN_COEF;
        }

        round_to(clamp_to(next, TURBIDITY_MIN, TURBIDITY_MAX), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_ordering() {
        assert!(baseline_ntu(LandUse::Urban) > baseline_ntu(LandUse::Agricultural));
        assert!(baseline_ntu(LandUse::Agricultural) > baseline_ntu(LandUse::Grassland));
        assert!(baseline_ntu(LandUse::Grassland) > baseline_ntu(LandUse::Forested));
    }

    #[test]
    fn test_holds_baseline_without_rain() {
        let model = TurbidityModel::new(LandUse::Grassland);
        let mut t = None;
        for _ in 0..72 {
            t = Some(model.step(0.0, t));
        }
        assert!((t.unwrap() - model.baseline()).abs() <= 0.1);
    }

    #[test]
    fn test_rain_injection_amount() {
        let model = TurbidityModel::new(LandUse::Grassland);
        let after = model.step(10.0, Some(model.baseline()));
        // 基线上的样本：衰减项无贡献，注入 10 mm × RAIN_COEF
        assert!((after - (model.baseline() + 10.0 * RAIN_COEF)).abs() < 1e-10);
    }

    #[test]
    fn test_below_threshold_no_injection() {
        let model = TurbidityModel::new(LandUse::Forested);
        let after = model.step(0.05, Some(model.baseline()));
        assert!((after - model.baseline()).abs() < 1e-10);
    }

    #[test]
    fn test_decay_toward_baseline() {
        let model = TurbidityModel::new(LandUse::Forested);
        let spiked = model.step(10.0, Some(model.baseline()));
        let mut t = spiked;
        for _ in 0..6 {
            let next = model.step(0.0, Some(t));
            assert!(next < t);
            t = next;
        }
        assert!((t - model.baseline()).abs() <= 0.1);
    }

    #[test]
    fn test_clamped_to_range() {
        let model = TurbidityModel::new(LandUse::Urban);
        let extreme = model.step(80.0, Some(90.0));
        assert!(extreme <= TURBIDITY_MAX);
        assert!(extreme >= TURBIDITY_MIN);
    }

    #[test]
    fn test_one_decimal_rounding() {
        let model = TurbidityModel::new(LandUse::Grassland);
        let v = model.step(1.234, Some(23.456));
        assert!((v * 10.0 - (v * 10.0).round()).abs() < 1e-9);
    }
}
