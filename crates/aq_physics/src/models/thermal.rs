// crates/aq_physics/src/models/thermal.rs

//! 热力模型：气温到水温的单状态弛豫
//!
//! 每小时一步的离散欧拉迭代：
//!
//! ```text
//! T_eq = T_air + ΔT_landuse + μ·sin(2π·(doy − 172)/365)·10
//! μ    = 0.15 + 1/(5·depth)
//! T'   = T + (T_eq − T)/δ
//! ```
//!
//! 弛豫常数 δ：流动水体固定为 12（换水主导），封闭水体为
//! `0.207·depth^1.35`（热容主导），下限 1 保证欧拉步不过冲。
//!
//! 无先验水温时以月份气候基线表播种，避免从任意常数出发的
//! 漫长非物理收敛瞬态。输出每步夹入 [3, 26.5] °C。

use crate::types::{LandUse, WaterBodyProfile, WeatherSample};
use aq_foundation::float::clamp_to;
use chrono::Datelike;

// ============================================================
// 常量
// ============================================================

/// 水温下限 [°C]
pub const WATER_TEMP_MIN: f64 = 3.0;

/// 水温上限 [°C]
pub const WATER_TEMP_MAX: f64 = 26.5;

/// 太阳修正的物候相位（夏至附近的年积日）
const SOLAR_PHASE_DAY: f64 = 172.0;

/// 流动水体的固定弛豫常数
const FLOWING_DELTA: f64 = 12.0;

/// 封闭水体弛豫常数系数
const CLOSED_DELTA_COEF: f64 = 0.207;

/// 封闭水体弛豫常数深度指数
const CLOSED_DELTA_EXP: f64 = 1.35;

/// 弛豫常数下限（δ < 1 会使欧拉步反号过冲）
const DELTA_FLOOR: f64 = 1.0;

/// 月份水温气候基线 [°C]（1–12 月，中纬度）
const MONTHLY_BASELINE: [f64; 12] = [
    4.0, 4.5, 7.0, 10.5, 14.5, 18.0, 20.5, 20.0, 17.0, 12.5, 8.0, 5.0,
];

/// 土地利用入水温度偏移 [°C]
///
/// 城市地表径流偏暖，森林遮荫与基流偏冷。
fn land_use_offset(land_use: LandUse) -> f64 {
    match land_use {
        LandUse::Urban => 1.5,
        LandUse::Agricultural => 0.8,
        LandUse::Grassland => 0.3,
        LandUse::Forested => -0.6,
    }
}

// ============================================================
// 模型
// ============================================================

/// 热力模型
///
/// 由水体档案导出形态参数，持有弛豫常数与土地利用偏移；
/// 水温状态由调用方显式携带。
#[derive(Debug, Clone, Copy)]
pub struct ThermalModel {
    /// 弛豫常数 [步]
    delta: f64,
    /// 土地利用温度偏移 [°C]
    offset: f64,
    /// 太阳修正振幅系数 μ
    solar_mu: f64,
}

impl ThermalModel {
    /// 从水体档案构造
    pub fn new(profile: &WaterBodyProfile) -> Self {
        let depth = profile.effective_depth();
        let delta = if profile.basin.is_flowing() {
            FLOWING_DELTA
        } else {
            (CLOSED_DELTA_COEF * depth.powf(CLOSED_DELTA_EXP)).max(DELTA_FLOOR)
        };
        Self {
            delta,
            offset: land_use_offset(profile.land_use),
            solar_mu: 0.15 + 1.0 / (5.0 * depth),
        }
    }

    /// 弛豫常数 δ
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// 某一步的平衡水温 [°C]
    ///
    /// 气温 + 土地利用偏移 + 季节太阳修正。
    pub fn equilibrium_temp(&self, sample: &WeatherSample) -> f64 {
        let doy = sample.timestamp.ordinal() as f64;
        let solar =
            self.solar_mu * ((2.0 * std::f64::consts::PI * (doy - SOLAR_PHASE_DAY) / 365.0).sin())
                * 10.0;
        sample.air_temp + self.offset + solar
    }

    /// 月份气候基线播种值 [°C]
    ///
    /// `month` 取 1–12。
    pub fn seed_for_month(month: u32) -> f64 {
        let idx = (month.clamp(1, 12) - 1) as usize;
        MONTHLY_BASELINE[idx]
    }

    /// 单步推进
    ///
    /// `water_temp` 为 None 时按样本月份播种。返回夹入
    /// [3, 26.5] °C 后的下一步水温。
    pub fn step(&self, sample: &WeatherSample, water_temp: Option<f64>) -> f64 {
        let current =
            water_temp.unwrap_or_else(|| Self::seed_for_month(sample.timestamp.month()));
        let eq = self.equilibrium_temp(sample);
        let next = current + (eq - current) / self.delta;
        clamp_to(next, WATER_TEMP_MIN, WATER_TEMP_MAX)
    }

    /// 序列推进
    ///
    /// 与逐条调用 [`Self::step`] 严格等价（组合性由测试钉住），
    /// 返回最后一步的水温；空序列原样返回种子。
    pub fn run(&self, samples: &[WeatherSample], seed: Option<f64>) -> Option<f64> {
        let mut state = seed;
        for sample in samples {
            state = Some(self.step(sample, state));
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BasinKind, DepthClass, Species};
    use chrono::{Duration, TimeZone, Utc};

    fn profile(basin: BasinKind, depth: f64) -> WaterBodyProfile {
        WaterBodyProfile {
            basin,
            depth_class: DepthClass::Medium,
            land_use: LandUse::Grassland,
            mean_depth: Some(depth),
            surface_area: 20_000.0,
            shape_factor: 1.5,
            species: vec![Species::Perch],
        }
    }

    fn sample(hour: i64, air_temp: f64) -> WeatherSample {
        WeatherSample {
            timestamp: Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap()
                + Duration::hours(hour),
            air_temp,
            pressure: 1013.25,
            wind_speed: 8.0,
            wind_direction: 90.0,
            precipitation: 0.0,
            cloud_cover: 30.0,
            condition_code: 1,
        }
    }

    #[test]
    fn test_flowing_delta_fixed() {
        let model = ThermalModel::new(&profile(BasinKind::River, 2.0));
        assert!((model.delta() - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_closed_delta_depth_scaling() {
        let model = ThermalModel::new(&profile(BasinKind::DeepLake, 12.0));
        let expected = 0.207 * 12.0f64.powf(1.35);
        assert!((model.delta() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_shallow_pond_delta_floored() {
        let model = ThermalModel::new(&profile(BasinKind::Pond, 0.8));
        assert!((model.delta() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_seed_table() {
        assert!((ThermalModel::seed_for_month(1) - 4.0).abs() < 1e-10);
        assert!((ThermalModel::seed_for_month(7) - 20.5).abs() < 1e-10);
        // 越界月份夹断而不是崩溃
        assert!((ThermalModel::seed_for_month(0) - 4.0).abs() < 1e-10);
        assert!((ThermalModel::seed_for_month(13) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_step_moves_toward_equilibrium() {
        let model = ThermalModel::new(&profile(BasinKind::River, 2.0));
        let s = sample(0, 20.0);
        let eq = model.equilibrium_temp(&s);
        let from_below = model.step(&s, Some(10.0));
        let from_above = model.step(&s, Some(25.0));
        assert!(from_below > 10.0 && from_below < eq.min(26.5));
        assert!(from_above < 25.0);
    }

    #[test]
    fn test_step_clamps() {
        let model = ThermalModel::new(&profile(BasinKind::Pond, 0.8));
        let hot = sample(0, 45.0);
        let cold = sample(0, -25.0);
        assert!(model.step(&hot, Some(26.0)) <= WATER_TEMP_MAX);
        assert!(model.step(&cold, Some(4.0)) >= WATER_TEMP_MIN);
    }

    #[test]
    fn test_run_composes_with_step() {
        let model = ThermalModel::new(&profile(BasinKind::River, 2.0));
        let samples: Vec<WeatherSample> =
            (0..48).map(|h| sample(h, 8.0 + (h % 7) as f64)).collect();

        // 一次性整段
        let whole = model.run(&samples, Some(16.0)).unwrap();

        // 分段 [a, b] + [c]
        let mid = model.run(&samples[..30], Some(16.0));
        let split = model.run(&samples[30..], mid).unwrap();
        assert!((whole - split).abs() < 1e-12);

        // 逐条单步
        let mut state = Some(16.0);
        for s in &samples {
            state = Some(model.step(s, state));
        }
        assert!((whole - state.unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_convergence_to_equilibrium() {
        let model = ThermalModel::new(&profile(BasinKind::River, 2.0));
        let samples: Vec<WeatherSample> = (0..24 * 10).map(|h| sample(h, 10.0)).collect();
        // δ=12，10 天远超 5δ 小时
        let from_hot = model.run(&samples, Some(26.0)).unwrap();
        let from_cold = model.run(&samples, Some(3.5)).unwrap();
        assert!((from_hot - from_cold).abs() < 0.1);
    }

    #[test]
    fn test_seeding_when_no_prior() {
        let model = ThermalModel::new(&profile(BasinKind::River, 2.0));
        let s = sample(0, 18.0); // 六月
        let seeded = model.step(&s, None);
        let explicit = model.step(&s, Some(ThermalModel::seed_for_month(6)));
        assert!((seeded - explicit).abs() < 1e-12);
    }
}
