// crates/aq_physics/src/engine/driver.rs

//! 模拟驱动器
//!
//! 状态机：`Uninitialized → ColdStart → Running(steady)`，每次调用
//! 终止。冷启动就是"窗口外也推进状态"的普通运行——给足 30–45 天
//! 历史，热力状态会从气候播种值收敛到与实际天气一致；只要窗口
//! 之前的序列够长，单一循环同时覆盖两个阶段。
//!
//! # 失败语义
//!
//! - 档案非法：运行不启动（[`SimulationError::InvalidProfile`]）
//! - 单小时字段缺陷：已在序列构造时按默认值净化，不中断运行
//! - 载荷状态非有限：[`SimulationError::NumericDivergence`]，
//!   属于模型缺陷，绝不静默夹断
//!
//! 整段运行要么产出完整窗口，要么不产出任何点；缓存回退由
//! 上层（aq_workflow）负责。

use crate::bio::score::{species_score, ScoreContext, ScoreSet, SpeciesScore};
use crate::bio::species::TROUT_TEMP_CEILING;
use crate::engine::flow;
use crate::error::SimulationError;
use crate::forcing::{SanitizeStats, WeatherSeries};
use crate::models::{dissolved_oxygen, wave_height_cm, ThermalModel, TurbidityModel};
use crate::state::{SimulationPoint, SimulationState};
use crate::types::{Species, WaterBodyProfile};
use chrono::{DateTime, Utc};

/// 评分 EMA 平滑因子
///
/// 以窗口内第一个原始分播种，此后 `s' = s + α·(raw − s)`，
/// 抑制逐帧抖动。平滑状态在物理状态下游、互不影响。
pub const SCORE_EMA_ALPHA: f64 = 0.30;

/// 一次模拟运行的输出
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    /// 输出窗口内的时间序列（按时间升序）
    pub points: Vec<SimulationPoint>,
    /// 运行结束时的携带状态（供持久化/增量播种）
    pub state: SimulationState,
    /// 摄入边界的净化统计
    pub sanitize_stats: SanitizeStats,
}

/// 模拟驱动器
///
/// 持有由档案导出的模型参数；每次 [`Self::run`] 独立携带状态，
/// 同一驱动器可安全复用。
#[derive(Debug, Clone)]
pub struct SimulationDriver {
    thermal: ThermalModel,
    turbidity: TurbidityModel,
    surface_area: f64,
    shape_factor: f64,
    species: Vec<Species>,
}

impl SimulationDriver {
    /// 从水体档案构造
    ///
    /// 验证错误使构造失败；警告按文档化规则解决并记录。
    pub fn new(profile: &WaterBodyProfile) -> Result<Self, SimulationError> {
        let report = profile.validate();
        if report.has_errors() {
            return Err(SimulationError::InvalidProfile(report.summary()));
        }
        for warning in &report.warnings {
            tracing::warn!(warning = %warning, "水体档案验证警告");
        }

        Ok(Self {
            thermal: ThermalModel::new(profile),
            turbidity: TurbidityModel::new(profile.land_use),
            surface_area: profile.surface_area,
            shape_factor: profile.shape_factor,
            species: profile.effective_species(),
        })
    }

    /// 评分鱼种（解析空列表回退之后）
    pub fn species(&self) -> &[Species] {
        &self.species
    }

    /// 执行一次运行
    ///
    /// # 参数
    ///
    /// - `series`: 完整输入序列（历史 + 预报），状态对**每个**小时
    ///   推进——这是冷启动正确性的来源
    /// - `prior`: 先验状态；None 为冷启动
    /// - `window`: 输出窗口 [start, end]（闭区间）；None 输出全序列
    /// - `now`: 当前时刻，严格晚于 now 的点标记为预报
    pub fn run(
        &self,
        series: &WeatherSeries,
        prior: Option<SimulationState>,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
        now: DateTime<Utc>,
    ) -> Result<SimulationOutput, SimulationError> {
        let mut state = prior.unwrap_or_else(SimulationState::cold);
        let (win_start, win_end) = window.unwrap_or_else(|| series.span());
        let mut points = Vec::new();

        for (step, sample) in series.samples().iter().enumerate() {
            // ------------------------------------------------------------
            // 物理状态推进：窗口内外一致，冷启动收敛依赖于此
            // ------------------------------------------------------------
            let water_temp = self.thermal.step(sample, state.water_temp);
            let turbidity = self.turbidity.step(sample.precipitation, state.turbidity);
            let saturation =
                flow::step_saturation(state.soil_saturation, sample.air_temp, sample.precipitation);

            if !water_temp.is_finite() {
                return Err(SimulationError::NumericDivergence {
                    quantity: "water_temp",
                    step,
                });
            }
            if !turbidity.is_finite() {
                return Err(SimulationError::NumericDivergence {
                    quantity: "turbidity",
                    step,
                });
            }
            if !saturation.is_finite() {
                return Err(SimulationError::NumericDivergence {
                    quantity: "soil_saturation",
                    step,
                });
            }

            let flow_intensity = saturation;
            let flow_trend = flow::classify_trend(flow_intensity, state.prev_flow_intensity);

            state.water_temp = Some(water_temp);
            state.turbidity = Some(turbidity);
            state.soil_saturation = saturation;
            state.prev_flow_intensity = Some(flow_intensity);

            // ------------------------------------------------------------
            // 仅窗口内派生输出量
            // ------------------------------------------------------------
            if sample.timestamp < win_start || sample.timestamp > win_end {
                continue;
            }

            let oxygen = dissolved_oxygen(water_temp, sample.pressure);
            let wave = wave_height_cm(sample.wind_speed, self.surface_area, self.shape_factor);

            let ctx = ScoreContext {
                water_temp,
                turbidity,
                pressure_trend: series.pressure_trend_at(step),
                wind_speed: sample.wind_speed,
                cloud_cover: sample.cloud_cover,
                timestamp: sample.timestamp,
            };

            let mut scores = Vec::with_capacity(self.species.len());
            for &species in &self.species {
                let raw = species_score(&ctx, species);
                // 否决穿透平滑：高温下冷水鱼种直接归零并清空记忆，
                // EMA 不得把 0 拖成缓降曲线
                let smoothed = if species == Species::Trout && water_temp > TROUT_TEMP_CEILING {
                    0.0
                } else {
                    match state.memory_for(species) {
                        Some(prev) => prev + SCORE_EMA_ALPHA * (raw - prev),
                        None => raw,
                    }
                };
                state.remember(species, smoothed);
                scores.push(SpeciesScore {
                    species,
                    score: smoothed.round().clamp(0.0, 100.0) as u8,
                });
            }
            let best = scores.iter().map(|s| s.score).max().unwrap_or(0);

            points.push(SimulationPoint {
                timestamp: sample.timestamp,
                is_forecast: sample.timestamp > now,
                water_temp,
                turbidity,
                dissolved_oxygen: oxygen,
                wave_height_cm: wave,
                air_temp: sample.air_temp,
                pressure: sample.pressure,
                wind_speed: sample.wind_speed,
                precipitation: sample.precipitation,
                cloud_cover: sample.cloud_cover,
                condition_code: sample.condition_code,
                scores: ScoreSet { scores, best },
                flow_intensity,
                flow_trend,
            });
        }

        tracing::debug!(
            steps = series.len(),
            emitted = points.len(),
            "模拟运行完成"
        );

        Ok(SimulationOutput {
            points,
            state,
            sanitize_stats: series.sanitize_stats(),
        })
    }
}

/// 便捷入口：从档案直接运行一次全窗口模拟
pub fn simulate(
    profile: &WaterBodyProfile,
    series: &WeatherSeries,
    prior: Option<SimulationState>,
    now: DateTime<Utc>,
) -> Result<SimulationOutput, SimulationError> {
    SimulationDriver::new(profile)?.run(series, prior, None, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BasinKind, DepthClass, LandUse, WeatherSample};
    use chrono::{Duration, TimeZone};

    fn profile() -> WaterBodyProfile {
        WaterBodyProfile {
            basin: BasinKind::River,
            depth_class: DepthClass::Medium,
            land_use: LandUse::Grassland,
            mean_depth: Some(2.5),
            surface_area: 50_000.0,
            shape_factor: 2.0,
            species: vec![Species::Perch, Species::Trout],
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    }

    fn series(hours: i64, air_temp: f64) -> WeatherSeries {
        let samples: Vec<WeatherSample> = (0..hours)
            .map(|h| WeatherSample {
                timestamp: start() + Duration::hours(h),
                air_temp,
                pressure: 1013.25,
                wind_speed: 10.0,
                wind_direction: 180.0,
                precipitation: 0.0,
                cloud_cover: 40.0,
                condition_code: 2,
            })
            .collect();
        WeatherSeries::new(samples).unwrap()
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let mut p = profile();
        p.surface_area = -1.0;
        assert!(matches!(
            SimulationDriver::new(&p),
            Err(SimulationError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_state_advances_outside_window() {
        let driver = SimulationDriver::new(&profile()).unwrap();
        let s = series(72, 10.0);
        let now = start() + Duration::hours(71);

        // 只要最后 12 小时的窗口
        let window = Some((start() + Duration::hours(60), now));
        let windowed = driver.run(&s, None, window, now).unwrap();
        assert_eq!(windowed.points.len(), 12);

        // 全窗口运行在同一小时处的水温必须一致（状态在窗口外同样推进）
        let full = driver.run(&s, None, None, now).unwrap();
        let full_at_60 = &full.points[60];
        let win_at_60 = &windowed.points[0];
        assert_eq!(full_at_60.timestamp, win_at_60.timestamp);
        assert!((full_at_60.water_temp - win_at_60.water_temp).abs() < 1e-12);
        assert!((full_at_60.turbidity - win_at_60.turbidity).abs() < 1e-12);
    }

    #[test]
    fn test_idempotent_runs() {
        let driver = SimulationDriver::new(&profile()).unwrap();
        let s = series(100, 12.0);
        let now = start() + Duration::hours(99);
        let a = driver.run(&s, None, None, now).unwrap();
        let b = driver.run(&s, None, None, now).unwrap();
        assert_eq!(a.points, b.points);
        assert_eq!(a.state, b.state);
    }

    #[test]
    fn test_forecast_flag() {
        let driver = SimulationDriver::new(&profile()).unwrap();
        let s = series(48, 12.0);
        let now = start() + Duration::hours(24);
        let out = driver.run(&s, None, None, now).unwrap();
        assert!(!out.points[24].is_forecast);
        assert!(out.points[25].is_forecast);
    }

    #[test]
    fn test_ema_seeding_and_smoothing() {
        let driver = SimulationDriver::new(&profile()).unwrap();
        let s = series(3, 14.0);
        let now = start() + Duration::hours(2);
        let out = driver.run(&s, None, None, now).unwrap();

        // 第一点以原始分播种：状态记忆与输出一致
        let first = &out.points[0];
        let perch_first = first.scores.scores[0].score;
        assert!(perch_first <= 100);

        // 恒定输入下平滑序列应基本平稳
        let last = &out.points[2];
        let diff = (last.scores.scores[0].score as i16 - perch_first as i16).abs();
        assert!(diff <= 2);
    }

    #[test]
    fn test_veto_pierces_smoothing() {
        let mut p = profile();
        p.basin = BasinKind::Pond;
        p.mean_depth = Some(0.8);
        p.depth_class = DepthClass::Shallow;
        let driver = SimulationDriver::new(&p).unwrap();

        // 浅池塘 + 持续 30 °C 气温：水温迅速超过 24 °C
        let s = series(96, 30.0);
        let now = start() + Duration::hours(95);
        let out = driver.run(&s, None, None, now).unwrap();

        let last = out.points.last().unwrap();
        assert!(last.water_temp > TROUT_TEMP_CEILING);
        let trout = last
            .scores
            .scores
            .iter()
            .find(|s| s.species == Species::Trout)
            .unwrap();
        assert_eq!(trout.score, 0);
    }

    #[test]
    fn test_divergent_prior_detected() {
        let driver = SimulationDriver::new(&profile()).unwrap();
        let s = series(4, 10.0);
        let now = start() + Duration::hours(3);
        let bad = SimulationState::seeded(f64::NAN);
        assert!(matches!(
            driver.run(&s, Some(bad), None, now),
            Err(SimulationError::NumericDivergence {
                quantity: "water_temp",
                ..
            })
        ));
    }

    #[test]
    fn test_incremental_matches_cold_tail() {
        // 增量同步 = 同一递推的后段重放：以冷启动第 k 步的水温播种，
        // 重放剩余小时，终态应与整段冷启动一致
        let driver = SimulationDriver::new(&profile()).unwrap();
        let s = series(240, 11.0);
        let now = start() + Duration::hours(239);

        let cold = driver.run(&s, None, None, now).unwrap();

        let k = 120usize;
        let seed = cold.points[k - 1].water_temp;
        let tail_samples = s.samples()[k..].to_vec();
        let tail = WeatherSeries::new(tail_samples).unwrap();
        let incremental = driver
            .run(&tail, Some(SimulationState::seeded(seed)), None, now)
            .unwrap();

        let cold_final = cold.state.water_temp.unwrap();
        let inc_final = incremental.state.water_temp.unwrap();
        assert!((cold_final - inc_final).abs() < 1e-9);
    }
}
