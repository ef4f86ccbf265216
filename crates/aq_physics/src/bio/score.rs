// crates/aq_physics/src/bio/score.rs

//! 评分组合：加权几何平均与高温否决
//!
//! ```text
//! score = 100 · Π subscoreᵢ ^ weightᵢ
//! ```
//!
//! 权重按鱼种给定、和为 1。几何平均使任何接近零的子分压制
//! 整体（限制因子语义）；算术平均做不到这一点，不要"简化"。
//!
//! 褐鳟在水温 > 24 °C 时直接得 0，该检查先于通用公式。

use super::light::{illumination, wind_factor};
use super::species::{curve_for, TROUT_TEMP_CEILING};
use crate::types::Species;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 评分环境上下文
///
/// 由引擎在每个输出小时组装：水体状态来自模拟，其余字段
/// 来自当前气象样本与序列回看。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreContext {
    /// 水温 [°C]
    pub water_temp: f64,
    /// 浊度 [NTU]
    pub turbidity: f64,
    /// 气压趋势 [hPa / 回看窗口]
    pub pressure_trend: f64,
    /// 风速 [km/h]
    pub wind_speed: f64,
    /// 云量 [%]
    pub cloud_cover: f64,
    /// 当前时刻 (UTC)
    pub timestamp: DateTime<Utc>,
}

/// 单鱼种评分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesScore {
    /// 鱼种
    pub species: Species,
    /// 活性分 (0–100)
    pub score: u8,
}

/// 一组鱼种的评分结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    /// 按输入顺序的各鱼种评分
    pub scores: Vec<SpeciesScore>,
    /// 各鱼种中的最高分
    pub best: u8,
}

/// 单鱼种原始评分 (0.0–100.0)
///
/// 连续值供 EMA 平滑使用；取整发生在输出边界。
/// 高温否决在通用公式之前生效。
pub fn species_score(ctx: &ScoreContext, species: Species) -> f64 {
    // 硬否决：冷水鱼种的高温保护
    if species == Species::Trout && ctx.water_temp > TROUT_TEMP_CEILING {
        return 0.0;
    }

    let curve = curve_for(species);
    let illum = illumination(ctx.timestamp, ctx.cloud_cover);
    let wf = wind_factor(ctx.wind_speed);

    let mut product = 1.0f64;

    let (temp_curve, temp_weight) = curve.temp;
    product *= temp_curve.eval(ctx.water_temp).clamp(0.0, 1.0).powf(temp_weight);

    if let Some((pressure_curve, pressure_weight)) = curve.pressure {
        product *= pressure_curve
            .eval(ctx.pressure_trend)
            .clamp(0.0, 1.0)
            .powf(pressure_weight);
    }

    let (vis_curve, vis_weight) = curve.visibility;
    product *= vis_curve
        .eval(illum, ctx.turbidity, wf)
        .clamp(0.0, 1.0)
        .powf(vis_weight);

    (100.0 * product).clamp(0.0, 100.0)
}

/// 对一组鱼种评分并取整
pub fn score_all(ctx: &ScoreContext, species: &[Species]) -> ScoreSet {
    let scores: Vec<SpeciesScore> = species
        .iter()
        .map(|&s| SpeciesScore {
            species: s,
            score: species_score(ctx, s).round() as u8,
        })
        .collect();
    let best = scores.iter().map(|s| s.score).max().unwrap_or(0);
    ScoreSet { scores, best }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// 六月正午、无云、清水、深降气压、满风面——各子分接近最大
    fn ideal_ctx(water_temp: f64) -> ScoreContext {
        ScoreContext {
            water_temp,
            turbidity: 0.0,
            pressure_trend: -10.0,
            wind_speed: 30.0,
            cloud_cover: 0.0,
            timestamp: Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_perch_near_perfect_conditions() {
        // 最适水温、满光照、清水、深降气压 → 满分
        let score = species_score(&ideal_ctx(17.0), Species::Perch);
        assert_eq!(score.round() as u8, 100);
    }

    #[test]
    fn test_carp_logistic_midpoint_exact() {
        // 温度逻辑斯蒂中点 0.5，浊度 0 → 100·0.5^0.6 = 65.97…
        let mut ctx = ideal_ctx(16.0);
        ctx.pressure_trend = 0.0; // 鲤鱼无气压子分
        let score = species_score(&ctx, Species::Carp);
        assert_eq!(score.round() as u8, 66);
    }

    #[test]
    fn test_trout_veto_above_ceiling() {
        // 其余子分全部最大，也必须得 0
        let score = species_score(&ideal_ctx(24.1), Species::Trout);
        assert_eq!(score, 0.0);
        let set = score_all(&ideal_ctx(25.0), &[Species::Trout]);
        assert_eq!(set.scores[0].score, 0);
        assert_eq!(set.best, 0);
    }

    #[test]
    fn test_trout_no_veto_at_ceiling() {
        // 恰好 24.0 不触发否决
        let score = species_score(&ideal_ctx(24.0), Species::Trout);
        assert!(score > 0.0);
    }

    #[test]
    fn test_veto_only_applies_to_trout() {
        let score = species_score(&ideal_ctx(25.0), Species::Carp);
        assert!(score > 0.0);
    }

    #[test]
    fn test_low_factor_suppresses_whole_score() {
        // 几何平均：温度与气压子分保持最大，仅把能见度因子推向
        // 零，整体分数仍被压制到四成以下
        let mut ctx = ideal_ctx(17.0);
        ctx.turbidity = 100.0;
        ctx.cloud_cover = 100.0;
        ctx.wind_speed = 0.0;
        let clear = species_score(&ideal_ctx(17.0), Species::Perch);
        let murky = species_score(&ctx, Species::Perch);
        assert!(murky < clear * 0.4);
    }

    #[test]
    fn test_rising_pressure_penalizes() {
        let mut rising = ideal_ctx(16.0);
        rising.pressure_trend = 5.0;
        for species in [Species::Zander, Species::Perch, Species::Pike] {
            let good = species_score(&ideal_ctx(16.0), species);
            let bad = species_score(&rising, species);
            assert!(bad < good, "{species}: 上升气压应降低分数");
        }
    }

    #[test]
    fn test_scores_in_range() {
        let contexts = [
            ideal_ctx(3.0),
            ideal_ctx(26.5),
            ScoreContext {
                water_temp: 12.0,
                turbidity: 100.0,
                pressure_trend: 8.0,
                wind_speed: 0.0,
                cloud_cover: 100.0,
                timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 3, 0, 0).unwrap(),
            },
        ];
        for ctx in &contexts {
            let set = score_all(ctx, &Species::ALL);
            for s in &set.scores {
                assert!(s.score <= 100);
            }
            assert_eq!(set.best, set.scores.iter().map(|s| s.score).max().unwrap());
        }
    }

    #[test]
    fn test_zander_prefers_dusk() {
        // 低光照猎手：夜间分数不低于正午
        let noon = ideal_ctx(16.0);
        let mut night = noon;
        night.timestamp = Utc.with_ymd_and_hms(2024, 6, 15, 23, 0, 0).unwrap();
        let s_noon = species_score(&noon, Species::Zander);
        let s_night = species_score(&night, Species::Zander);
        assert!(s_night >= s_noon);
    }
}
