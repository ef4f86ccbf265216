// crates/aq_physics/src/forcing/series.rs

//! 气象序列与样本净化
//!
//! # 约束
//!
//! - 时间戳严格单调递增，标称间隔 1 小时
//! - 间隔偏离标称值时记录警告但不中断（模型按"每条记录一步"推进）
//!
//! # 使用示例
//!
//! ```ignore
//! use aq_physics::forcing::WeatherSeries;
//!
//! let series = WeatherSeries::new(samples)?;
//! let trend = series.pressure_trend_at(12); // 第 12 条样本处的 6 小时气压趋势
//! ```

use crate::error::SimulationError;
use crate::types::WeatherSample;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ============================================================
// 常量
// ============================================================

/// 气压趋势的回看窗口 [h]
pub const PRESSURE_TREND_LOOKBACK_HOURS: usize = 6;

/// 容忍的最大采样间隔 [h]，超出时记录警告
const MAX_TOLERATED_GAP_HOURS: i64 = 3;

/// 净化默认值：气温 [°C]
const DEFAULT_AIR_TEMP: f64 = 10.0;

/// 净化默认值：气压 [hPa]
const DEFAULT_PRESSURE: f64 = 1013.25;

/// 净化默认值：风速 [km/h]
const DEFAULT_WIND_SPEED: f64 = 5.0;

/// 净化默认值：云量 [%]
const DEFAULT_CLOUD_COVER: f64 = 50.0;

// ============================================================
// 样本净化
// ============================================================

/// 净化统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeStats {
    /// 被替换的字段总数
    pub substituted_fields: usize,
    /// 至少有一个字段被替换的样本数
    pub affected_samples: usize,
}

impl SanitizeStats {
    /// 合并单个样本的替换计数
    fn absorb(&mut self, substitutions: usize) {
        if substitutions > 0 {
            self.substituted_fields += substitutions;
            self.affected_samples += 1;
        }
    }
}

/// 净化单条样本
///
/// 非有限字段替换为文档化默认值，物理上不可能的值（负降水、
/// 越界云量）夹入合法区间。返回净化后的样本和替换字段数。
/// 单条坏样本不应使 45 天的收敛重放作废，因此这里从不报错。
pub fn sanitize_sample(sample: &WeatherSample) -> (WeatherSample, usize) {
    let mut out = *sample;
    let mut substitutions = 0usize;

    if !out.air_temp.is_finite() {
        tracing::warn!(ts = %out.timestamp, "气温非有限值，替换为 {DEFAULT_AIR_TEMP} °C");
        out.air_temp = DEFAULT_AIR_TEMP;
        substitutions += 1;
    }
    if !out.pressure.is_finite() {
        tracing::warn!(ts = %out.timestamp, "气压非有限值，替换为 {DEFAULT_PRESSURE} hPa");
        out.pressure = DEFAULT_PRESSURE;
        substitutions += 1;
    }
    if !out.wind_speed.is_finite() {
        tracing::warn!(ts = %out.timestamp, "风速非有限值，替换为 {DEFAULT_WIND_SPEED} km/h");
        out.wind_speed = DEFAULT_WIND_SPEED;
        substitutions += 1;
    } else if out.wind_speed < 0.0 {
        out.wind_speed = 0.0;
        substitutions += 1;
    }
    if !out.precipitation.is_finite() || out.precipitation < 0.0 {
        if !out.precipitation.is_finite() {
            tracing::warn!(ts = %out.timestamp, "降水非有限值，替换为 0 mm");
        }
        out.precipitation = 0.0;
        substitutions += 1;
    }
    if !out.cloud_cover.is_finite() {
        tracing::warn!(ts = %out.timestamp, "云量非有限值，替换为 {DEFAULT_CLOUD_COVER} %");
        out.cloud_cover = DEFAULT_CLOUD_COVER;
        substitutions += 1;
    } else if !(0.0..=100.0).contains(&out.cloud_cover) {
        out.cloud_cover = out.cloud_cover.clamp(0.0, 100.0);
        substitutions += 1;
    }
    if !out.wind_direction.is_finite() {
        out.wind_direction = 0.0;
        substitutions += 1;
    }

    (out, substitutions)
}

// ============================================================
// 序列
// ============================================================

/// 顺序扫描游标
///
/// 由调用方持有，加速对同一序列的连续时间查询。
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesCursor {
    /// 上次命中的样本下标
    pub last_index: usize,
}

impl SeriesCursor {
    /// 创建新的游标
    pub fn new() -> Self {
        Self::default()
    }
}

/// 有序小时级气象序列
///
/// 构造时一次性净化全部样本并校验时间轴；此后只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSeries {
    /// 净化后的样本（时间严格递增）
    samples: Vec<WeatherSample>,
    /// 构造期净化统计
    sanitize_stats: SanitizeStats,
}

impl WeatherSeries {
    /// 从原始样本构造序列
    ///
    /// # 错误
    ///
    /// - [`SimulationError::EmptySeries`]: 输入为空
    /// - [`SimulationError::NonChronologicalSeries`]: 时间非严格递增
    pub fn new(raw: Vec<WeatherSample>) -> Result<Self, SimulationError> {
        if raw.is_empty() {
            return Err(SimulationError::EmptySeries);
        }

        let mut stats = SanitizeStats::default();
        let mut samples = Vec::with_capacity(raw.len());
        for sample in &raw {
            let (clean, substitutions) = sanitize_sample(sample);
            stats.absorb(substitutions);
            samples.push(clean);
        }

        for i in 1..samples.len() {
            let gap = samples[i].timestamp - samples[i - 1].timestamp;
            if gap <= Duration::zero() {
                return Err(SimulationError::NonChronologicalSeries { index: i });
            }
            if gap > Duration::hours(MAX_TOLERATED_GAP_HOURS) {
                tracing::warn!(
                    ts = %samples[i].timestamp,
                    gap_hours = gap.num_hours(),
                    "气象序列存在超过 {MAX_TOLERATED_GAP_HOURS} 小时的缺口"
                );
            }
        }

        Ok(Self {
            samples,
            sanitize_stats: stats,
        })
    }

    /// 样本数量
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// 是否为空（构造成功后恒为 false，保留以符合惯例）
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 序列时间范围
    pub fn span(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            self.samples[0].timestamp,
            self.samples[self.samples.len() - 1].timestamp,
        )
    }

    /// 样本切片
    pub fn samples(&self) -> &[WeatherSample] {
        &self.samples
    }

    /// 构造期净化统计
    pub fn sanitize_stats(&self) -> SanitizeStats {
        self.sanitize_stats
    }

    /// 按时间查找样本（二分，返回时间 ≤ t 的最后一条）
    pub fn sample_at(&self, t: DateTime<Utc>) -> Option<&WeatherSample> {
        match self.samples.binary_search_by_key(&t, |s| s.timestamp) {
            Ok(idx) => Some(&self.samples[idx]),
            Err(0) => None,
            Err(idx) => Some(&self.samples[idx - 1]),
        }
    }

    /// 按时间查找样本（带游标版本，推荐用于顺序扫描）
    pub fn sample_at_with_cursor(
        &self,
        t: DateTime<Utc>,
        cursor: &mut SeriesCursor,
    ) -> Option<&WeatherSample> {
        let n = self.samples.len();
        let mut idx = cursor.last_index.min(n - 1);
        if self.samples[idx].timestamp > t {
            idx = 0;
        }
        if self.samples[idx].timestamp > t {
            return None;
        }
        while idx + 1 < n && self.samples[idx + 1].timestamp <= t {
            idx += 1;
        }
        cursor.last_index = idx;
        Some(&self.samples[idx])
    }

    /// 指定下标处的气压趋势 [hPa]
    ///
    /// 当前样本气压减去回看窗口（6 小时）前的气压，窗口在序列
    /// 起点处截断。正值表示气压上升。
    pub fn pressure_trend_at(&self, index: usize) -> f64 {
        let index = index.min(self.samples.len() - 1);
        let lookback = index.saturating_sub(PRESSURE_TREND_LOOKBACK_HOURS);
        self.samples[index].pressure - self.samples[lookback].pressure
    }
}
