// crates/aq_physics/src/bio/light.rs

//! 光照与风面因子
//!
//! 光照 (0–1) 由太阳高度角近似导出：月份日出日落表给出昼长，
//! 昼内高度角按正弦插值，再按云量做二次衰减：
//!
//! ```text
//! illum = sin(π·(h − rise)/(set − rise)) · (1 − 0.75·(cloud/100)²)
//! ```
//!
//! 风面因子 (0.2–1.0) 随风速线性上升、30 km/h 封顶——水面波纹
//! 掩蔽捕食者并搅动饵料，对摄食整体有利。

use chrono::{DateTime, Datelike, Timelike, Utc};

/// 月份日出/日落时刻表 [h, UTC]（1–12 月，中纬度）
const SUN_TABLE: [(f64, f64); 12] = [
    (8.0, 16.5),
    (7.5, 17.5),
    (6.5, 18.5),
    (5.5, 19.5),
    (4.5, 20.5),
    (4.0, 21.0),
    (4.5, 21.0),
    (5.5, 20.0),
    (6.5, 19.0),
    (7.5, 17.5),
    (8.0, 16.5),
    (8.5, 16.0),
];

/// 风面因子的风速上限 [km/h]
const WIND_CAP_KMH: f64 = 30.0;

/// 风面因子下限
const WIND_FACTOR_FLOOR: f64 = 0.2;

/// 指定月份的日出/日落时刻 [h]
pub fn sun_hours(month: u32) -> (f64, f64) {
    SUN_TABLE[(month.clamp(1, 12) - 1) as usize]
}

/// 光照估计 (0–1)
///
/// 昼外恒为 0；昼内为正弦高度角乘以云量二次衰减。
pub fn illumination(timestamp: DateTime<Utc>, cloud_cover: f64) -> f64 {
    let (rise, set) = sun_hours(timestamp.month());
    let hour = timestamp.hour() as f64 + timestamp.minute() as f64 / 60.0;

    if hour < rise || hour > set {
        return 0.0;
    }

    let elevation = (std::f64::consts::PI * (hour - rise) / (set - rise)).sin();
    let cloud = (cloud_cover / 100.0).clamp(0.0, 1.0);
    elevation * (1.0 - 0.75 * cloud * cloud)
}

/// 风面因子 (0.2–1.0)
pub fn wind_factor(wind_speed_kmh: f64) -> f64 {
    (WIND_FACTOR_FLOOR + 0.8 * wind_speed_kmh / WIND_CAP_KMH).clamp(WIND_FACTOR_FLOOR, 1.0)
}
