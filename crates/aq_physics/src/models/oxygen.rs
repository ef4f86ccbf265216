// crates/aq_physics/src/models/oxygen.rs

//! 溶氧模型：温度与气压的闭式饱和函数
//!
//! 1 个大气压下饱和溶氧浓度对水温的三次多项式拟合
//! （0–30 °C 标定域），再按当前气压与标准气压之比线性缩放：
//!
//! ```text
//! DO(T, p) = (14.652 − 0.41022·T + 0.0079910·T² − 0.000077774·T³) · p/1013.25
//! ```
//!
//! 多项式在标定域内自然有界，不做额外夹断。

/// 标准海平面气压 [hPa]
pub const STANDARD_PRESSURE_HPA: f64 = 1013.25;

/// 饱和多项式系数（1 atm）
const C0: f64 = 14.652;
const C1: f64 = -0.41022;
const C2: f64 = 0.0079910;
const C3: f64 = -0.000077774;

/// 饱和溶氧浓度 [mg/L]
///
/// # 参数
///
/// - `water_temp`: 水温 [°C]，标定域 0–30 °C
/// - `pressure`: 气压 [hPa]
#[inline]
pub fn dissolved_oxygen(water_temp: f64, pressure: f64) -> f64 {
    let t = water_temp;
    let at_one_atm = C0 + C1 * t + C2 * t * t + C3 * t * t * t;
    at_one_atm * (pressure / STANDARD_PRESSURE_HPA)
}
