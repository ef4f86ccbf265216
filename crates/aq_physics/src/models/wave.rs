// crates/aq_physics/src/models/wave.rs

//! 波浪模型：风速与水体几何的闭式有效波高
//!
//! 简化的浅水风浪生长公式：有效风区长度取
//! `sqrt(surface_area)·shape_factor`，波高按
//! `COEF · U[m/s] · sqrt(fetch/g)` 估算并以厘米输出。
//!
//! 低于风速阈值时返回固定的微扰残余值而不是零——静风下
//! 水面仍有持续的微湍动。

/// 风速阈值 [km/h]，低于此值按残余微扰处理
pub const WIND_FLOOR_KMH: f64 = 5.0;

/// 残余微扰波高 [cm]
pub const RESIDUAL_CHOP_CM: f64 = 1.2;

/// 重力加速度 [m/s²]
const GRAVITY: f64 = 9.81;

/// 波高生长系数（标定值，输出量纲为厘米）
const GROWTH_COEF: f64 = 0.75;

/// 有效波高 [cm]
///
/// # 参数
///
/// - `wind_speed_kmh`: 风速 [km/h]
/// - `surface_area`: 水面面积 [m²]
/// - `shape_factor`: 形状因子（≥1，狭长度代理）
#[inline]
pub fn wave_height_cm(wind_speed_kmh: f64, surface_area: f64, shape_factor: f64) -> f64 {
    if wind_speed_kmh < WIND_FLOOR_KMH {
        return RESIDUAL_CHOP_CM;
    }
    let wind_ms = wind_speed_kmh / 3.6;
    let fetch = surface_area.sqrt() * shape_factor;
    GROWTH_COEF * wind_ms * (fetch / GRAVITY).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_floor_returns_residual() {
        assert!((wave_height_cm(0.0, 10_000.0, 1.5) - RESIDUAL_CHOP_CM).abs() < 1e-10);
        assert!((wave_height_cm(4.9, 10_000.0, 1.5) - RESIDUAL_CHOP_CM).abs() < 1e-10);
    }

    #[test]
    fn test_growth_with_wind() {
        let calm = wave_height_cm(6.0, 10_000.0, 1.5);
        let windy = wave_height_cm(30.0, 10_000.0, 1.5);
        assert!(windy > calm);
    }

    #[test]
    fn test_growth_with_fetch() {
        let small = wave_height_cm(20.0, 5_000.0, 1.0);
        let large = wave_height_cm(20.0, 500_000.0, 2.0);
        assert!(large > small);
    }

    #[test]
    fn test_exact_formula() {
        let wind_ms = 18.0 / 3.6;
        let fetch = (40_000.0f64).sqrt() * 2.0;
        let expected = 0.75 * wind_ms * (fetch / 9.81).sqrt();
        assert!((wave_height_cm(18.0, 40_000.0, 2.0) - expected).abs() < 1e-10);
    }
}
