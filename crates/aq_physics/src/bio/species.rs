// crates/aq_physics/src/bio/species.rs

//! 鱼种响应曲线参数表
//!
//! 每个鱼种由 2–3 条归一化响应曲线（温度偏好、气压趋势耐受、
//! 能见度偏好）加上各自的权重组成，权重之和为 1。参数是标定
//! 数据而非结构：曲线形式（高斯、逻辑斯蒂、指数）与指数值被
//! 测试钉住，不允许改动。
//!
//! 曲线以带参枚举表达，编译期穷举保证每个鱼种的参数完整。

use crate::types::Species;

/// 褐鳟高温否决上限 [°C]
///
/// 水温严格高于此值时褐鳟得分强制为 0（高温下的应激与
/// 放流存活率问题），在通用公式之前检查。
pub const TROUT_TEMP_CEILING: f64 = 24.0;

/// 温度偏好曲线
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TempCurve {
    /// 高斯偏好：`exp(−(T−opt)²/(2σ²))`
    Gaussian {
        /// 最适水温 [°C]
        opt: f64,
        /// 宽容度 σ [°C]
        sigma: f64,
    },
    /// 逻辑斯蒂偏好（喜暖种）：`1/(1+exp(−k·(T−mid)))`
    Logistic {
        /// 半饱和水温 [°C]
        mid: f64,
        /// 陡度 k
        k: f64,
    },
}

impl TempCurve {
    /// 求值 (0–1)
    pub fn eval(&self, water_temp: f64) -> f64 {
        match *self {
            Self::Gaussian { opt, sigma } => {
                let d = water_temp - opt;
                (-(d * d) / (2.0 * sigma * sigma)).exp()
            }
            Self::Logistic { mid, k } => 1.0 / (1.0 + (-k * (water_temp - mid)).exp()),
        }
    }
}

/// 气压趋势耐受曲线
///
/// 逻辑斯蒂，普遍惩罚上升气压：`1/(1+exp(k·(Δp − mid)))`。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureCurve {
    /// 半衰中点 [hPa/6h]
    pub mid: f64,
    /// 陡度 k
    pub k: f64,
}

impl PressureCurve {
    /// 求值 (0–1)
    pub fn eval(&self, pressure_trend: f64) -> f64 {
        1.0 / (1.0 + (self.k * (pressure_trend - self.mid)).exp())
    }
}

/// 能见度/浊度偏好曲线
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisibilityCurve {
    /// 光照-清澈度混合（视觉捕食者）
    ///
    /// `base = w·illum + (1−w)·clarity`；`inverted` 的低光照猎手
    /// 取 `1 − base`；`wind_sensitive` 时乘以波纹掩蔽因子
    /// `0.4 + 0.6·wind_factor`。结果有 0.05 下限。
    LightBlend {
        /// 光照权重 w
        light_weight: f64,
        /// 是否偏好低光照
        inverted: bool,
        /// 是否受风面波纹影响
        wind_sensitive: bool,
    },
    /// 浊度指数衰减：`exp(−turbidity/tau)`
    TurbidityDecay {
        /// 衰减尺度 [NTU]
        tau: f64,
    },
}

/// 能见度子分下限（几何平均下防止整体分数被完全湮灭）
const VISIBILITY_FLOOR: f64 = 0.05;

impl VisibilityCurve {
    /// 求值 (0–1)
    ///
    /// # 参数
    ///
    /// - `illum`: 光照估计 (0–1)
    /// - `turbidity`: 浊度 [NTU]
    /// - `wind_factor`: 风面因子 (0.2–1.0)
    pub fn eval(&self, illum: f64, turbidity: f64, wind_factor: f64) -> f64 {
        match *self {
            Self::LightBlend {
                light_weight,
                inverted,
                wind_sensitive,
            } => {
                let clarity = 1.0 - (turbidity / 100.0).clamp(0.0, 1.0);
                let mut base = light_weight * illum + (1.0 - light_weight) * clarity;
                if inverted {
                    base = 1.0 - base;
                }
                if wind_sensitive {
                    base *= 0.4 + 0.6 * wind_factor;
                }
                base.max(VISIBILITY_FLOOR)
            }
            Self::TurbidityDecay { tau } => (-turbidity / tau).exp(),
        }
    }
}

/// 单个鱼种的完整曲线集
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesCurve {
    /// 温度曲线与权重
    pub temp: (TempCurve, f64),
    /// 气压趋势曲线与权重（部分鱼种对气压不敏感）
    pub pressure: Option<(PressureCurve, f64)>,
    /// 能见度曲线与权重
    pub visibility: (VisibilityCurve, f64),
}

impl SpeciesCurve {
    /// 权重之和（应为 1，由测试钉住）
    pub fn weight_sum(&self) -> f64 {
        self.temp.1 + self.pressure.map_or(0.0, |(_, w)| w) + self.visibility.1
    }
}

/// 鱼种的标定曲线
pub fn curve_for(species: Species) -> SpeciesCurve {
    match species {
        // 梭鲈：低光照伏击猎手，黄昏与浑水占优
        Species::Zander => SpeciesCurve {
            temp: (TempCurve::Gaussian { opt: 16.0, sigma: 5.0 }, 0.35),
            pressure: Some((PressureCurve { mid: 0.5, k: 1.2 }, 0.25)),
            visibility: (
                VisibilityCurve::LightBlend {
                    light_weight: 0.6,
                    inverted: true,
                    wind_sensitive: true,
                },
                0.40,
            ),
        },
        // 河鲈：白昼视觉猎手，清水与波纹掩蔽下活跃
        Species::Perch => SpeciesCurve {
            temp: (TempCurve::Gaussian { opt: 17.0, sigma: 6.0 }, 0.30),
            pressure: Some((PressureCurve { mid: 1.0, k: 0.9 }, 0.20)),
            visibility: (
                VisibilityCurve::LightBlend {
                    light_weight: 0.55,
                    inverted: false,
                    wind_sensitive: true,
                },
                0.50,
            ),
        },
        // 白斑狗鱼：冷凉水伏击者，温度权重最高
        Species::Pike => SpeciesCurve {
            temp: (TempCurve::Gaussian { opt: 12.0, sigma: 6.0 }, 0.40),
            pressure: Some((PressureCurve { mid: 0.5, k: 1.0 }, 0.30)),
            visibility: (
                VisibilityCurve::LightBlend {
                    light_weight: 0.45,
                    inverted: false,
                    wind_sensitive: true,
                },
                0.30,
            ),
        },
        // 鲤鱼：喜暖底栖，对气压不敏感，耐浊
        Species::Carp => SpeciesCurve {
            temp: (TempCurve::Logistic { mid: 16.0, k: 0.45 }, 0.60),
            pressure: None,
            visibility: (VisibilityCurve::TurbidityDecay { tau: 60.0 }, 0.40),
        },
        // 欧鲅：流水泛食者
        Species::Chub => SpeciesCurve {
            temp: (TempCurve::Gaussian { opt: 15.0, sigma: 7.0 }, 0.40),
            pressure: Some((PressureCurve { mid: 1.2, k: 0.7 }, 0.20)),
            visibility: (VisibilityCurve::TurbidityDecay { tau: 45.0 }, 0.40),
        },
        // 褐鳟：冷水种，清水依赖，另受高温硬否决保护
        Species::Trout => SpeciesCurve {
            temp: (TempCurve::Gaussian { opt: 10.0, sigma: 4.5 }, 0.45),
            pressure: Some((PressureCurve { mid: 0.8, k: 1.0 }, 0.25)),
            visibility: (VisibilityCurve::TurbidityDecay { tau: 25.0 }, 0.30),
        },
    }
}
