// crates/aq_physics/src/types.rs

//! 核心类型定义
//!
//! 定义气象样本、水体形态档案和目标鱼种等领域类型。
//! 这些类型由外部服务层（天气提供者、位置存储）构造，
//! 在引擎内部不可变。

use aq_foundation::validation::{ValidationError, ValidationReport, ValidationWarning};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================
// 气象样本
// ============================================================

/// 单小时气象样本
///
/// 由外部天气提供者产生，按时间升序、每小时一条。
/// 引擎在摄入边界统一做一次净化（见 `forcing::sanitize_sample`），
/// 模型本身假定字段已净化。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// 样本时刻 (UTC)
    pub timestamp: DateTime<Utc>,
    /// 气温 [°C]
    pub air_temp: f64,
    /// 海平面气压 [hPa]
    pub pressure: f64,
    /// 风速 [km/h]
    pub wind_speed: f64,
    /// 风向 [°]
    pub wind_direction: f64,
    /// 降水量 [mm]
    pub precipitation: f64,
    /// 云量 [%]
    pub cloud_cover: f64,
    /// 天气现象代码
    pub condition_code: u16,
}

// ============================================================
// 水体形态
// ============================================================

/// 水体类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasinKind {
    /// 河流
    River,
    /// 池塘
    Pond,
    /// 中型河渠
    MediumChannel,
    /// 深水湖泊
    DeepLake,
}

impl BasinKind {
    /// 是否为流动水体
    ///
    /// 流动水体的热惯性由换水速度主导，使用固定弛豫常数。
    pub fn is_flowing(&self) -> bool {
        matches!(self, Self::River | Self::MediumChannel)
    }
}

/// 水深类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthClass {
    /// 浅水 (< 2 m)
    Shallow,
    /// 中等 (2–6 m)
    Medium,
    /// 深水 (> 6 m)
    Deep,
}

impl DepthClass {
    /// 类别的代表性平均水深 [m]
    ///
    /// 仅在档案缺少数值水深时作为回退。
    pub fn representative_depth(&self) -> f64 {
        match self {
            Self::Shallow => 1.2,
            Self::Medium => 3.5,
            Self::Deep => 12.0,
        }
    }

    /// 数值水深是否落在类别区间内
    pub fn contains(&self, depth: f64) -> bool {
        match self {
            Self::Shallow => depth < 2.0,
            Self::Medium => (2.0..=6.0).contains(&depth),
            Self::Deep => depth > 6.0,
        }
    }
}

/// 集水区土地利用类别
///
/// 决定浊度基线和入水温度偏移。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandUse {
    /// 城市
    Urban,
    /// 农业
    Agricultural,
    /// 草地
    Grassland,
    /// 森林
    Forested,
}

/// 目标鱼种
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// 梭鲈（低光照捕食者）
    Zander,
    /// 河鲈
    Perch,
    /// 白斑狗鱼
    Pike,
    /// 鲤鱼
    Carp,
    /// 欧鲅
    Chub,
    /// 褐鳟（冷水捕食者，受高温否决保护）
    Trout,
}

impl Species {
    /// 全部支持的鱼种
    pub const ALL: [Species; 6] = [
        Species::Zander,
        Species::Perch,
        Species::Pike,
        Species::Carp,
        Species::Chub,
        Species::Trout,
    ];
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Zander => "zander",
            Self::Perch => "perch",
            Self::Pike => "pike",
            Self::Carp => "carp",
            Self::Chub => "chub",
            Self::Trout => "trout",
        };
        write!(f, "{s}")
    }
}

/// 水体形态档案
///
/// 用户编辑的位置属性，决定模型的形态参数。
///
/// # 一致性约束
///
/// `depth_class` 与 `mean_depth` 必须互相一致；两者同时存在且冲突时
/// 以数值水深为准（产生验证警告）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterBodyProfile {
    /// 水体类别
    pub basin: BasinKind,
    /// 水深类别
    pub depth_class: DepthClass,
    /// 集水区土地利用
    pub land_use: LandUse,
    /// 平均水深 [m]（可选数值，存在时优先于类别）
    pub mean_depth: Option<f64>,
    /// 水面面积 [m²]
    pub surface_area: f64,
    /// 形状因子（≥1，狭长度代理，决定风区长度）
    pub shape_factor: f64,
    /// 目标鱼种
    pub species: Vec<Species>,
}

impl WaterBodyProfile {
    /// 解析有效平均水深 [m]
    ///
    /// 数值水深优先，缺失时回退到水深类别的代表值。
    pub fn effective_depth(&self) -> f64 {
        self.mean_depth
            .unwrap_or_else(|| self.depth_class.representative_depth())
    }

    /// 有效目标鱼种
    ///
    /// 空列表回退到全部鱼种。
    pub fn effective_species(&self) -> Vec<Species> {
        if self.species.is_empty() {
            Species::ALL.to_vec()
        } else {
            self.species.clone()
        }
    }

    /// 验证档案
    ///
    /// 错误（面积/形状因子/水深非法）表示模拟不允许启动；
    /// 警告（类别与数值水深不一致、空鱼种列表）按文档化规则解决后继续。
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        if !self.surface_area.is_finite() || self.surface_area <= 0.0 {
            report.add_error(ValidationError::OutOfRange {
                field: "surface_area",
                value: self.surface_area,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            });
        }

        if !self.shape_factor.is_finite() || self.shape_factor < 1.0 {
            report.add_error(ValidationError::OutOfRange {
                field: "shape_factor",
                value: self.shape_factor,
                min: 1.0,
                max: f64::MAX,
            });
        }

        if let Some(depth) = self.mean_depth {
            if !depth.is_finite() || depth <= 0.0 {
                report.add_error(ValidationError::OutOfRange {
                    field: "mean_depth",
                    value: depth,
                    min: f64::MIN_POSITIVE,
                    max: f64::MAX,
                });
            } else if !self.depth_class.contains(depth) {
                report.add_warning(ValidationWarning::Inconsistent {
                    field: "mean_depth",
                    message: format!(
                        "数值水深 {depth} m 与类别 {:?} 不符，以数值为准",
                        self.depth_class
                    ),
                });
            }
        }

        if self.species.is_empty() {
            report.add_warning(ValidationWarning::Suspicious {
                field: "species",
                message: "目标鱼种为空，回退到全部鱼种".into(),
            });
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn river_profile() -> WaterBodyProfile {
        WaterBodyProfile {
            basin: BasinKind::River,
            depth_class: DepthClass::Medium,
            land_use: LandUse::Grassland,
            mean_depth: Some(2.5),
            surface_area: 50_000.0,
            shape_factor: 3.0,
            species: vec![Species::Chub, Species::Trout],
        }
    }

    #[test]
    fn test_valid_profile() {
        let report = river_profile().validate();
        assert!(report.is_valid());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_effective_depth_prefers_numeric() {
        let mut p = river_profile();
        assert!((p.effective_depth() - 2.5).abs() < 1e-10);
        p.mean_depth = None;
        assert!((p.effective_depth() - 3.5).abs() < 1e-10);
    }

    #[test]
    fn test_depth_mismatch_is_warning() {
        let mut p = river_profile();
        p.mean_depth = Some(10.0); // Medium 类别但数值为深水
        let report = p.validate();
        assert!(report.is_valid());
        assert!(report.has_warnings());
    }

    #[test]
    fn test_invalid_area_is_error() {
        let mut p = river_profile();
        p.surface_area = 0.0;
        assert!(!p.validate().is_valid());
    }

    #[test]
    fn test_shape_factor_below_one_is_error() {
        let mut p = river_profile();
        p.shape_factor = 0.5;
        assert!(!p.validate().is_valid());
    }

    #[test]
    fn test_empty_species_falls_back_to_all() {
        let mut p = river_profile();
        p.species.clear();
        assert!(p.validate().is_valid());
        assert_eq!(p.effective_species().len(), Species::ALL.len());
    }

    #[test]
    fn test_flowing_basins() {
        assert!(BasinKind::River.is_flowing());
        assert!(BasinKind::MediumChannel.is_flowing());
        assert!(!BasinKind::Pond.is_flowing());
        assert!(!BasinKind::DeepLake.is_flowing());
    }

    #[test]
    fn test_profile_serde_roundtrip() {
        let p = river_profile();
        let json = serde_json::to_string(&p).unwrap();
        let back: WaterBodyProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
