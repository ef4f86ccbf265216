// crates/aq_physics/src/bio/mod.rs

//! 鱼类活性评分模块
//!
//! 把模拟出的水体状态与当前气象组合成 0–100 的按鱼种活性分：
//! - 光照估计 (light) — 月份日出日落表 + 正弦高度角 + 云量衰减
//! - 鱼种响应曲线 (species) — 每个鱼种的标定参数表
//! - 评分组合 (score) — 加权几何平均（限制因子式 AND 组合）
//!
//! # 组合语义
//!
//! 子分按加权几何平均相乘，任何一个接近零的因子会压制整体
//! 分数——这是刻意的非线性 AND，不是算术平均。冷水鱼种另有
//! 高温硬否决，在通用公式之前检查。

pub mod light;
pub mod score;
pub mod species;

pub use light::{illumination, wind_factor};
pub use score::{score_all, species_score, ScoreContext, ScoreSet, SpeciesScore};
pub use species::{
    PressureCurve, SpeciesCurve, TempCurve, VisibilityCurve, TROUT_TEMP_CEILING,
};
