// crates/aq_physics/src/lib.rs

//! AquaTwin 物理层
//!
//! 以小时级气象序列为唯一驱动，模拟水体物理状态并派生按鱼种
//! 的活性评分。无任何水下传感器：这是一个低阶、标定化的数字
//! 孪生，目标是定性的垂钓指导而非科学级精度。
//!
//! # 模块概览
//!
//! - [`types`]: 气象样本、水体档案、鱼种等领域类型
//! - [`forcing`]: 有序气象序列、净化与气压趋势回看
//! - [`models`]: 热力 / 浊度 / 溶氧 / 波浪四个物理模型
//! - [`bio`]: 光照估计与按鱼种的几何平均评分
//! - [`state`]: 跨步携带状态与输出点
//! - [`engine`]: 小时步进驱动器（冷启动 / 窗口 / EMA 平滑）
//! - [`error`]: 模拟运行错误
//!
//! # 关键不变量
//!
//! - 水温 ∈ [3, 26.5] °C，浊度 ∈ [0, 100] NTU，评分 ∈ [0, 100]
//! - 同一输入的两次运行输出完全一致（纯函数）
//! - 热力模型序列应用与逐条单步应用严格等价
//!
//! # 使用示例
//!
//! ```ignore
//! use aq_physics::engine::simulate;
//! use aq_physics::forcing::WeatherSeries;
//!
//! let series = WeatherSeries::new(samples)?;
//! let output = simulate(&profile, &series, None, now)?;
//! for point in &output.points {
//!     println!("{}: {} °C, best {}", point.timestamp, point.water_temp, point.scores.best);
//! }
//! ```

#![warn(clippy::all)]

pub mod bio;
pub mod engine;
pub mod error;
pub mod forcing;
pub mod models;
pub mod state;
pub mod types;

// 重导出常用类型
pub use bio::{illumination, score_all, species_score, ScoreContext, ScoreSet, SpeciesScore};
pub use engine::{simulate, SimulationDriver, SimulationOutput, SCORE_EMA_ALPHA};
pub use error::{SimResult, SimulationError};
pub use forcing::{SanitizeStats, SeriesCursor, WeatherSeries};
pub use models::{dissolved_oxygen, wave_height_cm, ThermalModel, TurbidityModel};
pub use state::{FlowTrend, SimulationPoint, SimulationState};
pub use types::{BasinKind, DepthClass, LandUse, Species, WaterBodyProfile, WeatherSample};
