// crates/aq_physics/src/engine/mod.rs

//! 模拟引擎：小时步进驱动器
//!
//! 引擎把四个物理模型和评分层编排成一条小时级重放流水线：
//!
//! 1. 对序列的**每个**小时推进热力、浊度与流量累积状态
//!    （冷启动收敛依赖窗口外的状态推进，不可跳过）
//! 2. 仅当小时落入输出窗口时才派生溶氧、波浪与评分并产出
//!    [`SimulationPoint`](crate::state::SimulationPoint)
//! 3. 评分经 EMA 平滑后输出，平滑状态独立于物理状态之外
//!
//! 小时步之间存在严格数据依赖，循环内部不可并行；多位置并发
//! 各持一份 [`SimulationState`](crate::state::SimulationState) 互不干扰。

pub mod driver;
pub mod flow;

pub use driver::{simulate, SimulationDriver, SimulationOutput, SCORE_EMA_ALPHA};
pub use flow::{classify_trend, daily_decay_coef, step_saturation};
