// crates/aq_physics/src/models/mod.rs

//! 物理模型模块
//!
//! 提供水体状态的四个低阶模型：
//! - 热力模型 (thermal) — 气温→水温弛豫，带形态惯性
//! - 浊度模型 (turbidity) — 向基线沉降衰减，降雨注入
//! - 溶氧模型 (oxygen) — 温度/气压的闭式饱和函数，无状态
//! - 波浪模型 (wave) — 风速与风区长度的闭式函数，无状态
//!
//! # 设计
//!
//! 有状态模型（thermal、turbidity）以"单条记录一步"的纯函数形式
//! 暴露，状态由调用方显式携带；序列重放等价于逐条单步应用，
//! 这是冷启动收敛正确性的前提。

pub mod oxygen;
pub mod thermal;
pub mod turbidity;
pub mod wave;

pub use oxygen::dissolved_oxygen;
pub use thermal::ThermalModel;
pub use turbidity::TurbidityModel;
pub use wave::wave_height_cm;
