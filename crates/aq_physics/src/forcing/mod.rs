// crates/aq_physics/src/forcing/mod.rs

//! 气象驱动模块
//!
//! 提供驱动模拟的小时级气象序列：
//! - 有序序列容器与校验 (WeatherSeries)
//! - 顺序扫描游标 (SeriesCursor)
//! - 气压趋势回看
//! - 摄入边界的样本净化
//!
//! # 设计思路
//!
//! 序列在构造时一次性校验（非空、严格递增），此后只读。
//! 单条样本的字段缺陷在摄入时按文档化默认值替换并记录，
//! 不会中断整段序列的重放。

pub mod series;

pub use series::{
    sanitize_sample, SanitizeStats, SeriesCursor, WeatherSeries, PRESSURE_TREND_LOOKBACK_HOURS,
};
