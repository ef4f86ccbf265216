// crates/aq_physics/src/state.rs

//! 模拟状态与输出点
//!
//! `SimulationState` 是跨小时步携带的全部状态，作为不可变值
//! 显式传入/传出每一步，没有隐式共享；一次冷启动从
//! [`SimulationState::cold`] 出发。`SimulationPoint` 是对外时间
//! 序列中的一个小时，产出后不可变。

use crate::bio::ScoreSet;
use crate::types::Species;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 流量趋势标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowTrend {
    /// 上升
    Rising,
    /// 下降
    Falling,
    /// 平稳
    Stable,
}

impl std::fmt::Display for FlowTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
            Self::Stable => "stable",
        };
        write!(f, "{s}")
    }
}

/// 跨步携带的模拟状态
///
/// 一个位置的一次运行独占一份状态；两次并发运行不得共享。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationState {
    /// 当前水温 [°C]（首步前为 None，按月份气候基线播种）
    pub water_temp: Option<f64>,
    /// 当前浊度 [NTU]（首步前为 None，从土地利用基线出发）
    pub turbidity: Option<f64>,
    /// 土壤饱和度累积量（无量纲，暴雨径流代理）
    pub soil_saturation: f64,
    /// 上一步流量强度（用于趋势差分）
    pub prev_flow_intensity: Option<f64>,
    /// 各鱼种的 EMA 平滑记忆
    pub score_memory: Vec<(Species, f64)>,
}

impl SimulationState {
    /// 冷启动初始状态（全部未定义/默认）
    pub fn cold() -> Self {
        Self::default()
    }

    /// 从缓存的水温播种（增量同步）
    ///
    /// 只有水温跨运行持久化；浊度和流量累积量的时间常数短，
    /// 从基线重放足以收敛。
    pub fn seeded(water_temp: f64) -> Self {
        Self {
            water_temp: Some(water_temp),
            ..Self::default()
        }
    }

    /// 读取某鱼种的平滑记忆
    pub fn memory_for(&self, species: Species) -> Option<f64> {
        self.score_memory
            .iter()
            .find(|(s, _)| *s == species)
            .map(|(_, v)| *v)
    }

    /// 写入某鱼种的平滑记忆
    pub fn remember(&mut self, species: Species, value: f64) {
        if let Some(slot) = self.score_memory.iter_mut().find(|(s, _)| *s == species) {
            slot.1 = value;
        } else {
            self.score_memory.push((species, value));
        }
    }
}

/// 对外时间序列中的一个小时
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationPoint {
    /// 时刻 (UTC)
    pub timestamp: DateTime<Utc>,
    /// 是否为预报小时（时刻晚于运行时的 now）
    pub is_forecast: bool,
    /// 水温 [°C]
    pub water_temp: f64,
    /// 浊度 [NTU]
    pub turbidity: f64,
    /// 饱和溶氧 [mg/L]
    pub dissolved_oxygen: f64,
    /// 有效波高 [cm]
    pub wave_height_cm: f64,
    /// 回显：气温 [°C]
    pub air_temp: f64,
    /// 回显：气压 [hPa]
    pub pressure: f64,
    /// 回显：风速 [km/h]
    pub wind_speed: f64,
    /// 回显：降水 [mm]
    pub precipitation: f64,
    /// 回显：云量 [%]
    pub cloud_cover: f64,
    /// 回显：天气现象代码
    pub condition_code: u16,
    /// 平滑后的各鱼种评分
    pub scores: ScoreSet,
    /// 流量强度（土壤饱和度代理）
    pub flow_intensity: f64,
    /// 流量趋势
    pub flow_trend: FlowTrend,
}
