// crates/aq_workflow/src/runner.rs

//! 同步执行器
//!
//! 对单个位置执行"读缓存 → 决策 → 取数 → 模拟 → 写缓存"的完整
//! 序列。整个序列在按位置互斥锁内进行：两个并发调用者不会同时
//! 决定冷启动、再以陈旧结果互相覆盖。
//!
//! # 失败语义
//!
//! 上游取数失败对本次运行是致命的，不产出部分结果；存在缓存时
//! 回退到缓存值（`fell_back = true`），否则把错误交给调用方。

use crate::cache::{CacheEntry, CacheStore, LocationId, StoreError};
use crate::policy::{self, SyncAction};
use aq_config::{ConfigError, SyncConfig};
use aq_physics::engine::{SimulationDriver, SimulationOutput};
use aq_physics::error::SimulationError;
use aq_physics::forcing::{SanitizeStats, WeatherSeries};
use aq_physics::state::{SimulationPoint, SimulationState};
use aq_physics::types::{WaterBodyProfile, WeatherSample};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

// ============================================================
// 外部接口
// ============================================================

/// 取数时间范围（闭区间，小时分辨率）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// 起始时刻 (UTC)
    pub start: DateTime<Utc>,
    /// 结束时刻 (UTC)
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// 范围跨度的小时数
    pub fn hours(&self) -> i64 {
        (self.end - self.start).num_hours()
    }
}

/// 上游天气提供者错误
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 上游不可用（网络、配额、服务故障）
    #[error("上游天气数据不可用: {0}")]
    Unavailable(String),
}

/// 天气历史/预报提供者
///
/// 核心之外的协作者：返回 (lat, lon) 与时间范围内按时间升序的
/// 小时级样本。失败对当前运行致命，由执行器决定是否回退缓存。
pub trait WeatherProvider: Send + Sync {
    /// 取一段小时级气象序列
    fn fetch(
        &self,
        lat: f64,
        lon: f64,
        range: TimeRange,
    ) -> Result<Vec<WeatherSample>, ProviderError>;
}

impl<T: WeatherProvider + ?Sized> WeatherProvider for Arc<T> {
    fn fetch(
        &self,
        lat: f64,
        lon: f64,
        range: TimeRange,
    ) -> Result<Vec<WeatherSample>, ProviderError> {
        (**self).fetch(lat, lon, range)
    }
}

// ============================================================
// 错误与结果
// ============================================================

/// 同步错误
#[derive(Debug, Error)]
pub enum SyncError {
    /// 上游天气数据不可用
    #[error(transparent)]
    Upstream(#[from] ProviderError),

    /// 模拟失败
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// 缓存存储失败
    #[error(transparent)]
    Store(#[from] StoreError),

    /// 配置非法
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// 同步目标：一个用户位置
#[derive(Debug, Clone)]
pub struct SyncTarget {
    /// 位置ID
    pub id: LocationId,
    /// 纬度 [°]
    pub lat: f64,
    /// 经度 [°]
    pub lon: f64,
    /// 水体档案
    pub profile: WaterBodyProfile,
}

/// 一次同步的结果
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// 执行的动作
    pub action: SyncAction,
    /// 产出的时间序列（Skip 或回退时为空）
    pub points: Vec<SimulationPoint>,
    /// 是否因运行失败回退到缓存值
    pub fell_back: bool,
    /// 本次对外可见的水温 [°C]（新算值或缓存值）
    pub water_temp: Option<f64>,
    /// 摄入净化统计
    pub sanitize_stats: SanitizeStats,
}

// ============================================================
// 执行器
// ============================================================

/// 同步执行器
///
/// 持有提供者、缓存存储与配置；按位置互斥锁序列化
/// 读-决策-运行-写，写入按 `last_sync` 后写优先。
pub struct SyncRunner<P: WeatherProvider, S: CacheStore> {
    provider: P,
    store: S,
    config: SyncConfig,
    locks: Mutex<HashMap<LocationId, Arc<Mutex<()>>>>,
}

impl<P: WeatherProvider, S: CacheStore> SyncRunner<P, S> {
    /// 创建执行器，配置非法时失败
    pub fn new(provider: P, store: S, config: SyncConfig) -> Result<Self, SyncError> {
        config.validate()?;
        Ok(Self {
            provider,
            store,
            config,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// 配置
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// 取位置级互斥锁
    fn lock_for(&self, id: LocationId) -> Arc<Mutex<()>> {
        self.locks.lock().entry(id).or_default().clone()
    }

    /// 对一个位置执行一次同步
    pub fn sync(&self, target: &SyncTarget, now: DateTime<Utc>) -> Result<SyncOutcome, SyncError> {
        let location_lock = self.lock_for(target.id);
        let _guard = location_lock.lock();

        let entry = self.store.get(target.id)?;
        let action = policy::decide(now, entry.as_ref(), &self.config);
        tracing::info!(location = %target.id, action = %action, "同步决策");

        let (lookback_hours, prior) = match action {
            SyncAction::Skip => {
                return Ok(SyncOutcome {
                    action,
                    points: Vec::new(),
                    fell_back: false,
                    water_temp: entry.map(|e| e.water_temp),
                    sanitize_stats: SanitizeStats::default(),
                });
            }
            SyncAction::ColdStart => (i64::from(self.config.cold_start_days) * 24, None),
            SyncAction::Incremental { days_missing } => {
                let hours = i64::from(days_missing) * 24
                    + i64::from(self.config.incremental_margin_hours);
                // entry 此处必然存在：无缓存时策略只会返回冷启动
                let seed = entry.map(|e| SimulationState::seeded(e.water_temp));
                (hours, seed)
            }
        };

        match self.execute(target, now, lookback_hours, prior) {
            Ok(output) => {
                let water_temp = output.state.water_temp;
                if let Some(temp) = water_temp {
                    let new_entry = CacheEntry {
                        water_temp: temp,
                        last_sync: now,
                        schema_version: self.config.schema_version,
                    };
                    let written = self.store.put_if_newer(target.id, &new_entry)?;
                    if !written {
                        tracing::warn!(
                            location = %target.id,
                            "缓存已有更新的条目，本次结果按后写优先被丢弃"
                        );
                    }
                }
                tracing::info!(
                    location = %target.id,
                    points = output.points.len(),
                    substituted = output.sanitize_stats.substituted_fields,
                    "同步完成"
                );
                Ok(SyncOutcome {
                    action,
                    points: output.points,
                    fell_back: false,
                    water_temp,
                    sanitize_stats: output.sanitize_stats,
                })
            }
            Err(err) => {
                if let Some(cached) = entry {
                    tracing::warn!(
                        location = %target.id,
                        error = %err,
                        "同步失败，回退到缓存值"
                    );
                    Ok(SyncOutcome {
                        action,
                        points: Vec::new(),
                        fell_back: true,
                        water_temp: Some(cached.water_temp),
                        sanitize_stats: SanitizeStats::default(),
                    })
                } else {
                    tracing::error!(location = %target.id, error = %err, "同步失败且无缓存可回退");
                    Err(err)
                }
            }
        }
    }

    /// 取数并运行模拟
    fn execute(
        &self,
        target: &SyncTarget,
        now: DateTime<Utc>,
        lookback_hours: i64,
        prior: Option<SimulationState>,
    ) -> Result<SimulationOutput, SyncError> {
        let range = TimeRange {
            start: now - Duration::hours(lookback_hours),
            end: now + Duration::hours(i64::from(self.config.forecast_horizon_hours)),
        };
        let samples = self.provider.fetch(target.lat, target.lon, range)?;
        let series = WeatherSeries::new(samples)?;

        let window = (
            now - Duration::hours(i64::from(self.config.output_window_hours)),
            now + Duration::hours(i64::from(self.config.forecast_horizon_hours)),
        );

        let driver = SimulationDriver::new(&target.profile)?;
        let output = driver.run(&series, prior, Some(window), now)?;
        Ok(output)
    }
}
