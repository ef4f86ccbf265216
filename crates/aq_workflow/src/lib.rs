// crates/aq_workflow/src/lib.rs

//! AquaTwin 工作流层
//!
//! 在模拟引擎之外做三件事：
//! - 决定一次同步应该冷启动、增量重放还是直接用缓存 ([`policy`])
//! - 持久化每个位置的最小状态快照 ([`cache`])
//! - 按位置串行地执行"读-决策-运行-写"并在失败时回退缓存 ([`runner`])
//!
//! # 并发模型
//!
//! 单个位置的模拟是严格串行的（小时步之间有数据依赖）；不同
//! 位置相互独立，可以并发同步。缓存条目的读-改-写以按位置互斥
//! 锁保护，写入额外按 `last_sync` 时间戳做后写优先，防止并发
//! 冷启动用陈旧结果覆盖新结果。

#![warn(clippy::all)]

pub mod cache;
pub mod policy;
pub mod runner;

pub use cache::{CacheEntry, CacheStore, FileCacheStore, LocationId, MemoryCacheStore, StoreError};
pub use policy::{decide, SyncAction};
pub use runner::{
    ProviderError, SyncError, SyncOutcome, SyncRunner, SyncTarget, TimeRange, WeatherProvider,
};
