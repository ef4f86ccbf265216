// crates/aq_workflow/src/cache.rs

//! 缓存存储模块
//!
//! 提供位置级状态快照的持久化抽象和实现。
//!
//! 每个位置只持久化最小快照：最近一次计算的水温、同步时刻与
//! 模式版本。浊度与流量累积量时间常数短，增量重放自行收敛，
//! 不值得持久化。
//!
//! 写入语义：[`CacheStore::put_if_newer`] 按 `last_sync` 时间戳
//! 后写优先——并发同步者各自完成后，较新的结果存活。

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// 位置ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(Uuid);

impl LocationId {
    /// 创建新的位置ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 从UUID创建
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 获取内部UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LocationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// 位置级缓存条目
///
/// 生命周期：首次成功模拟后创建，每次同步前读取、成功后覆盖，
/// 模式版本变更时整体作废。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// 最近一次计算的水温 [°C]
    pub water_temp: f64,
    /// 最近一次成功同步的时刻 (UTC)
    pub last_sync: DateTime<Utc>,
    /// 写入时的缓存模式版本
    pub schema_version: u32,
}

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 其他错误
    #[error("{0}")]
    Other(String),
}

/// 缓存存储后端trait
pub trait CacheStore: Send + Sync {
    /// 读取条目
    fn get(&self, id: LocationId) -> Result<Option<CacheEntry>, StoreError>;

    /// 写入条目（无条件覆盖）
    fn put(&self, id: LocationId, entry: &CacheEntry) -> Result<(), StoreError>;

    /// 删除条目
    fn remove(&self, id: LocationId) -> Result<(), StoreError>;

    /// 条目是否存在
    fn contains(&self, id: LocationId) -> Result<bool, StoreError> {
        Ok(self.get(id)?.is_some())
    }

    /// 后写优先写入
    ///
    /// 仅当不存在条目、或新条目的 `last_sync` 不早于现有条目时
    /// 写入。返回是否实际写入。
    fn put_if_newer(&self, id: LocationId, entry: &CacheEntry) -> Result<bool, StoreError> {
        if let Some(existing) = self.get(id)? {
            if existing.last_sync > entry.last_sync {
                return Ok(false);
            }
        }
        self.put(id, entry)?;
        Ok(true)
    }
}

impl<T: CacheStore + ?Sized> CacheStore for std::sync::Arc<T> {
    fn get(&self, id: LocationId) -> Result<Option<CacheEntry>, StoreError> {
        (**self).get(id)
    }

    fn put(&self, id: LocationId, entry: &CacheEntry) -> Result<(), StoreError> {
        (**self).put(id, entry)
    }

    fn remove(&self, id: LocationId) -> Result<(), StoreError> {
        (**self).remove(id)
    }
}

// ============================================================
// 内存存储
// ============================================================

/// 内存缓存存储
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<LocationId, CacheEntry>>,
}

impl MemoryCacheStore {
    /// 创建新的内存存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前条目数量
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, id: LocationId) -> Result<Option<CacheEntry>, StoreError> {
        Ok(self.entries.read().get(&id).copied())
    }

    fn put(&self, id: LocationId, entry: &CacheEntry) -> Result<(), StoreError> {
        self.entries.write().insert(id, *entry);
        Ok(())
    }

    fn remove(&self, id: LocationId) -> Result<(), StoreError> {
        self.entries.write().remove(&id);
        Ok(())
    }
}

// ============================================================
// 文件存储
// ============================================================

/// 文件缓存存储
///
/// 每个位置一个 JSON 文件，写入走临时文件 + 原子重命名，
/// 崩溃不会留下半写的条目。
#[derive(Debug)]
pub struct FileCacheStore {
    /// 存储目录
    dir: PathBuf,
}

impl FileCacheStore {
    /// 创建文件存储，目录不存在时创建
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, id: LocationId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl CacheStore for FileCacheStore {
    fn get(&self, id: LocationId) -> Result<Option<CacheEntry>, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path)?;
        let entry = serde_json::from_str(&data)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Some(entry))
    }

    fn put(&self, id: LocationId, entry: &CacheEntry) -> Result<(), StoreError> {
        let path = self.path_for(id);
        let data = serde_json::to_string_pretty(entry)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        // 临时文件写入，成功后重命名（原子操作）
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, data)?;
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove(&self, id: LocationId) -> Result<(), StoreError> {
        let path = self.path_for(id);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
