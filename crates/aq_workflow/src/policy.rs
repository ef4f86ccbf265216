// crates/aq_workflow/src/policy.rs

//! 同步决策：纯函数的陈旧度分级
//!
//! 对 (now, 缓存条目, 配置) 的纯函数，不做任何 IO：
//!
//! - 无缓存 / 模式版本不符 / 陈旧超过长阈值 → 冷启动，整段回看
//! - 陈旧超过节流窗口 → 增量重放缺失小时（整天上取整），
//!   以缓存水温播种
//! - 其余 → 跳过，原样返回缓存值（对上游天气源的显式节流）
//!
//! 增量重放与冷启动是同一递推的不同播种点，收敛值在模型
//! 离散误差内一致（由 aq_physics 的测试钉住）。

use crate::cache::CacheEntry;
use aq_config::SyncConfig;
use chrono::{DateTime, Duration, Utc};

/// 同步动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncAction {
    /// 冷启动：忽略先验状态，整段回看重放
    ColdStart,
    /// 增量重放缺失的天数，以缓存水温播种
    Incremental {
        /// 缺失天数（陈旧小时数按整天上取整）
        days_missing: u32,
    },
    /// 不重算，返回缓存值
    Skip,
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ColdStart => write!(f, "cold_start"),
            Self::Incremental { days_missing } => write!(f, "incremental({days_missing}d)"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// 决策一次同步应执行的动作
pub fn decide(now: DateTime<Utc>, entry: Option<&CacheEntry>, config: &SyncConfig) -> SyncAction {
    let Some(entry) = entry else {
        return SyncAction::ColdStart;
    };

    if entry.schema_version != config.schema_version {
        return SyncAction::ColdStart;
    }

    let staleness = now - entry.last_sync;

    if staleness > Duration::days(i64::from(config.stale_days)) {
        return SyncAction::ColdStart;
    }

    if staleness > Duration::hours(i64::from(config.throttle_hours)) {
        let minutes = staleness.num_minutes().max(0);
        let day_minutes = 24 * 60;
        let days_missing = ((minutes + day_minutes - 1) / day_minutes).max(1) as u32;
        return SyncAction::Incremental { days_missing };
    }

    SyncAction::Skip
}
