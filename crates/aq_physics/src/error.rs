// crates/aq_physics/src/error.rs

//! 物理层错误类型
//!
//! 基础层只定义通用错误，这里扩展模拟运行特有的错误。
//! 模型函数本身是纯函数、不做恢复；净化与默认值替换只发生在
//! 引擎的摄入边界（见 `engine`）。

use aq_foundation::AqError;
use thiserror::Error;

/// 模拟运行结果
pub type SimResult<T> = Result<T, SimulationError>;

/// 模拟运行错误
#[derive(Debug, Error)]
pub enum SimulationError {
    /// 档案配置非法，模拟不允许启动
    #[error("水体档案非法: {0}")]
    InvalidProfile(String),

    /// 气象序列为空
    #[error("气象序列为空")]
    EmptySeries,

    /// 气象序列时间非严格递增
    #[error("气象序列时间非递增: 第{index}条样本")]
    NonChronologicalSeries {
        /// 违例样本下标
        index: usize,
    },

    /// 载荷状态出现非有限值（模型缺陷，不允许静默夹断）
    #[error("数值发散: {quantity} 在第{step}步变为非有限值")]
    NumericDivergence {
        /// 发散的物理量名称
        quantity: &'static str,
        /// 发散发生的步数
        step: usize,
    },

    /// 基础层错误
    #[error(transparent)]
    Foundation(#[from] AqError),
}
