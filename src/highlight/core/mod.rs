//! 核心模块
//!
//! 空闲调度、变更监听和引擎控制器

pub mod engine;
pub mod scheduler;
pub mod watcher;

// 重新导出主要类型
pub use engine::{EngineController, EnginePhase, HighlightPass, IdleReport, PassKind};
pub use scheduler::{
    ChunkBudget, ChunkedTask, IdleDeadline, IdleScheduler, IdleWindow, SchedulerConfig, TaskStatus,
};
pub use watcher::ChangeWatcher;
