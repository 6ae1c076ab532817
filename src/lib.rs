//! # Multifind Library
//!
//! 关键词映射高亮引擎：用户定义若干组“检索词 → 关联高亮词”的映射，每组带两种
//! 颜色，引擎在一个持续变化的 HTML 文档中高亮所有出现的词，并在文档变化时只对
//! 受影响的部分增量更新。
//!
//! ## 模块组织
//!
//! - `highlight` - 高亮引擎（词条索引、分段、文档改写、空闲调度、变更监听）
//! - `mapping` - 映射数据模型、历史格式规整、存储与导入导出
//! - `parsers` - HTML 解析、可观察的可变文档、序列化
//! - `env` - 类型化的环境变量

pub mod env;
pub mod highlight;
pub mod mapping;
pub mod parsers;

// Re-export commonly used items for convenience
pub use highlight::{
    EngineConfig, EngineController, EnginePhase, HighlightError, HighlightResult, IdleReport,
    IdleWindow, ScanMode,
};
pub use mapping::{Color, Mapping, MappingSet};
pub use parsers::LiveDocument;
