//! 高亮模块
//!
//! 在可变文档中持续高亮映射集合里的所有词条：
//! - **config**: 配置管理
//! - **core**: 引擎控制器、空闲调度和变更监听
//! - **error**: 错误处理
//! - **pipeline**: 词条索引、文本遍历、分段与文档改写
//! - **storage**: 匹配器缓存
//!
//! # 基本用法
//!
//! ```rust
//! use multifind::highlight::{EngineConfig, EngineController};
//! use multifind::mapping::{Color, Mapping, MappingSet};
//! use multifind::parsers::LiveDocument;
//!
//! let document = LiveDocument::parse_str("<p>Rust and Cargo</p>").unwrap();
//! let mut engine = EngineController::new(document, EngineConfig::default()).unwrap();
//!
//! let mapping = Mapping::from_lists(
//!     "rust",
//!     "cargo",
//!     Color::default_search(),
//!     Color::default_mapped(),
//! )
//! .unwrap();
//! engine.start(MappingSet::new(vec![mapping])).unwrap();
//! engine.run_until_idle();
//!
//! let html = String::from_utf8(engine.document().serialize("").unwrap()).unwrap();
//! assert!(html.contains("multi-find-highlight"));
//! ```

/// 配置管理模块
pub mod config;

/// 引擎控制器、空闲调度和变更监听
pub mod core;

/// 错误处理模块
pub mod error;

/// 高亮管道模块
pub mod pipeline;

/// 匹配器缓存
pub mod storage;

pub use config::{ConfigManager, EngineConfig};
pub use core::{EngineController, EnginePhase, IdleReport, IdleWindow};
pub use error::{HighlightError, HighlightResult};
pub use pipeline::{MatchedSpan, ScanMode, Segmenter, TermEntry, TermIndexBuilder, TermRole};
pub use storage::RegexCache;
