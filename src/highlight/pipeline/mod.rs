//! 高亮管道模块
//!
//! 从映射集合到文档修改的各个阶段：词条索引、文本遍历、分段和应用

pub mod applier;
pub mod segmenter;
pub mod terms;
pub mod walker;

// 重新导出主要类型
pub use applier::{merge_text_siblings, DomApplier};
pub use segmenter::{reconstruct, HighlightedSpan, MatchedSpan, ScanMode, Segmenter};
pub use terms::{TermEntry, TermIndexBuilder, TermRole};
pub use walker::{is_marker, TextWalker, WalkStats};
