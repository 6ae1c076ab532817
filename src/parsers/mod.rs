//! # 解析器模块
//!
//! HTML 文档的解析、遍历辅助、可变文档和序列化。
//!
//! # 模块组织
//!
//! - `html` - HTML文档解析、DOM操作、变更记录、序列化

pub mod html;

// Re-export commonly used items for convenience
pub use html::{html_to_dom, serialize_document, LiveDocument, MutationRecord};
