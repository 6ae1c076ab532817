//! HTML解析和处理模块
//!
//! - `utils`: 基础工具函数和常量
//! - `dom`: 基础DOM操作
//! - `document`: 可观察的可变文档
//! - `serializer`: 序列化功能

pub mod document;
pub mod dom;
pub mod serializer;
pub mod utils;

// 重新导出主要的公共 API
pub use document::{LiveDocument, MutationRecord};
pub use dom::{
    find_nodes, get_child_node_by_name, get_node_attr, get_node_name, get_parent_node, get_text,
    has_class, has_node_attr, html_to_dom, text_content,
};
pub use serializer::serialize_document;
pub use utils::{is_blank, WHITESPACES};
