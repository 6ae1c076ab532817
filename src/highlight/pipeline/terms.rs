//! 词条索引构建
//!
//! 把映射集合展开成按匹配优先级排序的词条列表。长词优先，避免短词把长词的出现
//! 位置切碎；长度相同时保持（映射、角色、组内位置）的原始顺序。

use std::fmt;

use crate::mapping::{Color, MappingSet};

/// 词条角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TermRole {
    /// 检索词
    Search,
    /// 关联高亮词
    Mapped,
}

impl TermRole {
    /// 标记元素上使用的类名
    pub fn class_name(&self) -> &'static str {
        match self {
            TermRole::Search => "search-term",
            TermRole::Mapped => "mapped-term",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TermRole::Search => "search",
            TermRole::Mapped => "mapped",
        }
    }
}

impl fmt::Display for TermRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个匹配词条
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermEntry {
    pub term: String,
    pub role: TermRole,
    pub group: usize,
    pub color: Color,
    /// Unicode 标量值个数，不是 UTF-16 码元数
    ///
    /// 两种计数只在含 BMP 以外字符（如 emoji）的词条上不同，这类词条的排序可能
    /// 因此与按 UTF-16 计数时不一致。
    pub length: usize,
}

impl TermEntry {
    pub fn new(term: &str, role: TermRole, group: usize, color: &Color) -> Self {
        Self {
            term: term.to_string(),
            role,
            group,
            color: color.clone(),
            length: term.chars().count(),
        }
    }
}

/// 词条索引构建器
pub struct TermIndexBuilder;

impl TermIndexBuilder {
    /// 生成按长度降序排列的词条列表（稳定排序）
    pub fn build(mappings: &MappingSet) -> Vec<TermEntry> {
        let mut entries = Vec::new();

        for (group, mapping) in mappings.iter().enumerate() {
            entries.extend(
                mapping
                    .search_terms
                    .iter()
                    .filter(|term| !term.is_empty())
                    .map(|term| TermEntry::new(term, TermRole::Search, group, &mapping.search_color)),
            );
            entries.extend(
                mapping
                    .mapped_terms
                    .iter()
                    .filter(|term| !term.is_empty())
                    .map(|term| TermEntry::new(term, TermRole::Mapped, group, &mapping.mapped_color)),
            );
        }

        entries.sort_by(|a, b| b.length.cmp(&a.length));
        entries
    }
}
