//! 匹配器缓存
//!
//! 以（组号、词、角色）为键缓存编译好的字面量匹配器。映射集合被替换时整体清空，
//! 没有其他淘汰策略。

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::highlight::error::HighlightResult;
use crate::highlight::pipeline::terms::{TermEntry, TermRole};

/// 缓存键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub group: usize,
    pub term: String,
    pub role: TermRole,
}

impl CacheKey {
    pub fn new(group: usize, term: &str, role: TermRole) -> Self {
        Self {
            group,
            term: term.to_string(),
            role,
        }
    }
}

/// 缓存统计信息
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub clears: u64,
}

/// 正则匹配器缓存
#[derive(Debug, Default)]
pub struct RegexCache {
    entries: HashMap<CacheKey, Regex>,
    stats: CacheStats,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取匹配器，首次访问时编译
    pub fn get(&mut self, group: usize, term: &str, role: TermRole) -> HighlightResult<&Regex> {
        let key = CacheKey::new(group, term, role);

        if self.entries.contains_key(&key) {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            let matcher = compile_literal(term)?;
            self.entries.insert(key.clone(), matcher);
        }

        Ok(&self.entries[&key])
    }

    /// 获取词条对应的匹配器
    pub fn get_for(&mut self, entry: &TermEntry) -> HighlightResult<&Regex> {
        self.get(entry.group, &entry.term, entry.role)
    }

    /// 清空所有匹配器
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!("清空匹配器缓存，共 {} 项", self.entries.len());
        }
        self.entries.clear();
        self.stats.clears += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, group: usize, term: &str, role: TermRole) -> bool {
        self.entries.contains_key(&CacheKey::new(group, term, role))
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

/// 编译大小写不敏感的字面量匹配器，所有正则元字符都被转义
pub fn compile_literal(term: &str) -> HighlightResult<Regex> {
    Ok(RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()?)
}
