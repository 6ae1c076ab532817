//! # 映射模块
//!
//! 用户定义的关键词映射（检索词组 → 关联高亮词组，各带一种颜色）：
//!
//! - `normalize` - 把任何历史存储格式规整为当前的 `Mapping` 结构
//! - `store` - 持久化映射的键值存储接口
//! - `transfer` - 导入/导出文件格式
//!
//! 引擎把整个 `MappingSet` 视为只读、整体替换的值，从不修改它。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::highlight::config::constants;
use crate::highlight::error::{HighlightError, HighlightResult};

pub mod normalize;
pub mod store;
pub mod transfer;

pub use normalize::{normalize_blob, normalize_record, normalize_records};
pub use store::{JsonFileStore, MappingStore, MemoryStore};
pub use transfer::{export_json, import_json, ExportBundle};

/// CSS 颜色值（原样保存，不做解析）
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Color(value.into())
    }

    /// 检索词默认颜色
    pub fn default_search() -> Self {
        Color::new(constants::DEFAULT_SEARCH_COLOR)
    }

    /// 关联高亮词默认颜色
    pub fn default_mapped() -> Self {
        Color::new(constants::DEFAULT_MAPPED_COLOR)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Color::new(value)
    }
}

/// 单条映射规则
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub search_terms: Vec<String>,
    pub mapped_terms: Vec<String>,
    pub search_color: Color,
    pub mapped_color: Color,
}

impl Mapping {
    pub fn new(
        search_terms: Vec<String>,
        mapped_terms: Vec<String>,
        search_color: Color,
        mapped_color: Color,
    ) -> Self {
        Self {
            search_terms,
            mapped_terms,
            search_color,
            mapped_color,
        }
    }

    /// 从分号分隔的词表创建映射，两侧都必须至少有一个词
    pub fn from_lists(
        search: &str,
        mapped: &str,
        search_color: Color,
        mapped_color: Color,
    ) -> HighlightResult<Self> {
        let search_terms = parse_term_list(search);
        if search_terms.is_empty() {
            return Err(HighlightError::InvalidInput(
                "检索关键词不能为空".to_string(),
            ));
        }

        let mapped_terms = parse_term_list(mapped);
        if mapped_terms.is_empty() {
            return Err(HighlightError::InvalidInput(
                "关联高亮词不能为空".to_string(),
            ));
        }

        Ok(Self::new(search_terms, mapped_terms, search_color, mapped_color))
    }

    /// 是否至少有一个非空词条可供高亮
    pub fn has_terms(&self) -> bool {
        self.search_terms
            .iter()
            .chain(&self.mapped_terms)
            .any(|term| !term.is_empty())
    }

    /// 两条映射的词表是否完全相同（颜色不参与比较）
    pub fn same_terms(&self, other: &Mapping) -> bool {
        self.search_terms == other.search_terms && self.mapped_terms == other.mapped_terms
    }
}

/// 有序映射集合，下标即组号
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingSet(Vec<Mapping>);

impl MappingSet {
    pub fn new(mappings: Vec<Mapping>) -> Self {
        MappingSet(mappings)
    }

    pub fn empty() -> Self {
        MappingSet(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, group: usize) -> Option<&Mapping> {
        self.0.get(group)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mapping> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Mapping] {
        &self.0
    }

    /// 集合中是否已有词表相同的映射
    pub fn contains_equivalent(&self, mapping: &Mapping) -> bool {
        self.0.iter().any(|existing| existing.same_terms(mapping))
    }

    /// 返回追加一条映射后的新集合；重复映射被拒绝
    pub fn with_mapping(&self, mapping: Mapping) -> HighlightResult<Self> {
        if self.contains_equivalent(&mapping) {
            return Err(HighlightError::InvalidInput(
                "此映射关系已存在".to_string(),
            ));
        }

        let mut mappings = self.0.clone();
        mappings.push(mapping);
        Ok(MappingSet(mappings))
    }

    pub fn into_inner(self) -> Vec<Mapping> {
        self.0
    }
}

impl From<Vec<Mapping>> for MappingSet {
    fn from(mappings: Vec<Mapping>) -> Self {
        MappingSet(mappings)
    }
}

impl<'a> IntoIterator for &'a MappingSet {
    type Item = &'a Mapping;
    type IntoIter = std::slice::Iter<'a, Mapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// 拆分分号分隔的词表，去除首尾空白并丢弃空项
pub fn parse_term_list(input: &str) -> Vec<String> {
    input
        .split(';')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}
