//! 持久化映射存储
//!
//! 存储内容是一个 `{ "mappings": [...] }` 形式的 JSON 块。读取时总会经过
//! 格式规整，写入时总是当前格式。

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::normalize::normalize_blob;
use super::MappingSet;
use crate::highlight::error::{HighlightError, HighlightResult};

/// 存储块中映射列表的键名
pub const MAPPINGS_KEY: &str = "mappings";

/// 映射存储接口
pub trait MappingStore {
    /// 读取并规整映射集合
    fn load(&self) -> HighlightResult<MappingSet>;

    /// 整体写入映射集合
    fn save(&self, mappings: &MappingSet) -> HighlightResult<()>;
}

fn to_blob(mappings: &MappingSet) -> Value {
    json!({ MAPPINGS_KEY: mappings })
}

/// 基于 JSON 文件的存储
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MappingStore for JsonFileStore {
    fn load(&self) -> HighlightResult<MappingSet> {
        if !self.path.exists() {
            tracing::debug!("映射存储文件不存在: {}", self.path.display());
            return Ok(MappingSet::empty());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| HighlightError::from(e).with_context(self.path.display()))?;
        let blob: Value = serde_json::from_str(&content)
            .map_err(|e| HighlightError::from(e).with_context(self.path.display()))?;

        let mappings = normalize_blob(&blob);
        let empty = mappings.iter().filter(|mapping| !mapping.has_terms()).count();
        if empty > 0 {
            tracing::warn!(
                "{} 条映射记录没有可用的词条: {}",
                empty,
                self.path.display()
            );
        }

        Ok(mappings)
    }

    fn save(&self, mappings: &MappingSet) -> HighlightResult<()> {
        let content = serde_json::to_string_pretty(&to_blob(mappings))?;
        fs::write(&self.path, content)
            .map_err(|e| HighlightError::from(e).with_context(self.path.display()))?;
        Ok(())
    }
}

/// 内存存储，保存原始 JSON 块以便模拟历史数据
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RefCell<Option<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以任意原始 JSON 块初始化
    pub fn with_blob(blob: Value) -> Self {
        Self {
            blob: RefCell::new(Some(blob)),
        }
    }

    /// 当前保存的原始 JSON 块
    pub fn raw(&self) -> Option<Value> {
        self.blob.borrow().clone()
    }
}

impl MappingStore for MemoryStore {
    fn load(&self) -> HighlightResult<MappingSet> {
        Ok(self
            .blob
            .borrow()
            .as_ref()
            .map(normalize_blob)
            .unwrap_or_default())
    }

    fn save(&self, mappings: &MappingSet) -> HighlightResult<()> {
        *self.blob.borrow_mut() = Some(to_blob(mappings));
        Ok(())
    }
}
