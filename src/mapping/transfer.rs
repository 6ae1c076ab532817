//! 映射导入/导出
//!
//! 导出文件格式: `{ "mappings": [...], "exportDate": "<RFC 3339 UTC>" }`

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::normalize::normalize_blob;
use super::store::MAPPINGS_KEY;
use super::MappingSet;
use crate::highlight::error::{HighlightError, HighlightResult};

/// 默认导出文件名
pub const EXPORT_FILE_NAME: &str = "multi-find-settings.json";

/// 导出文件内容
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub mappings: MappingSet,
    pub export_date: String,
}

impl ExportBundle {
    pub fn new(mappings: MappingSet, exported_at: DateTime<Utc>) -> Self {
        Self {
            mappings,
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// 导出为带缩进的 JSON 文本
pub fn export_json(mappings: &MappingSet) -> HighlightResult<String> {
    export_json_at(mappings, Utc::now())
}

/// 以指定时间戳导出
pub fn export_json_at(mappings: &MappingSet, exported_at: DateTime<Utc>) -> HighlightResult<String> {
    if mappings.is_empty() {
        return Err(HighlightError::InvalidInput(
            "没有可导出的映射关系".to_string(),
        ));
    }

    Ok(serde_json::to_string_pretty(&ExportBundle::new(
        mappings.clone(),
        exported_at,
    ))?)
}

/// 导入 JSON 文本，整体替换调用方的映射集合
///
/// 接受与持久化存储相同的历史格式；`mappings` 不是数组时返回错误，
/// 调用方应保留原有集合。
pub fn import_json(content: &str) -> HighlightResult<MappingSet> {
    let data: Value = serde_json::from_str(content)?;

    if !data.get(MAPPINGS_KEY).is_some_and(Value::is_array) {
        return Err(HighlightError::InvalidInput(
            "导入失败，文件格式不正确".to_string(),
        ));
    }

    Ok(normalize_blob(&data))
}
