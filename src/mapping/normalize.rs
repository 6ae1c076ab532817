//! 历史存储格式规整
//!
//! 接受任何曾经有效的持久化形态，输出当前的 `Mapping` 结构。这里的函数是纯函数，
//! 对任意 JSON 输入都有定义，只在数据进入系统时（加载、导入、消息）调用一次。

use serde_json::Value;

use super::{Color, Mapping, MappingSet};

/// 规整单条记录
///
/// 缺失或类型错误的字段按字段取默认值：词表为空，颜色取默认色。记录本身永远
/// 保留，它在集合中的位置就是组号。
pub fn normalize_record(record: &Value) -> Mapping {
    let Some(object) = record.as_object() else {
        return Mapping::new(
            Vec::new(),
            Vec::new(),
            Color::default_search(),
            Color::default_mapped(),
        );
    };

    let search_terms = string_list(object.get("searchTerms"));

    // Legacy records carry a single "mappedTerm"; it only applies when the
    // plural list is absent
    let mapped_terms = match object.get("mappedTerms") {
        Some(list) if !list.is_null() => string_list(Some(list)),
        _ => string_list(object.get("mappedTerm")),
    };

    Mapping {
        search_terms,
        mapped_terms,
        search_color: color_or(object.get("searchColor"), Color::default_search),
        mapped_color: color_or(object.get("mappedColor"), Color::default_mapped),
    }
}

/// 规整记录序列，保持记录顺序与数量
pub fn normalize_records(records: &[Value]) -> MappingSet {
    MappingSet::new(records.iter().map(normalize_record).collect())
}

/// 读取存储块或导出文件中的 `mappings` 数组；缺失或类型错误时视为空集合
pub fn normalize_blob(blob: &Value) -> MappingSet {
    match blob.get("mappings").and_then(Value::as_array) {
        Some(records) => normalize_records(records),
        None => MappingSet::empty(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(term)) => vec![term.clone()],
        _ => Vec::new(),
    }
}

fn color_or(value: Option<&Value>, default: fn() -> Color) -> Color {
    match value.and_then(Value::as_str) {
        Some(color) if !color.trim().is_empty() => Color::new(color),
        _ => default(),
    }
}
