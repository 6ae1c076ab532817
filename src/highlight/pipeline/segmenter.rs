//! 文本分段
//!
//! 给定一个文本单元和按优先级排序的词条列表，计算出普通片段与高亮片段的序列。
//! 片段按原文顺序排列，拼接后与原文逐字符相同。
//!
//! 词条按优先级（长词优先）依次扫描，而不是按出现位置扫描。默认的
//! [`ScanMode::Cursor`] 只维护一个游标：某个词条接受匹配后游标前移，之后的词条
//! 只能在游标之后匹配。因此当较长的词先在文本靠后处命中时，靠前位置上较短词的
//! 出现会被跳过。这一行为与既有的高亮结果保持一致，不做修正；需要补全这些空隙时
//! 使用 [`ScanMode::GapFill`]。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::highlight::error::HighlightResult;
use crate::highlight::storage::cache::RegexCache;
use crate::mapping::Color;

use super::terms::{TermEntry, TermRole};

/// 分段扫描模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    /// 单游标、按词条优先级扫描
    #[default]
    Cursor,
    /// 按词条优先级认领所有不重叠的出现位置
    GapFill,
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "cursor" => Ok(ScanMode::Cursor),
            "gap-fill" | "gapfill" | "gap_fill" => Ok(ScanMode::GapFill),
            _ => Err(format!(
                "Invalid scan mode '{}'. Use: cursor, gap-fill",
                value
            )),
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::Cursor => f.write_str("cursor"),
            ScanMode::GapFill => f.write_str("gap-fill"),
        }
    }
}

/// 高亮片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedSpan {
    pub role: TermRole,
    pub group: usize,
    pub color: Color,
    pub text: String,
}

/// 文本片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedSpan {
    Plain(String),
    Highlighted(HighlightedSpan),
}

impl MatchedSpan {
    fn highlighted(entry: &TermEntry, text: &str) -> Self {
        MatchedSpan::Highlighted(HighlightedSpan {
            role: entry.role,
            group: entry.group,
            color: entry.color.clone(),
            text: text.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        match self {
            MatchedSpan::Plain(text) => text,
            MatchedSpan::Highlighted(span) => &span.text,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, MatchedSpan::Highlighted(_))
    }
}

/// 拼接片段还原原文
pub fn reconstruct(spans: &[MatchedSpan]) -> String {
    spans.iter().map(MatchedSpan::text).collect()
}

/// 文本分段器
#[derive(Debug, Clone, Copy, Default)]
pub struct Segmenter {
    mode: ScanMode,
}

impl Segmenter {
    pub fn new(mode: ScanMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// 对一个文本单元分段
    pub fn segment(
        &self,
        text: &str,
        terms: &[TermEntry],
        cache: &mut RegexCache,
    ) -> HighlightResult<Vec<MatchedSpan>> {
        match self.mode {
            ScanMode::Cursor => segment_cursor(text, terms, cache),
            ScanMode::GapFill => segment_gap_fill(text, terms, cache),
        }
    }
}

fn segment_cursor(
    text: &str,
    terms: &[TermEntry],
    cache: &mut RegexCache,
) -> HighlightResult<Vec<MatchedSpan>> {
    let mut spans = Vec::new();
    let mut last_index = 0;

    for entry in terms {
        if entry.term.is_empty() || last_index >= text.len() {
            continue;
        }

        let matcher = cache.get_for(entry)?;
        while let Some(found) = matcher.find_at(text, last_index) {
            if found.is_empty() {
                break;
            }

            if found.start() > last_index {
                spans.push(MatchedSpan::Plain(text[last_index..found.start()].to_string()));
            }
            spans.push(MatchedSpan::highlighted(entry, found.as_str()));
            last_index = found.end();

            if last_index >= text.len() {
                break;
            }
        }
    }

    if last_index < text.len() {
        spans.push(MatchedSpan::Plain(text[last_index..].to_string()));
    }

    Ok(spans)
}

fn segment_gap_fill(
    text: &str,
    terms: &[TermEntry],
    cache: &mut RegexCache,
) -> HighlightResult<Vec<MatchedSpan>> {
    // (start, end, term index), sorted by start and never overlapping
    let mut claimed: Vec<(usize, usize, usize)> = Vec::new();

    for (index, entry) in terms.iter().enumerate() {
        if entry.term.is_empty() {
            continue;
        }

        let matcher = cache.get_for(entry)?;
        let mut pos = 0;
        while pos < text.len() {
            let Some(found) = matcher.find_at(text, pos) else {
                break;
            };
            if found.is_empty() {
                break;
            }

            let slot = claimed.partition_point(|&(start, _, _)| start < found.start());
            if slot > 0 && claimed[slot - 1].1 > found.start() {
                pos = claimed[slot - 1].1;
            } else if slot < claimed.len() && claimed[slot].0 < found.end() {
                pos = next_char_boundary(text, found.start());
            } else {
                claimed.insert(slot, (found.start(), found.end(), index));
                pos = found.end();
            }
        }
    }

    let mut spans = Vec::with_capacity(claimed.len() * 2 + 1);
    let mut last_index = 0;
    for (start, end, index) in claimed {
        if start > last_index {
            spans.push(MatchedSpan::Plain(text[last_index..start].to_string()));
        }
        spans.push(MatchedSpan::highlighted(&terms[index], &text[start..end]));
        last_index = end;
    }
    if last_index < text.len() {
        spans.push(MatchedSpan::Plain(text[last_index..].to_string()));
    }

    Ok(spans)
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    index
        + text[index..]
            .chars()
            .next()
            .map_or(1, char::len_utf8)
}
