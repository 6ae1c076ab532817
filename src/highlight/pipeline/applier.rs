//! 高亮应用与撤销
//!
//! 把文本节点替换为由普通文本节点和标记元素组成的片段，或把子树中所有标记元素
//! 展开回普通文本。

use std::rc::Rc;

use markup5ever_rcdom::Handle;

use crate::highlight::config::constants;
use crate::highlight::error::{HighlightError, HighlightResult};
use crate::parsers::html::dom::{get_parent_node, get_text, is_text_node, set_parent_node};
use crate::parsers::html::LiveDocument;

use super::segmenter::{HighlightedSpan, MatchedSpan};
use super::walker::is_marker;

/// 标记元素的内联样式
pub fn marker_style(span: &HighlightedSpan) -> String {
    let mut rules = vec![
        format!("background-color: {}", span.color),
        format!("box-shadow: 0 0 0 1px {}", span.color),
    ];
    rules.extend(
        constants::INHERITED_TYPOGRAPHY
            .iter()
            .map(|property| format!("{}: inherit", property)),
    );
    rules.join("; ")
}

/// 标记元素的类名
pub fn marker_class(span: &HighlightedSpan) -> String {
    format!(
        "{} {} group-{}",
        constants::MARKER_CLASS,
        span.role.class_name(),
        span.group
    )
}

/// DOM 高亮应用器
#[derive(Debug, Default, Clone, Copy)]
pub struct DomApplier;

impl DomApplier {
    pub fn new() -> Self {
        DomApplier
    }

    /// 用片段替换文本节点；没有高亮片段时不做任何修改
    ///
    /// 返回是否修改了文档。
    pub fn apply(
        &self,
        document: &LiveDocument,
        text_node: &Handle,
        spans: &[MatchedSpan],
    ) -> HighlightResult<bool> {
        if !spans.iter().any(MatchedSpan::is_highlighted) {
            return Ok(false);
        }

        let parent = get_parent_node(text_node).ok_or_else(|| {
            HighlightError::DetachedNode("文本节点没有父节点".to_string())
        })?;

        let fragment: Vec<Handle> = spans
            .iter()
            .map(|span| match span {
                MatchedSpan::Plain(text) => document.create_text(text),
                MatchedSpan::Highlighted(span) => self.create_marker(document, span),
            })
            .collect();

        document.replace_child_with(&parent, text_node, fragment)?;
        Ok(true)
    }

    /// 创建标记元素
    pub fn create_marker(&self, document: &LiveDocument, span: &HighlightedSpan) -> Handle {
        let class = marker_class(span);
        let group = span.group.to_string();
        let style = marker_style(span);

        let marker = document.create_element(
            constants::MARKER_TAG,
            &[
                ("class", class.as_str()),
                (constants::ROLE_ATTR, span.role.as_str()),
                (constants::GROUP_ATTR, group.as_str()),
                ("style", style.as_str()),
            ],
        );
        let text = document.create_text(&span.text);
        marker.children.borrow_mut().push(text.clone());
        set_parent_node(&text, Some(&marker));
        marker
    }

    /// 文本节点是否已位于标记元素内
    pub fn is_highlighted_text(&self, text_node: &Handle) -> bool {
        is_text_node(text_node)
            && get_parent_node(text_node)
                .map(|parent| is_marker(&parent))
                .unwrap_or(false)
    }

    /// 查找子树中所有标记元素（按文档顺序）
    pub fn find_markers(&self, root: &Handle) -> Vec<Handle> {
        let mut markers = Vec::new();
        collect_markers(root, &mut markers);
        markers
    }

    /// 把子树中的所有标记元素展开为其子内容，返回展开的数量
    ///
    /// 展开后，受影响父节点下相邻的文本节点会合并为一个，文本内容与高亮前一致。
    pub fn revert_all(&self, document: &LiveDocument, root: &Handle) -> HighlightResult<usize> {
        let markers = self.find_markers(root);
        let mut parents: Vec<Handle> = Vec::new();
        let mut reverted = 0;

        for marker in &markers {
            let Some(parent) = get_parent_node(marker) else {
                continue;
            };
            let children: Vec<Handle> = marker.children.borrow().clone();
            document.replace_child_with(&parent, marker, children)?;
            if !parents.iter().any(|known| Rc::ptr_eq(known, &parent)) {
                parents.push(parent);
            }
            reverted += 1;
        }

        for parent in &parents {
            merge_text_siblings(document, parent)?;
        }

        if reverted > 0 {
            tracing::debug!("已撤销 {} 个高亮标记", reverted);
        }
        Ok(reverted)
    }
}

/// 合并 `parent` 下相邻的文本子节点，返回被并入前一个节点的数量
pub fn merge_text_siblings(document: &LiveDocument, parent: &Handle) -> HighlightResult<usize> {
    let children: Vec<Handle> = parent.children.borrow().clone();
    let mut merged = 0;
    let mut index = 0;

    while index < children.len() {
        let Some(mut buffer) = get_text(&children[index]) else {
            index += 1;
            continue;
        };

        let mut next = index + 1;
        while let Some(text) = children.get(next).and_then(get_text) {
            buffer.push_str(&text);
            document.remove_child(parent, &children[next])?;
            next += 1;
        }
        if next > index + 1 {
            document.set_text(&children[index], &buffer)?;
            merged += next - index - 1;
        }
        index = next;
    }

    Ok(merged)
}

// Nested markers are collected too, outer first, so unwrapping in order
// never leaves one behind
fn collect_markers(node: &Handle, markers: &mut Vec<Handle>) {
    if is_marker(node) {
        markers.push(node.clone());
    }

    for child in node.children.borrow().iter() {
        collect_markers(child, markers);
    }
}
