//! 文本节点遍历
//!
//! 深度优先、按文档顺序访问子树中可高亮的文本节点。以下内容整体跳过：
//! 注释、已高亮的标记元素、不承载正文的元素（script/style 等）、带有显式退出
//! 属性的元素，以及只包含空白的文本节点。

use markup5ever_rcdom::{Handle, NodeData};

use crate::highlight::config::constants;
use crate::parsers::html::dom::{get_node_name, get_parent_node, has_class, has_node_attr};
use crate::parsers::html::utils::is_blank;

/// 遍历统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkStats {
    pub nodes_visited: usize,
    pub nodes_skipped: usize,
    pub text_nodes: usize,
}

/// 是否为高亮标记元素
pub fn is_marker(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. }) && has_class(node, constants::MARKER_CLASS)
}

/// 元素本身及其子树是否被排除在高亮之外
pub fn is_excluded_element(node: &Handle) -> bool {
    match get_node_name(node) {
        Some(tag) => {
            constants::SKIP_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
                || has_node_attr(node, constants::IGNORE_ATTR)
                || is_marker(node)
        }
        None => false,
    }
}

/// 节点自身或任一祖先是否被排除
///
/// 增量遍历从子树中间开始，起点之上的排除规则只能由此检查。
pub fn is_within_excluded(node: &Handle) -> bool {
    let mut current = Some(node.clone());
    while let Some(candidate) = current {
        if is_excluded_element(&candidate) {
            return true;
        }
        current = get_parent_node(&candidate);
    }
    false
}

/// 文本节点遍历器
#[derive(Debug, Default)]
pub struct TextWalker {
    stats: WalkStats,
}

impl TextWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 访问 `root` 下每个可高亮的文本节点
    ///
    /// 子节点列表在访问前做快照，回调可以安全地替换当前节点或修改兄弟节点。
    pub fn walk<F>(&mut self, root: &Handle, visit: &mut F)
    where
        F: FnMut(&Handle),
    {
        self.stats.nodes_visited += 1;

        match &root.data {
            NodeData::Comment { .. } | NodeData::ProcessingInstruction { .. } => {
                self.stats.nodes_skipped += 1;
            }
            NodeData::Text { contents } => {
                if is_blank(&contents.borrow()) {
                    self.stats.nodes_skipped += 1;
                    return;
                }
                self.stats.text_nodes += 1;
                visit(root);
            }
            NodeData::Element { .. } if is_excluded_element(root) => {
                self.stats.nodes_skipped += 1;
            }
            _ => {
                let children: Vec<Handle> = root.children.borrow().clone();
                for child in &children {
                    self.walk(child, visit);
                }
            }
        }
    }

    /// 收集 `root` 下所有可高亮的文本节点
    pub fn collect(&mut self, root: &Handle) -> Vec<Handle> {
        let mut nodes = Vec::new();
        self.walk(root, &mut |node: &Handle| nodes.push(node.clone()));
        nodes
    }

    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }

    pub fn reset(&mut self) {
        self.stats = WalkStats::default();
    }
}
