//! 文档变更监听
//!
//! 把一批变更记录归约为需要重新高亮的元素集合：新增的元素节点，以及内容发生
//! 变化的文本节点所在的父元素。位于标记、跳过元素或退出属性之内的节点不会被
//! 当作新内容。

use std::rc::Rc;

use markup5ever_rcdom::Handle;

use crate::highlight::pipeline::walker::is_within_excluded;
use crate::parsers::html::dom::{get_parent_node, is_element};
use crate::parsers::html::{LiveDocument, MutationRecord};

/// 变更监听器
#[derive(Debug, Default)]
pub struct ChangeWatcher {
    root: Option<Handle>,
}

impl ChangeWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始观察 `root` 子树的结构与文本变化
    pub fn start(&mut self, document: &LiveDocument, root: &Handle) {
        if self.root.is_some() {
            document.disconnect();
        }
        document.observe(root);
        self.root = Some(root.clone());
        tracing::debug!("开始监听文档变更");
    }

    /// 断开观察，未取走的记录一并丢弃
    pub fn stop(&mut self, document: &LiveDocument) {
        if self.root.take().is_some() {
            document.disconnect();
            tracing::debug!("停止监听文档变更");
        }
    }

    pub fn is_active(&self) -> bool {
        self.root.is_some()
    }

    pub fn root(&self) -> Option<&Handle> {
        self.root.as_ref()
    }

    /// 取走一批变更并返回受影响的元素；没有需要处理的内容时返回 `None`
    pub fn poll(&self, document: &LiveDocument) -> Option<Vec<Handle>> {
        if !self.is_active() {
            return None;
        }

        let records = document.take_records();
        if records.is_empty() {
            return None;
        }

        let affected = Self::affected_nodes(&records);
        tracing::debug!(
            "收到 {} 条变更记录，受影响元素 {} 个",
            records.len(),
            affected.len()
        );
        (!affected.is_empty()).then_some(affected)
    }

    /// 从变更记录中提取受影响的元素（去重，保持首次出现的顺序）
    ///
    /// 已被其他受影响元素包含的节点也会保留，由遍历阶段对文本节点去重。
    pub fn affected_nodes(records: &[MutationRecord]) -> Vec<Handle> {
        let mut affected: Vec<Handle> = Vec::new();

        for record in records {
            match record {
                MutationRecord::ChildList { added, .. } => {
                    for node in added.iter().filter(|node| is_element(node)) {
                        push_unique(&mut affected, node);
                    }
                }
                MutationRecord::CharacterData { target } => {
                    if let Some(parent) = get_parent_node(target) {
                        push_unique(&mut affected, &parent);
                    }
                }
            }
        }

        affected.retain(|node| !is_within_excluded(node));
        affected
    }
}

fn push_unique(nodes: &mut Vec<Handle>, node: &Handle) {
    if !nodes.iter().any(|existing| Rc::ptr_eq(existing, node)) {
        nodes.push(node.clone());
    }
}
