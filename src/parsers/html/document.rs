//! 可变文档模块
//!
//! `LiveDocument` 包装一棵 `RcDom`，并提供宿主页面与高亮引擎共用的修改接口。
//! 开启观察后，每一次落在被观察子树内的修改都会生成一条 `MutationRecord`，
//! 由引擎在合适的时机取走（相当于浏览器中的变更观察器回调）。

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::interface::{Attribute, QualName};
use html5ever::tendril::StrTendril;
use html5ever::tree_builder::create_element;
use html5ever::{namespace_url, ns, LocalName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::highlight::error::{HighlightError, HighlightResult};

use super::dom::{
    child_index, get_child_node_by_name, get_parent_node, html_to_dom, is_inclusive_ancestor,
    new_attribute, new_text_node, set_parent_node,
};
use super::serializer::serialize_document;

/// 一条文档变更记录
#[derive(Debug, Clone)]
pub enum MutationRecord {
    /// 子节点列表变化
    ChildList {
        target: Handle,
        added: Vec<Handle>,
        removed: Vec<Handle>,
    },
    /// 文本节点内容变化
    CharacterData { target: Handle },
}

impl MutationRecord {
    pub fn target(&self) -> &Handle {
        match self {
            MutationRecord::ChildList { target, .. } => target,
            MutationRecord::CharacterData { target } => target,
        }
    }
}

#[derive(Default)]
struct Observation {
    root: Option<Handle>,
    records: Vec<MutationRecord>,
}

/// 可观察的 HTML 文档
pub struct LiveDocument {
    dom: RcDom,
    observation: RefCell<Observation>,
}

impl LiveDocument {
    /// 按指定编码解析 HTML 字节
    pub fn parse(data: &[u8], document_encoding: &str) -> HighlightResult<Self> {
        Ok(Self::from_dom(html_to_dom(data, document_encoding)?))
    }

    /// 解析 UTF-8 HTML 文本
    pub fn parse_str(html: &str) -> HighlightResult<Self> {
        Self::parse(html.as_bytes(), "utf-8")
    }

    pub fn from_dom(dom: RcDom) -> Self {
        Self {
            dom,
            observation: RefCell::new(Observation::default()),
        }
    }

    /// 文档根节点
    pub fn root(&self) -> Handle {
        self.dom.document.clone()
    }

    /// `<body>` 元素；文档没有 body 时返回根节点
    pub fn body(&self) -> Handle {
        get_child_node_by_name(&self.dom.document, "html")
            .and_then(|html| get_child_node_by_name(&html, "body"))
            .unwrap_or_else(|| self.root())
    }

    /// 创建游离元素
    pub fn create_element(&self, tag: &str, attrs: &[(&str, &str)]) -> Handle {
        let attributes: Vec<Attribute> = attrs
            .iter()
            .map(|(name, value)| new_attribute(name, value))
            .collect();

        create_element(
            &self.dom,
            QualName::new(None, ns!(html), LocalName::from(tag)),
            attributes,
        )
    }

    /// 创建游离文本节点
    pub fn create_text(&self, text: &str) -> Handle {
        new_text_node(text)
    }

    /// 将 `child` 追加为 `parent` 的最后一个子节点
    pub fn append_child(&self, parent: &Handle, child: &Handle) -> HighlightResult<()> {
        self.detach(child);
        set_parent_node(child, Some(parent));
        parent.children.borrow_mut().push(child.clone());

        self.record(MutationRecord::ChildList {
            target: parent.clone(),
            added: vec![child.clone()],
            removed: Vec::new(),
        });
        Ok(())
    }

    /// 将 `child` 插入到 `reference` 之前
    pub fn insert_before(
        &self,
        parent: &Handle,
        child: &Handle,
        reference: &Handle,
    ) -> HighlightResult<()> {
        if Rc::ptr_eq(child, reference) {
            return Ok(());
        }

        self.detach(child);
        let index = child_index(parent, reference).ok_or_else(|| {
            HighlightError::DomError("参照节点不是父节点的子节点".to_string())
        })?;
        set_parent_node(child, Some(parent));
        parent.children.borrow_mut().insert(index, child.clone());

        self.record(MutationRecord::ChildList {
            target: parent.clone(),
            added: vec![child.clone()],
            removed: Vec::new(),
        });
        Ok(())
    }

    /// 从父节点中移除 `child`
    pub fn remove_child(&self, parent: &Handle, child: &Handle) -> HighlightResult<()> {
        let index = child_index(parent, child).ok_or_else(|| {
            HighlightError::DomError("待移除节点不是父节点的子节点".to_string())
        })?;
        parent.children.borrow_mut().remove(index);
        set_parent_node(child, None);

        self.record(MutationRecord::ChildList {
            target: parent.clone(),
            added: Vec::new(),
            removed: vec![child.clone()],
        });
        Ok(())
    }

    /// 用一组节点替换 `old`，保持原位置
    pub fn replace_child_with(
        &self,
        parent: &Handle,
        old: &Handle,
        new_nodes: Vec<Handle>,
    ) -> HighlightResult<()> {
        let index = child_index(parent, old).ok_or_else(|| {
            HighlightError::DetachedNode("被替换节点已不在父节点中".to_string())
        })?;

        for node in &new_nodes {
            if !Rc::ptr_eq(node, old) {
                self.detach_silently(node);
            }
        }

        // Detaching the new nodes may have shifted the old node
        let index = child_index(parent, old).unwrap_or(index);
        for node in &new_nodes {
            set_parent_node(node, Some(parent));
        }
        parent
            .children
            .borrow_mut()
            .splice(index..=index, new_nodes.iter().cloned());
        if !new_nodes.iter().any(|node| Rc::ptr_eq(node, old)) {
            set_parent_node(old, None);
        }

        self.record(MutationRecord::ChildList {
            target: parent.clone(),
            added: new_nodes,
            removed: vec![old.clone()],
        });
        Ok(())
    }

    /// 修改文本节点内容
    pub fn set_text(&self, node: &Handle, value: &str) -> HighlightResult<()> {
        match &node.data {
            NodeData::Text { contents } => {
                *contents.borrow_mut() = StrTendril::from_slice(value);
            }
            _ => {
                return Err(HighlightError::DomError(
                    "只能修改文本节点的内容".to_string(),
                ))
            }
        }

        self.record(MutationRecord::CharacterData {
            target: node.clone(),
        });
        Ok(())
    }

    /// 开始观察 `root` 子树
    pub fn observe(&self, root: &Handle) {
        let mut observation = self.observation.borrow_mut();
        observation.root = Some(root.clone());
        observation.records.clear();
    }

    /// 停止观察并丢弃未取走的记录
    pub fn disconnect(&self) {
        let mut observation = self.observation.borrow_mut();
        observation.root = None;
        observation.records.clear();
    }

    pub fn is_observed(&self) -> bool {
        self.observation.borrow().root.is_some()
    }

    /// 取走所有未处理的变更记录
    pub fn take_records(&self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.observation.borrow_mut().records)
    }

    /// 序列化文档
    pub fn serialize(&self, document_encoding: &str) -> HighlightResult<Vec<u8>> {
        serialize_document(&self.dom.document, document_encoding)
    }

    /// 断开节点与原父节点的连接并记录移除；父节点列表中找不到时只清除父链接
    fn detach(&self, node: &Handle) {
        let Some(parent) = get_parent_node(node) else {
            return;
        };
        set_parent_node(node, None);
        let Some(index) = child_index(&parent, node) else {
            return;
        };
        parent.children.borrow_mut().remove(index);
        self.record(MutationRecord::ChildList {
            target: parent,
            added: Vec::new(),
            removed: vec![node.clone()],
        });
    }

    fn detach_silently(&self, node: &Handle) {
        if let Some(parent) = get_parent_node(node) {
            if let Some(index) = child_index(&parent, node) {
                parent.children.borrow_mut().remove(index);
            }
            set_parent_node(node, None);
        }
    }

    fn record(&self, record: MutationRecord) {
        let mut observation = self.observation.borrow_mut();
        let inside = match &observation.root {
            Some(root) => is_inclusive_ancestor(root, record.target()),
            None => false,
        };
        if inside {
            observation.records.push(record);
        }
    }
}
