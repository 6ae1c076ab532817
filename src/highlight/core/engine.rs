//! 高亮引擎控制器
//!
//! 持有当前映射集合、词条索引、匹配器缓存与调度队列，是外部协作方唯一的入口。
//!
//! 状态机只有两个状态：
//!
//! - `Idle`：没有进行中的全量高亮
//! - `Highlighting`：当前代次的全量高亮尚未结束
//!
//! 每次替换映射集合都会先撤销文档中已有的全部标记，代次加一，再按需要排入新的
//! 全量任务。旧代次的全量任务在下一个分块边界直接结束，不再修改文档。由文档变更
//! 触发的增量任务与全量任务互不阻塞，只处理受影响的子树。

use std::rc::Rc;

use markup5ever_rcdom::Handle;
use serde_json::Value;

use crate::highlight::config::EngineConfig;
use crate::highlight::error::{log_error, HighlightError, HighlightResult};
use crate::highlight::pipeline::applier::DomApplier;
use crate::highlight::pipeline::segmenter::Segmenter;
use crate::highlight::pipeline::terms::{TermEntry, TermIndexBuilder};
use crate::highlight::pipeline::walker::{is_within_excluded, TextWalker};
use crate::highlight::storage::cache::{CacheStats, RegexCache};
use crate::mapping::{normalize_blob, MappingSet};
use crate::parsers::html::dom::{get_parent_node, get_text};
use crate::parsers::html::LiveDocument;

use super::scheduler::{
    ChunkedTask, IdleDeadline, IdleScheduler, IdleWindow, SchedulerConfig, TaskStatus,
};
use super::watcher::ChangeWatcher;

/// 映射更新消息的动作名
pub const UPDATE_ACTION: &str = "updateData";

/// 引擎状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Idle,
    Highlighting,
}

/// 高亮任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// 整个文档，绑定到发起时的映射代次
    Full { generation: u64 },
    /// 仅限变更涉及的子树
    Incremental,
}

/// 一次高亮任务
///
/// 待处理的文本节点在第一次推进时才收集，之后按游标分块处理。
#[derive(Debug)]
pub struct HighlightPass {
    kind: PassKind,
    roots: Vec<Handle>,
    task: Option<ChunkedTask<Handle>>,
}

impl HighlightPass {
    fn full(root: Handle, generation: u64) -> Self {
        Self {
            kind: PassKind::Full { generation },
            roots: vec![root],
            task: None,
        }
    }

    fn incremental(roots: Vec<Handle>) -> Self {
        Self {
            kind: PassKind::Incremental,
            roots,
            task: None,
        }
    }

    pub fn kind(&self) -> PassKind {
        self.kind
    }

    pub fn roots(&self) -> &[Handle] {
        &self.roots
    }

    fn is_stale(&self, generation: u64) -> bool {
        matches!(self.kind, PassKind::Full { generation: g } if g != generation)
    }
}

/// 一个空闲窗口的运行结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdleReport {
    pub passes_completed: usize,
    pub passes_aborted: usize,
    /// 因映射更新而作废的全量任务
    pub passes_superseded: usize,
    /// 本窗口内被改写的文本节点
    pub nodes_highlighted: usize,
    /// 仍在队列中的任务
    pub pending: usize,
}

/// 高亮引擎控制器
pub struct EngineController {
    config: EngineConfig,
    document: LiveDocument,
    mappings: MappingSet,
    terms: Vec<TermEntry>,
    cache: RegexCache,
    segmenter: Segmenter,
    applier: DomApplier,
    walker: TextWalker,
    scheduler: IdleScheduler<HighlightPass>,
    watcher: ChangeWatcher,
    phase: EnginePhase,
    generation: u64,
}

impl EngineController {
    /// 创建引擎；配置不合法（如分块大小为 0）时返回错误
    pub fn new(document: LiveDocument, config: EngineConfig) -> HighlightResult<Self> {
        config.validate()?;

        let scheduler = IdleScheduler::new(SchedulerConfig {
            chunk_size: config.chunk_size,
            min_remaining: config.min_idle_remaining(),
        });

        Ok(Self {
            segmenter: Segmenter::new(config.scan_mode),
            config,
            document,
            mappings: MappingSet::empty(),
            terms: Vec::new(),
            cache: RegexCache::new(),
            applier: DomApplier::new(),
            walker: TextWalker::new(),
            scheduler,
            watcher: ChangeWatcher::new(),
            phase: EnginePhase::Idle,
            generation: 0,
        })
    }

    /// 开始监听 `<body>` 并应用初始映射集合
    pub fn start(&mut self, mappings: MappingSet) -> HighlightResult<()> {
        let body = self.document.body();
        self.watcher.start(&self.document, &body);
        tracing::info!("高亮引擎启动，初始映射 {} 组", mappings.len());
        self.replace_mappings(mappings)
    }

    /// 整体替换映射集合
    ///
    /// 先撤销全部已有标记，再重建词条索引、清空匹配器缓存；新集合非空时排入一次
    /// 全量高亮并进入 `Highlighting`。
    pub fn replace_mappings(&mut self, mappings: MappingSet) -> HighlightResult<()> {
        let root = self.document.body();
        let reverted = self.applier.revert_all(&self.document, &root)?;

        // Records produced by the revert would feed back into the watcher; the
        // full pass below covers anything the host changed before this point.
        self.document.take_records();

        self.generation += 1;
        self.mappings = mappings;
        self.terms = TermIndexBuilder::build(&self.mappings);
        self.cache.clear();

        if self.mappings.is_empty() {
            self.phase = EnginePhase::Idle;
            tracing::info!(
                "映射集合为空，已撤销 {} 个标记（代次 {}）",
                reverted,
                self.generation
            );
            return Ok(());
        }

        self.scheduler.schedule(
            HighlightPass::full(root, self.generation),
            self.config.full_pass_timeout(),
        );
        self.phase = EnginePhase::Highlighting;
        tracing::info!(
            "映射集合已更新：{} 组，{} 个词条（代次 {}）",
            self.mappings.len(),
            self.terms.len(),
            self.generation
        );
        Ok(())
    }

    /// 处理一条映射更新消息
    ///
    /// 只响应 `updateData` 动作，返回是否已处理；`mappings` 缺失或不是数组时视为空集合。
    pub fn handle_message(&mut self, message: &Value) -> HighlightResult<bool> {
        let action = message.get("action").and_then(Value::as_str);
        if action != Some(UPDATE_ACTION) {
            tracing::debug!("忽略未知消息: {:?}", action);
            return Ok(false);
        }

        self.replace_mappings(normalize_blob(message))?;
        Ok(true)
    }

    /// 取走文档中积累的变更并据此排入增量任务，返回是否排入了任务
    pub fn pump_mutations(&mut self) -> bool {
        match self.watcher.poll(&self.document) {
            Some(nodes) => self.on_mutation_batch(nodes),
            None => false,
        }
    }

    /// 对一批受影响的元素排入增量任务；映射集合为空时忽略
    pub fn on_mutation_batch(&mut self, nodes: Vec<Handle>) -> bool {
        if nodes.is_empty() || self.mappings.is_empty() {
            return false;
        }

        tracing::debug!("排入增量高亮任务，涉及 {} 个元素", nodes.len());
        self.scheduler.schedule(
            HighlightPass::incremental(nodes),
            self.config.incremental_timeout(),
        );
        true
    }

    /// 运行一个空闲窗口
    pub fn run_idle(&mut self, deadline: &dyn IdleDeadline) -> IdleReport {
        let mut report = IdleReport::default();
        let generation = self.generation;

        let Self {
            document,
            terms,
            cache,
            segmenter,
            applier,
            walker,
            scheduler,
            ..
        } = self;

        let finished = scheduler.run_idle(deadline, |pass, budget| {
            if pass.is_stale(generation) {
                return TaskStatus::Complete;
            }

            let roots = &pass.roots;
            let task = pass
                .task
                .get_or_insert_with(|| ChunkedTask::new(collect_text_nodes(walker, roots)));

            let mut highlighted = 0;
            let outcome = task.run_chunk(budget, |node| {
                if highlight_text_node(document, node, terms, cache, segmenter, applier)? {
                    highlighted += 1;
                }
                Ok::<(), HighlightError>(())
            });
            report.nodes_highlighted += highlighted;

            match outcome {
                Ok(status) => status,
                Err(e) => {
                    log_error(&e);
                    tracing::error!("高亮任务中止，已处理部分保持不变: {}", e);
                    TaskStatus::Aborted
                }
            }
        });

        for done in finished {
            if done.job.is_stale(self.generation) {
                report.passes_superseded += 1;
                continue;
            }

            match done.status {
                TaskStatus::Aborted => report.passes_aborted += 1,
                _ => report.passes_completed += 1,
            }
            if let PassKind::Full { .. } = done.job.kind {
                self.phase = EnginePhase::Idle;
                tracing::debug!("全量高亮结束（代次 {}）", self.generation);
            }
        }

        report.pending = self.scheduler.len();
        report
    }

    /// 反复运行不限时的空闲窗口，直到没有待处理的变更与任务
    pub fn run_until_idle(&mut self) -> IdleReport {
        let mut total = IdleReport::default();

        loop {
            self.pump_mutations();
            if self.scheduler.is_empty() {
                break;
            }

            let report = self.run_idle(&IdleWindow::unbounded());
            total.passes_completed += report.passes_completed;
            total.passes_aborted += report.passes_aborted;
            total.passes_superseded += report.passes_superseded;
            total.nodes_highlighted += report.nodes_highlighted;
        }

        total.pending = self.scheduler.len();
        total
    }

    /// 停止监听并丢弃所有排队任务，文档中的标记保持不变
    pub fn shutdown(&mut self) {
        self.watcher.stop(&self.document);
        let dropped = self.scheduler.cancel_where(|_| true);
        self.phase = EnginePhase::Idle;
        tracing::info!("高亮引擎已停止，丢弃 {} 个排队任务", dropped);
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mappings(&self) -> &MappingSet {
        &self.mappings
    }

    pub fn terms(&self) -> &[TermEntry] {
        &self.terms
    }

    pub fn document(&self) -> &LiveDocument {
        &self.document
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn pending_passes(&self) -> usize {
        self.scheduler.len()
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_active()
    }

    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    pub fn into_document(self) -> LiveDocument {
        self.document
    }
}

/// 收集多个根下的文本节点，重叠的子树只保留一次
///
/// 处于排除区域内的根整体跳过。
fn collect_text_nodes(walker: &mut TextWalker, roots: &[Handle]) -> Vec<Handle> {
    let mut nodes: Vec<Handle> = Vec::new();
    for root in roots.iter().filter(|root| !is_within_excluded(root)) {
        for node in walker.collect(root) {
            if !nodes.iter().any(|known| Rc::ptr_eq(known, &node)) {
                nodes.push(node);
            }
        }
    }
    nodes
}

fn highlight_text_node(
    document: &LiveDocument,
    node: &Handle,
    terms: &[TermEntry],
    cache: &mut RegexCache,
    segmenter: &Segmenter,
    applier: &DomApplier,
) -> HighlightResult<bool> {
    // Already replaced by another pass, or removed by the host
    if get_parent_node(node).is_none() {
        return Ok(false);
    }
    if applier.is_highlighted_text(node) {
        return Ok(false);
    }
    let Some(text) = get_text(node) else {
        return Ok(false);
    };

    let spans = segmenter.segment(&text, terms, cache)?;
    applier.apply(document, node, &spans)
}
