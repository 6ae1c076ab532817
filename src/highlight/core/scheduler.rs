//! 空闲调度器
//!
//! 单线程协作式调度：宿主每给出一个空闲窗口就调用一次 [`IdleScheduler::run_idle`]，
//! 队列中的每个任务在一个窗口内最多推进一个分块，然后让出控制权。每个任务都有
//! 自己的最长等待时间，超时后即使窗口已经用完也会推进一个完整分块，避免在繁忙的
//! 宿主上饿死。

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// 空闲窗口的剩余时间
pub trait IdleDeadline {
    fn time_remaining(&self) -> Duration;
}

/// 基于真实时钟的空闲窗口
#[derive(Debug, Clone, Copy)]
pub struct IdleWindow {
    started: Instant,
    budget: Duration,
}

impl IdleWindow {
    pub fn new(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// 不限时的窗口
    pub fn unbounded() -> Self {
        Self::new(Duration::MAX)
    }

    /// 已耗尽的窗口，只有超时任务会被推进
    pub fn exhausted() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl IdleDeadline for IdleWindow {
    fn time_remaining(&self) -> Duration {
        self.budget.saturating_sub(self.started.elapsed())
    }
}

/// 任务推进结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// 还有剩余工作
    Pending,
    /// 全部完成
    Complete,
    /// 出错中止，已处理的前缀保持不变
    Aborted,
}

/// 单次分块的预算
pub struct ChunkBudget<'a> {
    deadline: &'a dyn IdleDeadline,
    chunk_size: usize,
    min_remaining: Duration,
    timed_out: bool,
}

impl<'a> ChunkBudget<'a> {
    pub fn new(
        deadline: &'a dyn IdleDeadline,
        chunk_size: usize,
        min_remaining: Duration,
        timed_out: bool,
    ) -> Self {
        Self {
            deadline,
            chunk_size,
            min_remaining,
            timed_out,
        }
    }

    /// 已处理 `processed` 项后是否还能继续
    pub fn allows(&self, processed: usize) -> bool {
        processed < self.chunk_size
            && (self.timed_out || self.deadline.time_remaining() > self.min_remaining)
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }
}

/// 带可恢复游标的分块任务
#[derive(Debug, Clone)]
pub struct ChunkedTask<T> {
    items: Vec<T>,
    cursor: usize,
}

impl<T> ChunkedTask<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, cursor: 0 }
    }

    /// 在预算内推进一个分块
    ///
    /// `work` 返回错误时任务立即中止，错误向上传递，游标停在出错项上。
    pub fn run_chunk<E, F>(&mut self, budget: &ChunkBudget<'_>, mut work: F) -> Result<TaskStatus, E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        let mut processed = 0;
        while self.cursor < self.items.len() && budget.allows(processed) {
            work(&self.items[self.cursor])?;
            self.cursor += 1;
            processed += 1;
        }

        Ok(if self.is_finished() {
            TaskStatus::Complete
        } else {
            TaskStatus::Pending
        })
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.items.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 任务编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(u64);

/// 调度器配置
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    pub chunk_size: usize,
    pub min_remaining: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        use crate::highlight::config::constants;

        Self {
            chunk_size: constants::DEFAULT_CHUNK_SIZE,
            min_remaining: Duration::from_millis(constants::MIN_IDLE_REMAINING_MS),
        }
    }
}

fn due_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout).unwrap_or(now)
}

struct Scheduled<J> {
    id: JobId,
    job: J,
    timeout: Duration,
    due: Instant,
}

/// 已结束的任务
#[derive(Debug)]
pub struct Finished<J> {
    pub id: JobId,
    pub job: J,
    pub status: TaskStatus,
}

/// 协作式空闲调度器
pub struct IdleScheduler<J> {
    queue: VecDeque<Scheduled<J>>,
    config: SchedulerConfig,
    next_id: u64,
}

impl<J> IdleScheduler<J> {
    /// 分块大小至少为 1，否则任务永远无法推进
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            queue: VecDeque::new(),
            config: SchedulerConfig {
                chunk_size: config.chunk_size.max(1),
                ..config
            },
            next_id: 0,
        }
    }

    /// 加入队列；`timeout` 是两次推进之间的最长等待时间
    pub fn schedule(&mut self, job: J, timeout: Duration) -> JobId {
        self.next_id += 1;
        let id = JobId(self.next_id);
        self.queue.push_back(Scheduled {
            id,
            job,
            timeout,
            due: due_after(timeout),
        });
        id
    }

    /// 运行一个空闲窗口
    ///
    /// 每个排队任务最多推进一个分块；窗口耗尽后只推进已超时的任务。
    pub fn run_idle<F>(&mut self, deadline: &dyn IdleDeadline, mut drive: F) -> Vec<Finished<J>>
    where
        F: FnMut(&mut J, &ChunkBudget<'_>) -> TaskStatus,
    {
        let mut finished = Vec::new();
        let queued: Vec<Scheduled<J>> = self.queue.drain(..).collect();

        for mut entry in queued {
            let timed_out = Instant::now() >= entry.due;
            if !timed_out && deadline.time_remaining() <= self.config.min_remaining {
                self.queue.push_back(entry);
                continue;
            }

            let budget = ChunkBudget::new(
                deadline,
                self.config.chunk_size,
                self.config.min_remaining,
                timed_out,
            );
            match drive(&mut entry.job, &budget) {
                TaskStatus::Pending => {
                    entry.due = due_after(entry.timeout);
                    self.queue.push_back(entry);
                }
                status => finished.push(Finished {
                    id: entry.id,
                    job: entry.job,
                    status,
                }),
            }
        }

        finished
    }

    /// 移除满足条件的排队任务
    pub fn cancel_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&J) -> bool,
    {
        let before = self.queue.len();
        self.queue.retain(|entry| !predicate(&entry.job));
        before - self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn jobs(&self) -> impl Iterator<Item = &J> {
        self.queue.iter().map(|entry| &entry.job)
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}
