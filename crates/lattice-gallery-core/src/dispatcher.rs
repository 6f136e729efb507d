//! Deferred task dispatch.
//!
//! The [`Dispatcher`] holds continuations that must not run inside the
//! operation that scheduled them: work that waits for containers to be
//! generated, previews that should only be computed once a burst of
//! highlight changes settles, and similar "next turn" callbacks.
//!
//! Tasks are ordered by [`DispatchPriority`] and run FIFO within a priority.
//! The host drives the queue by calling [`Dispatcher::run_pending`] from its
//! event loop (or directly, in tests).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::logging::targets;

/// Priority levels for deferred tasks.
/// Higher priority tasks are run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum DispatchPriority {
    /// Lowest priority - runs once nothing else is pending.
    Idle = 0,
    /// Background work such as retrying after container generation.
    Background = 1,
    /// Normal priority - most deferred notifications.
    #[default]
    Normal = 2,
    /// Input-driven follow-ups.
    Input = 3,
}

impl DispatchPriority {
    const COUNT: usize = 4;

    fn lane(self) -> usize {
        Self::COUNT - 1 - self as usize
    }
}

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed task closure.
type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

struct TaskData {
    id: TaskId,
    task: BoxedTask,
}

/// Lanes ordered from highest to lowest priority.
#[derive(Default)]
struct DispatchQueue {
    lanes: [VecDeque<TaskData>; DispatchPriority::COUNT],
}

impl DispatchQueue {
    fn push(&mut self, priority: DispatchPriority, data: TaskData) {
        self.lanes[priority.lane()].push_back(data);
    }

    fn pop_next(&mut self) -> Option<TaskData> {
        self.lanes.iter_mut().find_map(VecDeque::pop_front)
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        for lane in &mut self.lanes {
            if let Some(pos) = lane.iter().position(|t| t.id == id) {
                lane.remove(pos);
                return true;
            }
        }
        false
    }

    fn len(&self) -> usize {
        self.lanes.iter().map(VecDeque::len).sum()
    }
}

/// Priority-ordered queue of deferred tasks.
///
/// The queue lock is released before each task runs, so tasks may post or
/// cancel other tasks. Tasks posted while [`run_pending`](Self::run_pending)
/// is draining the queue are run by the same call.
#[derive(Default)]
pub struct Dispatcher {
    queue: Mutex<DispatchQueue>,
}

impl Dispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a task to run on a later turn.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post<F>(&self, priority: DispatchPriority, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        self.queue.lock().push(
            priority,
            TaskData {
                id,
                task: Box::new(task),
            },
        );
        tracing::trace!(target: targets::DISPATCHER, task = id.as_u64(), ?priority, "task posted");
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled.
    pub fn cancel(&self, id: TaskId) -> bool {
        let cancelled = self.queue.lock().cancel(id);
        if cancelled {
            tracing::trace!(target: targets::DISPATCHER, task = id.as_u64(), "task cancelled");
        }
        cancelled
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.queue.lock().len()
    }

    /// Run the highest-priority pending task, if any.
    ///
    /// Returns `true` if a task ran.
    pub fn run_one(&self) -> bool {
        let next = self.queue.lock().pop_next();
        match next {
            Some(data) => {
                tracing::trace!(target: targets::DISPATCHER, task = data.id.as_u64(), "running task");
                (data.task)();
                true
            }
            None => false,
        }
    }

    /// Run tasks until the queue is empty.
    ///
    /// Returns the number of tasks that ran.
    pub fn run_pending(&self) -> usize {
        let mut count = 0;
        while self.run_one() {
            count += 1;
        }
        count
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("pending", &self.pending_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(Dispatcher: Send, Sync);
