//! Deferred task scheduling
//!
//! Sorts requested during a frame are not run inline. They are queued here and
//! executed when the frame driver calls [`Scene::tick`](super::Scene::tick).
//! Each container remembers the [`TaskId`] of its single pending sort, which is
//! what makes requests coalesce and what `destroy` uses to cancel.

use std::collections::VecDeque;

use crate::foundation::collections::{NodeId, SlotMap, TaskId};

/// A sort waiting for the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredSort {
    /// Container to sort
    pub container: NodeId,
}

/// FIFO of cancellable deferred sorts
#[derive(Debug, Default)]
pub struct DeferredScheduler {
    tasks: SlotMap<TaskId, DeferredSort>,
    queue: VecDeque<TaskId>,
}

impl DeferredScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a sort for the next tick
    pub fn schedule(&mut self, container: NodeId) -> TaskId {
        let task = self.tasks.insert(DeferredSort { container });
        self.queue.push_back(task);
        task
    }

    /// Cancel a queued task; returns `false` if it already ran or was cancelled
    pub fn cancel(&mut self, task: TaskId) -> bool {
        // The id stays in the queue and is skipped when drained
        self.tasks.remove(task).is_some()
    }

    /// Whether the task is still waiting
    pub fn is_scheduled(&self, task: TaskId) -> bool {
        self.tasks.contains_key(task)
    }

    /// Number of live tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task is waiting
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Remove and return every task that was queued before this call, in order
    ///
    /// Tasks scheduled while the caller processes the result wait for the next drain.
    pub fn drain_due(&mut self) -> Vec<(TaskId, DeferredSort)> {
        let due: Vec<TaskId> = self.queue.drain(..).collect();
        due.into_iter()
            .filter_map(|task| self.tasks.remove(task).map(|sort| (task, sort)))
            .collect()
    }
}
