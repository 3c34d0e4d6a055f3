//! # Task Management System
//!
//! A single-threaded cooperative work queue with an explicit pacing policy.
//!
//! ## Architecture Overview
//!
//! - `TaskManager`: FIFO queue plus the time the next batch becomes due
//! - `Task`: a unit of work processed against caller-provided state
//! - `PacingPolicy`: how many tasks run per step and how long to wait between steps
//!
//! ## Task Lifecycle
//! 1. Tasks are queued via `TaskManager::publish_task()`
//! 2. `TaskManager::restart()` arms the drainer; the first batch is due at once
//! 3. Each call to `TaskManager::take_due_tasks()` hands out at most
//!    `items_per_step` tasks if the step is due, then schedules the next step
//!    one `interval` later
//! 4. The drainer disarms itself once the queue runs dry
//!
//! There is no parallelism. The caller processes the handed out tasks itself,
//! between frames, so no frame ever does more than one step of work.
//!
//! ## Example Usage
//! ```rust
//! use web_time::{Duration, Instant};
//! use voxel_terrain::engine_state::task_management::{PacingPolicy, TaskManager};
//!
//! let mut task_manager = TaskManager::new(PacingPolicy::new(1, Duration::from_millis(200)));
//! task_manager.publish_task("first");
//! task_manager.publish_task("second");
//!
//! let now = Instant::now();
//! task_manager.restart(now);
//! assert_eq!(task_manager.take_due_tasks(now), vec!["first"]);
//! assert!(task_manager.take_due_tasks(now).is_empty());
//! ```

pub mod task;

use std::collections::VecDeque;

use log::trace;
use web_time::{Duration, Instant};

pub use task::Task;

/// How fast the queue drains.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Tasks handed out per step. Never zero.
    pub items_per_step: usize,
    /// Delay between two steps.
    pub interval: Duration,
}

impl PacingPolicy {
    /// Creates a policy; `items_per_step` is raised to at least one.
    pub fn new(items_per_step: usize, interval: Duration) -> Self {
        PacingPolicy {
            items_per_step: items_per_step.max(1),
            interval,
        }
    }
}

/// Cooperative, paced FIFO of tasks.
pub struct TaskManager<T> {
    queued_tasks: VecDeque<T>,
    policy: PacingPolicy,
    /// When the next step may run; `None` while the drainer is disarmed.
    next_due: Option<Instant>,
}

impl<T> TaskManager<T> {
    /// Creates an empty, disarmed manager.
    pub fn new(policy: PacingPolicy) -> Self {
        TaskManager {
            queued_tasks: VecDeque::new(),
            policy,
            next_due: None,
        }
    }

    /// Appends a task to the back of the queue.
    pub fn publish_task(&mut self, task: T) {
        self.queued_tasks.push_back(task);
    }

    /// Keeps only tasks for which `keep` returns `true`. Returns how many were dropped.
    pub fn retain_tasks(&mut self, keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.queued_tasks.len();
        self.queued_tasks.retain(keep);
        before - self.queued_tasks.len()
    }

    /// Puts `tasks` back at the front of the queue, in the order given.
    ///
    /// Used when a step could not be processed. If the drainer had disarmed
    /// itself, the next step is scheduled one interval after `now`.
    pub fn requeue_front(&mut self, tasks: impl IntoIterator<Item = T>, now: Instant) {
        let tasks: Vec<T> = tasks.into_iter().collect();
        for task in tasks.into_iter().rev() {
            self.queued_tasks.push_front(task);
        }
        if self.next_due.is_none() && !self.queued_tasks.is_empty() {
            self.next_due = Some(now + self.policy.interval);
        }
    }

    /// (Re)arms the drainer with the first step due at `now`.
    ///
    /// Restarting an armed drainer does not queue a second one; it only moves
    /// the next step forward.
    pub fn restart(&mut self, now: Instant) {
        self.next_due = if self.queued_tasks.is_empty() {
            None
        } else {
            Some(now)
        };
    }

    /// Hands out the next step's tasks if it is due at `now`.
    pub fn take_due_tasks(&mut self, now: Instant) -> Vec<T> {
        match self.next_due {
            Some(due) if now >= due => {}
            _ => return Vec::new(),
        }

        let count = self.policy.items_per_step.min(self.queued_tasks.len());
        let tasks: Vec<T> = self.queued_tasks.drain(..count).collect();

        self.next_due = if self.queued_tasks.is_empty() {
            None
        } else {
            Some(now + self.policy.interval)
        };
        trace!(
            "Released {} tasks, {} still queued, next step at {:?}",
            tasks.len(),
            self.queued_tasks.len(),
            self.next_due
        );
        tasks
    }

    /// Queued tasks, front first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queued_tasks.iter()
    }

    /// When the next step is due, if the drainer is armed.
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// The pacing policy in use.
    pub fn policy(&self) -> PacingPolicy {
        self.policy
    }

    /// Number of queued tasks.
    pub fn len(&self) -> usize {
        self.queued_tasks.len()
    }

    /// `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queued_tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(items_per_step: usize) -> TaskManager<u32> {
        let mut manager = TaskManager::new(PacingPolicy::new(
            items_per_step,
            Duration::from_millis(200),
        ));
        for task in 0..5 {
            manager.publish_task(task);
        }
        manager
    }

    #[test]
    fn test_nothing_runs_until_restarted() {
        let mut manager = manager(1);
        assert!(manager.take_due_tasks(Instant::now()).is_empty());
        assert_eq!(manager.len(), 5);
    }

    #[test]
    fn test_one_step_per_interval() {
        let mut manager = manager(2);
        let start = Instant::now();
        manager.restart(start);

        assert_eq!(manager.take_due_tasks(start), vec![0, 1]);
        assert!(manager.take_due_tasks(start + Duration::from_millis(199)).is_empty());
        assert_eq!(manager.take_due_tasks(start + Duration::from_millis(200)), vec![2, 3]);
        assert_eq!(manager.take_due_tasks(start + Duration::from_millis(400)), vec![4]);
        assert_eq!(manager.next_due(), None);
    }

    #[test]
    fn test_restart_does_not_double_the_rate() {
        let mut manager = manager(1);
        let start = Instant::now();
        manager.restart(start);
        manager.restart(start);
        assert_eq!(manager.take_due_tasks(start).len(), 1);
        manager.restart(start);
        assert_eq!(manager.take_due_tasks(start).len(), 1);
        assert!(manager.take_due_tasks(start).is_empty());
    }

    #[test]
    fn test_retain_drops_and_counts() {
        let mut manager = manager(1);
        assert_eq!(manager.retain_tasks(|task| task % 2 == 0), 2);
        assert_eq!(manager.iter().copied().collect::<Vec<_>>(), vec![0, 2, 4]);
    }

    #[test]
    fn test_requeue_front_keeps_order_and_rearms() {
        let mut manager = manager(5);
        let start = Instant::now();
        manager.restart(start);
        let taken = manager.take_due_tasks(start);
        assert_eq!(manager.next_due(), None);

        manager.requeue_front(taken.into_iter().skip(2), start);
        assert_eq!(manager.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(manager.next_due(), Some(start + Duration::from_millis(200)));
    }

    #[test]
    fn test_restart_on_empty_queue_stays_disarmed() {
        let mut manager: TaskManager<u32> =
            TaskManager::new(PacingPolicy::new(0, Duration::from_millis(10)));
        assert_eq!(manager.policy().items_per_step, 1);
        manager.restart(Instant::now());
        assert_eq!(manager.next_due(), None);
    }
}
