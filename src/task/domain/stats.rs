//! Aggregate counts over the task list.

use super::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Summary statistics for a task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatistics {
    /// Number of tasks.
    pub total: usize,
    /// Tasks in `todo`.
    pub todo: usize,
    /// Tasks in `in_progress`.
    pub in_progress: usize,
    /// Tasks in `done`.
    pub done: usize,
    /// High-priority tasks.
    pub high_priority: usize,
    /// Percentage of tasks that are done, rounded half up. Zero when there
    /// are no tasks.
    pub completion_rate: usize,
}

impl TaskStatistics {
    /// Computes statistics for `tasks`.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut stats = tasks.iter().fold(Self::default(), |mut acc, task| {
            acc.total += 1;
            match task.status() {
                TaskStatus::Todo => acc.todo += 1,
                TaskStatus::InProgress => acc.in_progress += 1,
                TaskStatus::Done => acc.done += 1,
            }
            if task.priority().is_high() {
                acc.high_priority += 1;
            }
            acc
        });
        stats.completion_rate = completion_rate(stats.done, stats.total);
        stats
    }

    /// Returns the count for a single status.
    #[must_use]
    pub const fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
        }
    }
}

/// `round(done / total * 100)` in integer arithmetic.
fn completion_rate(done: usize, total: usize) -> usize {
    let numerator = done.saturating_mul(200).saturating_add(total);
    numerator
        .checked_div(total.saturating_mul(2))
        .unwrap_or_default()
}
