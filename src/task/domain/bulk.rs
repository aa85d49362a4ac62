//! Partitioning of selected tasks for bulk operations and the resulting
//! outcomes.
//!
//! Planning is pure: a plan splits the selection into the tasks a bulk
//! operation may touch and the tasks it must skip. Services commit the
//! plan and report the outcome.

use super::{Selection, Task, TaskId, TaskStatus};
use std::fmt;

fn selected_tasks<'a>(
    tasks: &'a [Task],
    selection: &'a Selection,
) -> impl Iterator<Item = &'a Task> + 'a {
    selection
        .iter()
        .filter_map(move |id| tasks.iter().find(|task| task.id() == id))
}

/// Split of a selection for bulk deletion. High-priority tasks are always
/// protected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDeletePlan {
    deletable: Vec<TaskId>,
    protected: Vec<TaskId>,
}

impl BulkDeletePlan {
    /// Partitions the selected tasks into deletable and protected tasks.
    ///
    /// Selected identifiers without a loaded task are ignored.
    #[must_use]
    pub fn from_selection(tasks: &[Task], selection: &Selection) -> Self {
        let (protected, deletable): (Vec<&Task>, Vec<&Task>) =
            selected_tasks(tasks, selection).partition(|task| task.priority().is_high());
        Self {
            deletable: deletable.into_iter().map(Task::id).collect(),
            protected: protected.into_iter().map(Task::id).collect(),
        }
    }

    /// Tasks that will be deleted.
    #[must_use]
    pub fn deletable(&self) -> &[TaskId] {
        &self.deletable
    }

    /// High-priority tasks that will be skipped.
    #[must_use]
    pub fn protected(&self) -> &[TaskId] {
        &self.protected
    }

    /// Returns `true` when the plan covers no selected task at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.deletable.is_empty() && self.protected.is_empty()
    }

    /// Text asking the user to confirm the deletion.
    #[must_use]
    pub fn confirmation_prompt(&self) -> String {
        let mut prompt = format!("Delete {} task(s)?", self.deletable.len());
        if !self.protected.is_empty() {
            prompt.push_str(&format!(
                " {} high priority task(s) will be skipped.",
                self.protected.len()
            ));
        }
        prompt
    }
}

/// Result of a bulk delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkDeleteOutcome {
    /// The selection was empty.
    NothingSelected,
    /// Every selected task was high priority; nothing was deleted.
    AllProtected {
        /// Number of skipped high-priority tasks.
        skipped: usize,
    },
    /// The user declined the confirmation; nothing was deleted.
    Cancelled,
    /// The deletable tasks were removed.
    Deleted {
        /// Number of deleted tasks.
        deleted: usize,
        /// Number of skipped high-priority tasks.
        skipped: usize,
    },
}

impl BulkDeleteOutcome {
    /// Follow-up notice naming the skipped tasks after a deletion that left
    /// high-priority tasks in place.
    #[must_use]
    pub fn skipped_notice(&self) -> Option<String> {
        match *self {
            Self::Deleted { skipped, .. } if skipped > 0 => Some(format!(
                "{skipped} high priority task(s) were skipped and not deleted."
            )),
            _ => None,
        }
    }
}

impl fmt::Display for BulkDeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NothingSelected => f.write_str("No tasks selected"),
            Self::AllProtected { skipped } => write!(
                f,
                "Cannot delete high priority tasks. All {skipped} selected task(s) were skipped."
            ),
            Self::Cancelled => f.write_str("Bulk delete cancelled"),
            Self::Deleted { deleted, .. } => write!(f, "Deleted {deleted} task(s)"),
        }
    }
}

/// Split of a selection for a bulk status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkStatusPlan {
    target: TaskStatus,
    movable: Vec<TaskId>,
    rejected: Vec<TaskId>,
}

impl BulkStatusPlan {
    /// Partitions the selected tasks by whether each may move from its
    /// current status to `target`.
    #[must_use]
    pub fn from_selection(tasks: &[Task], selection: &Selection, target: TaskStatus) -> Self {
        let (movable, rejected): (Vec<&Task>, Vec<&Task>) = selected_tasks(tasks, selection)
            .partition(|task| task.status().can_transition_to(target));
        Self {
            target,
            movable: movable.into_iter().map(Task::id).collect(),
            rejected: rejected.into_iter().map(Task::id).collect(),
        }
    }

    /// Status the tasks are moved to.
    #[must_use]
    pub const fn target(&self) -> TaskStatus {
        self.target
    }

    /// Tasks whose transition is valid.
    #[must_use]
    pub fn movable(&self) -> &[TaskId] {
        &self.movable
    }

    /// Tasks whose transition is invalid.
    #[must_use]
    pub fn rejected(&self) -> &[TaskId] {
        &self.rejected
    }

    /// Returns `true` when the plan covers no selected task at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.movable.is_empty() && self.rejected.is_empty()
    }
}

/// Result of a bulk status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkStatusOutcome {
    /// The selection was empty.
    NothingSelected,
    /// No selected task could make the transition; nothing changed.
    AllRejected {
        /// Requested status.
        target: TaskStatus,
        /// Number of rejected tasks.
        rejected: usize,
    },
    /// The valid subset was moved.
    Applied {
        /// Requested status.
        target: TaskStatus,
        /// Number of moved tasks.
        moved: usize,
        /// Number of tasks skipped because of an invalid transition.
        skipped: usize,
    },
}

impl fmt::Display for BulkStatusOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NothingSelected => f.write_str("No tasks selected"),
            Self::AllRejected { target, rejected } => write!(
                f,
                "Cannot move any of the {rejected} selected task(s) to {target}: tasks cannot skip the in progress status."
            ),
            Self::Applied {
                target,
                moved,
                skipped: 0,
            } => write!(f, "Moved {moved} task(s) to {target}."),
            Self::Applied {
                target,
                moved,
                skipped,
            } => write!(
                f,
                "Moved {moved} task(s) to {target}. Skipped {skipped} task(s) with an invalid status transition."
            ),
        }
    }
}
