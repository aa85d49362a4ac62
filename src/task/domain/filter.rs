//! Task list filtering.

use super::{Task, TaskStatus, UserId};
use serde::{Deserialize, Serialize};

/// Status criterion of a [`TaskFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Matches every status.
    #[default]
    All,
    /// Matches only the given status.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Returns `true` when `status` passes this criterion.
    #[must_use]
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

impl From<TaskStatus> for StatusFilter {
    fn from(status: TaskStatus) -> Self {
        Self::Only(status)
    }
}

/// Criteria selecting which tasks are visible. All criteria must pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Status criterion.
    pub status: StatusFilter,
    /// Case-insensitive title substring. Empty matches everything.
    pub search_query: String,
    /// Required assignee. `None` places no constraint.
    pub assignee_id: Option<UserId>,
}

impl TaskFilter {
    /// Returns `true` when `task` passes every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task.status())
            && title_matches(task.title().as_str(), &self.search_query)
            && self
                .assignee_id
                .is_none_or(|assignee| task.assignee_id() == Some(assignee))
    }

    /// Returns the tasks passing the filter, in input order.
    #[must_use]
    pub fn visible<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    /// Merges the criteria set in `patch` into this filter.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(search_query) = patch.search_query {
            self.search_query = search_query;
        }
        if let Some(assignee_id) = patch.assignee_id {
            self.assignee_id = assignee_id;
        }
    }
}

fn title_matches(title: &str, query: &str) -> bool {
    query.is_empty() || title.to_lowercase().contains(&query.to_lowercase())
}

/// Partial change to a [`TaskFilter`]. `None` leaves a criterion unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPatch {
    /// New status criterion.
    pub status: Option<StatusFilter>,
    /// New search query.
    pub search_query: Option<String>,
    /// New assignee criterion; `Some(None)` removes the constraint.
    pub assignee_id: Option<Option<UserId>>,
}

impl FilterPatch {
    /// Creates a patch changing only the status criterion.
    #[must_use]
    pub fn status(status: impl Into<StatusFilter>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    /// Creates a patch changing only the search query.
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search_query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Creates a patch changing only the assignee criterion.
    #[must_use]
    pub fn assignee(assignee_id: Option<UserId>) -> Self {
        Self {
            assignee_id: Some(assignee_id),
            ..Self::default()
        }
    }
}
