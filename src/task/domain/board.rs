//! Client-side state container for the task list.
//!
//! [`TaskBoard`] holds everything the presentation layer reads: the loaded
//! tasks and users, the active filter, the bulk selection, and the
//! loading/error flags. It changes only through [`TaskBoard::apply`], which
//! reduces one [`BoardEvent`] at a time. Events come either from user
//! actions or from completed requests against the persistence layer.

use super::{
    FilterPatch, Selection, Task, TaskFilter, TaskId, TaskStatistics, TaskStatus, User,
    UNKNOWN_USER_NAME,
};
use serde::{Deserialize, Serialize};

/// A state change applied to a [`TaskBoard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A full task fetch was issued.
    FetchStarted,
    /// A full task fetch completed; replaces the whole collection.
    TasksLoaded(Vec<Task>),
    /// A full task fetch failed.
    FetchFailed(String),
    /// A task creation was issued.
    CreateStarted,
    /// A task was created; appended to the collection.
    TaskCreated(Task),
    /// A task creation failed.
    CreateFailed(String),
    /// A task update completed; replaces only that task.
    TaskUpdated(Task),
    /// A status change completed; replaces the task and re-sorts the list
    /// by status.
    StatusChanged(Task),
    /// A task update failed.
    UpdateFailed(String),
    /// A task was deleted.
    TaskDeleted(TaskId),
    /// A task deletion failed.
    DeleteFailed(String),
    /// Several tasks were deleted at once.
    TasksDeleted(Vec<TaskId>),
    /// The filter criteria changed.
    FilterChanged(FilterPatch),
    /// A task was toggled in or out of the selection.
    SelectionToggled(TaskId),
    /// The selection was replaced wholesale.
    AllSelected(Vec<TaskId>),
    /// The selection was emptied.
    SelectionCleared,
    /// The user directory was loaded.
    UsersLoaded(Vec<User>),
}

/// Per-status counts shown on the status filter tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// All tasks.
    pub all: usize,
    /// Tasks in `todo`.
    pub todo: usize,
    /// Tasks in `in_progress`.
    pub in_progress: usize,
    /// Tasks in `done`.
    pub done: usize,
}

/// Task list state container.
///
/// The selection always refers to loaded tasks only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    users: Vec<User>,
    filter: TaskFilter,
    selection: Selection,
    loading: bool,
    error: Option<String>,
}

impl TaskBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board pre-loaded with `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    /// Reduces one event into the board state.
    pub fn apply(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::FetchStarted => {
                self.loading = true;
                self.error = None;
            }
            BoardEvent::TasksLoaded(tasks) => {
                self.loading = false;
                self.tasks = tasks;
                let tasks_ref = &self.tasks;
                self.selection
                    .retain(|id| tasks_ref.iter().any(|task| task.id() == id));
            }
            BoardEvent::CreateStarted => self.loading = true,
            BoardEvent::TaskCreated(task) => {
                self.loading = false;
                self.tasks.push(task);
            }
            BoardEvent::FetchFailed(error) | BoardEvent::CreateFailed(error) => {
                self.loading = false;
                self.error = Some(error);
            }
            BoardEvent::UpdateFailed(error) | BoardEvent::DeleteFailed(error) => {
                self.error = Some(error);
            }
            BoardEvent::TaskUpdated(task) => self.replace(task),
            BoardEvent::StatusChanged(task) => {
                self.replace(task);
                self.sort_by_status();
            }
            BoardEvent::TaskDeleted(id) => {
                self.tasks.retain(|task| task.id() != id);
                self.selection.remove(id);
            }
            BoardEvent::TasksDeleted(ids) => {
                self.tasks.retain(|task| !ids.contains(&task.id()));
                self.selection.clear();
            }
            BoardEvent::FilterChanged(patch) => self.filter.merge(patch),
            BoardEvent::SelectionToggled(id) => {
                if self.find(id).is_some() {
                    self.selection.toggle(id);
                }
            }
            BoardEvent::AllSelected(ids) => {
                let tasks_ref = &self.tasks;
                self.selection.replace(
                    ids.into_iter()
                        .filter(|id| tasks_ref.iter().any(|task| task.id() == *id)),
                );
            }
            BoardEvent::SelectionCleared => self.selection.clear(),
            BoardEvent::UsersLoaded(users) => self.users = users,
        }
    }

    /// Replaces the stored task with the same identifier. Unknown tasks are
    /// ignored, so a response for a task deleted meanwhile is a no-op.
    fn replace(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|stored| stored.id() == task.id()) {
            *slot = task;
        }
    }

    /// Stable sort by status rank: todo, in progress, done.
    fn sort_by_status(&mut self) {
        self.tasks.sort_by_key(|task| task.status().sort_rank());
    }

    /// Returns all loaded tasks in list order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the loaded users.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Returns the active filter.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Returns the bulk selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns `true` while a fetch or create request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the last collaborator failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Finds a loaded task.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the tasks passing the active filter, in list order.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter.visible(&self.tasks)
    }

    /// Identifiers of the tasks passing the active filter, for "select all".
    #[must_use]
    pub fn visible_task_ids(&self) -> Vec<TaskId> {
        self.visible_tasks().into_iter().map(Task::id).collect()
    }

    /// Returns summary statistics over all loaded tasks.
    #[must_use]
    pub fn statistics(&self) -> TaskStatistics {
        TaskStatistics::from_tasks(&self.tasks)
    }

    /// Returns the counts shown on the status filter tabs.
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        let stats = self.statistics();
        StatusCounts {
            all: stats.total,
            todo: stats.count(TaskStatus::Todo),
            in_progress: stats.count(TaskStatus::InProgress),
            done: stats.count(TaskStatus::Done),
        }
    }

    /// Returns the display name of the task's assignee.
    ///
    /// Returns `None` for unassigned tasks and [`UNKNOWN_USER_NAME`] when
    /// the assignee is not among the loaded users.
    #[must_use]
    pub fn assignee_name(&self, task: &Task) -> Option<&str> {
        let assignee_id = task.assignee_id()?;
        Some(
            self.users
                .iter()
                .find(|user| user.id() == assignee_id)
                .map_or(UNKNOWN_USER_NAME, User::name),
        )
    }
}
