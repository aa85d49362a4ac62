//! Domain model for the task workflow.
//!
//! The domain covers task entities, the status workflow, the
//! priority/assignee rule, due-date classification, filtering, and bulk
//! planning. Everything here is synchronous and free of infrastructure
//! concerns; the board reducer is the only place where task list state
//! changes.

mod board;
mod bulk;
mod comment;
mod due_date;
mod error;
mod filter;
mod ids;
mod priority;
mod selection;
mod stats;
mod status;
mod task;
mod user;

pub use board::{BoardEvent, StatusCounts, TaskBoard};
pub use bulk::{BulkDeleteOutcome, BulkDeletePlan, BulkStatusOutcome, BulkStatusPlan};
pub use comment::{Comment, NewComment};
pub use due_date::{DEFAULT_UPCOMING_WINDOW_DAYS, DueDateBucket, DueDateClassifier};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use filter::{FilterPatch, StatusFilter, TaskFilter};
pub use ids::{CommentId, TaskId, UserId};
pub use priority::TaskPriority;
pub use selection::Selection;
pub use stats::TaskStatistics;
pub use status::{TaskStatus, is_valid_transition};
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch, TaskTitle, check_priority_assignee};
pub use user::{UNKNOWN_USER_NAME, User};
