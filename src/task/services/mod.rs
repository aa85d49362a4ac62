//! Application services for the task workflow.

mod comments;
mod config;
pub mod dispatch;
mod workflow;

pub use comments::TaskCommentService;
pub use config::{DEFAULT_REQUEST_TIMEOUT, WorkflowConfig};
pub use dispatch::{Completion, RequestKind, RequestTicket, TaskRequestDispatcher};
pub use workflow::{
    CreateTaskRequest, EditTaskRequest, TaskWorkflowError, TaskWorkflowResult,
    TaskWorkflowService,
};
