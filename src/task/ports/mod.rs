//! Port contracts for the task workflow.
//!
//! Ports define the persistence collaborator and user-interaction seams the
//! services depend on.

pub mod comments;
pub mod confirmation;
pub mod directory;
pub mod repository;

pub use comments::CommentRepository;
pub use confirmation::BulkDeleteConfirmation;
pub use directory::UserDirectory;
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
