//! Shared world state for bulk operation BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasktrack::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{BulkDeleteOutcome, BulkStatusOutcome, Task, TaskBoard, User, UserId},
    services::{TaskWorkflowResult, TaskWorkflowService},
};

/// Store type used by the BDD world.
pub type TestStore = InMemoryTaskStore<DefaultClock>;

/// Service type used by the BDD world.
pub type TestWorkflowService = TaskWorkflowService<TestStore, DefaultClock>;

/// Scenario world for bulk operation behaviour tests.
pub struct BulkWorld {
    pub store: Arc<TestStore>,
    pub service: TestWorkflowService,
    pub board: TaskBoard,
    pub assignee: UserId,
    pub asked_prompt: Option<String>,
    pub delete_result: Option<TaskWorkflowResult<BulkDeleteOutcome>>,
    pub status_result: Option<TaskWorkflowResult<BulkStatusOutcome>>,
}

impl BulkWorld {
    /// Creates a world with one known user and no tasks.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let assignee = UserId::new();
        let store = Arc::new(InMemoryTaskStore::new(Arc::clone(&clock)).with_users([
            User::new(assignee, "Ops Lead", "ops@example.com", ""),
        ]));
        Self {
            service: TaskWorkflowService::new(Arc::clone(&store), clock),
            store,
            board: TaskBoard::new(),
            assignee,
            asked_prompt: None,
            delete_result: None,
            status_result: None,
        }
    }

    /// Finds a loaded task by title.
    ///
    /// # Errors
    ///
    /// Returns an error when no loaded task has the title.
    pub fn task_titled(&self, title: &str) -> Result<&Task, eyre::Report> {
        self.board
            .tasks()
            .iter()
            .find(|task| task.title().as_str() == title)
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} on the board"))
    }
}

impl Default for BulkWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BulkWorld {
    BulkWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
