//! Shared world state for task status transition BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasktrack::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Task, TaskBoard},
    services::{TaskWorkflowResult, TaskWorkflowService},
};

/// Service type used by the BDD world.
pub type TestWorkflowService = TaskWorkflowService<InMemoryTaskStore<DefaultClock>, DefaultClock>;

/// Scenario world for status transition behaviour tests.
pub struct StatusWorld {
    pub service: TestWorkflowService,
    pub board: TaskBoard,
    pub last_move_result: Option<TaskWorkflowResult<Task>>,
}

impl StatusWorld {
    /// Creates a world with an empty store and board.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let service = TaskWorkflowService::new(
            Arc::new(InMemoryTaskStore::new(Arc::clone(&clock))),
            clock,
        );
        Self {
            service,
            board: TaskBoard::new(),
            last_move_result: None,
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

impl Default for StatusWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> StatusWorld {
    StatusWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
