//! Asynchronous persistence requests with latest-wins sequencing.
//!
//! Each request runs as its own tokio task and reports back through a
//! channel as a [`Completion`]. Responses may arrive in any order; the
//! dispatcher decides which ones are still current:
//!
//! - fetch-all, update and delete requests are keyed by kind and task, and
//!   a newer request with the same key supersedes the older one, whose
//!   response is then dropped;
//! - a superseded fetch or delete is aborted, but a superseded update still
//!   reaches the store: updates of one task run one after another in issue
//!   order, so no edit is lost;
//! - a delete, single or bulk, supersedes every in-flight update for the
//!   deleted tasks, so an update response can never resurrect a deleted
//!   task;
//! - creates and bulk deletes each describe distinct work and are never
//!   superseded.
//!
//! The owner of the [`TaskBoard`](crate::task::domain::TaskBoard) drains
//! the completion channel and applies whatever
//! [`TaskRequestDispatcher::accept`] returns.

use crate::task::{
    domain::{BoardEvent, NewTask, TaskId, TaskPatch},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

use super::WorkflowConfig;

/// Kind of persistence request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Fetch the whole task collection.
    FetchAll,
    /// Create one task.
    Create,
    /// Update one task.
    Update,
    /// Delete one task.
    Delete,
    /// Delete several tasks.
    BulkDelete,
}

impl RequestKind {
    /// Returns `true` when a newer request with the same key makes an older
    /// one obsolete.
    #[must_use]
    pub const fn is_superseding(self) -> bool {
        matches!(self, Self::FetchAll | Self::Update | Self::Delete)
    }

    /// Returns `true` when requests with the same key must run in issue
    /// order instead of aborting each other.
    #[must_use]
    pub const fn is_serialized(self) -> bool {
        matches!(self, Self::Update)
    }
}

/// Identity used to decide which requests supersede each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestKey {
    kind: RequestKind,
    task_id: Option<TaskId>,
}

impl RequestKey {
    const fn new(kind: RequestKind, task_id: Option<TaskId>) -> Self {
        Self { kind, task_id }
    }

    /// Returns the request kind.
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Returns the task the request targets, if it targets exactly one.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }
}

/// Handle identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    key: RequestKey,
    generation: u64,
}

impl RequestTicket {
    /// Returns the request key.
    #[must_use]
    pub const fn key(&self) -> RequestKey {
        self.key
    }
}

/// A finished request and the board event it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    ticket: RequestTicket,
    event: BoardEvent,
}

impl Completion {
    /// Returns the ticket of the finished request.
    #[must_use]
    pub const fn ticket(&self) -> RequestTicket {
        self.ticket
    }

    /// Returns the event the request produced.
    #[must_use]
    pub const fn event(&self) -> &BoardEvent {
        &self.event
    }
}

struct InFlight {
    generation: u64,
    handle: JoinHandle<()>,
    /// Earlier serialized requests for the same key that may still be
    /// running.
    earlier: Vec<AbortHandle>,
}

impl InFlight {
    fn abort(self) {
        for earlier in self.earlier {
            earlier.abort();
        }
        self.handle.abort();
    }
}

type InFlightMap = HashMap<RequestKey, InFlight>;

/// Issues persistence requests as cancellable tokio tasks.
///
/// Requests must be issued from within a tokio runtime.
pub struct TaskRequestDispatcher<R> {
    repository: Arc<R>,
    request_timeout: Duration,
    sender: mpsc::UnboundedSender<Completion>,
    in_flight: Mutex<InFlightMap>,
    next_generation: AtomicU64,
}

impl<R> TaskRequestDispatcher<R>
where
    R: TaskRepository + 'static,
{
    /// Creates a dispatcher and the receiver its completions arrive on.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        config: &WorkflowConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let dispatcher = Self {
            repository,
            request_timeout: config.request_timeout,
            sender,
            in_flight: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
        };
        (dispatcher, receiver)
    }

    /// Fetches the whole collection. Supersedes an earlier fetch.
    pub fn fetch_tasks(&self) -> RequestTicket {
        let repository = Arc::clone(&self.repository);
        let timeout = self.request_timeout;
        self.launch(
            RequestKey::new(RequestKind::FetchAll, None),
            &[],
            async move {
                match bounded(timeout, repository.fetch_all()).await {
                    Ok(tasks) => BoardEvent::TasksLoaded(tasks),
                    Err(err) => failure(&err, BoardEvent::FetchFailed, "Failed to fetch tasks"),
                }
            },
        )
    }

    /// Creates a task.
    pub fn create_task(&self, new_task: NewTask) -> RequestTicket {
        let repository = Arc::clone(&self.repository);
        let timeout = self.request_timeout;
        self.launch(
            RequestKey::new(RequestKind::Create, None),
            &[],
            async move {
                match bounded(timeout, repository.create(&new_task)).await {
                    Ok(task) => BoardEvent::TaskCreated(task),
                    Err(err) => failure(&err, BoardEvent::CreateFailed, "Failed to create task"),
                }
            },
        )
    }

    /// Updates a task. Supersedes an earlier update of the same task.
    ///
    /// The new update starts once every earlier update of the task has
    /// finished, so each patch is written even though only the latest
    /// response is applied.
    ///
    /// Patches that change the status complete as
    /// [`BoardEvent::StatusChanged`] so the list is re-sorted.
    pub fn update_task(&self, id: TaskId, patch: TaskPatch) -> RequestTicket {
        let repository = Arc::clone(&self.repository);
        let timeout = self.request_timeout;
        self.launch(
            RequestKey::new(RequestKind::Update, Some(id)),
            &[],
            async move {
                match bounded(timeout, repository.update(id, &patch)).await {
                    Ok(task) if patch.status_change().is_some() => BoardEvent::StatusChanged(task),
                    Ok(task) => BoardEvent::TaskUpdated(task),
                    Err(err) => failure(&err, BoardEvent::UpdateFailed, "Failed to update task"),
                }
            },
        )
    }

    /// Deletes a task. Supersedes in-flight updates of the same task.
    pub fn delete_task(&self, id: TaskId) -> RequestTicket {
        let repository = Arc::clone(&self.repository);
        let timeout = self.request_timeout;
        self.launch(
            RequestKey::new(RequestKind::Delete, Some(id)),
            &[RequestKey::new(RequestKind::Update, Some(id))],
            async move {
                match bounded(timeout, repository.delete(id)).await {
                    Ok(()) => BoardEvent::TaskDeleted(id),
                    Err(err) => failure(&err, BoardEvent::DeleteFailed, "Failed to delete task"),
                }
            },
        )
    }

    /// Deletes several tasks. Supersedes in-flight updates of every listed
    /// task.
    pub fn bulk_delete(&self, ids: Vec<TaskId>) -> RequestTicket {
        let repository = Arc::clone(&self.repository);
        let timeout = self.request_timeout;
        let superseded: Vec<RequestKey> = ids
            .iter()
            .map(|id| RequestKey::new(RequestKind::Update, Some(*id)))
            .collect();
        self.launch(
            RequestKey::new(RequestKind::BulkDelete, None),
            &superseded,
            async move {
                let outcome = bounded(timeout, repository.bulk_delete(&ids)).await;
                match outcome {
                    Ok(_) => BoardEvent::TasksDeleted(ids),
                    Err(err) => failure(&err, BoardEvent::DeleteFailed, "Failed to delete tasks"),
                }
            },
        )
    }

    /// Returns the completion's event when its request is still current.
    ///
    /// Completions of superseded requests yield `None` and must not be
    /// applied.
    pub fn accept(&self, completion: Completion) -> Option<BoardEvent> {
        let Completion { ticket, event } = completion;
        if !ticket.key.kind.is_superseding() {
            return Some(event);
        }

        let mut in_flight = self.lock_in_flight();
        let is_current = in_flight
            .get(&ticket.key)
            .is_some_and(|entry| entry.generation == ticket.generation);
        if is_current {
            in_flight.remove(&ticket.key);
            Some(event)
        } else {
            debug!(kind = ?ticket.key.kind, task_id = ?ticket.key.task_id, "dropping superseded response");
            None
        }
    }

    /// Returns `true` when `ticket` is the latest pending request for its
    /// key.
    #[must_use]
    pub fn is_pending(&self, ticket: RequestTicket) -> bool {
        self.lock_in_flight()
            .get(&ticket.key)
            .is_some_and(|entry| entry.generation == ticket.generation)
    }

    fn launch<F>(&self, key: RequestKey, supersedes: &[RequestKey], work: F) -> RequestTicket
    where
        F: Future<Output = BoardEvent> + Send + 'static,
    {
        let ticket = RequestTicket {
            key,
            generation: self.next_generation.fetch_add(1, Ordering::Relaxed),
        };
        let sender = self.sender.clone();

        // Held until the new request is registered so its completion cannot
        // be judged against the previous generation.
        let mut in_flight = self.lock_in_flight();
        for superseded in supersedes {
            abort_entry(&mut in_flight, superseded);
        }

        let (predecessor, mut earlier) = if key.kind.is_serialized() {
            in_flight.remove(&key).map_or((None, Vec::new()), |previous| {
                debug!(kind = ?key.kind, task_id = ?key.task_id, "queueing behind in-flight request");
                let mut chain = previous.earlier;
                chain.push(previous.handle.abort_handle());
                (Some(previous.handle), chain)
            })
        } else {
            abort_entry(&mut in_flight, &key);
            (None, Vec::new())
        };
        earlier.retain(|handle| !handle.is_finished());

        let handle = tokio::spawn(async move {
            if let Some(previous) = predecessor
                && previous.await.is_err()
            {
                debug!(kind = ?ticket.key.kind, "earlier request was aborted");
            }
            let event = work.await;
            if sender.send(Completion { ticket, event }).is_err() {
                debug!(kind = ?ticket.key.kind, "completion receiver dropped");
            }
        });

        if key.kind.is_superseding() {
            in_flight.insert(
                key,
                InFlight {
                    generation: ticket.generation,
                    handle,
                    earlier,
                },
            );
        }
        ticket
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, InFlightMap> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R> Drop for TaskRequestDispatcher<R> {
    fn drop(&mut self) {
        let in_flight = self
            .in_flight
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, entry) in in_flight.drain() {
            entry.abort();
        }
    }
}

fn abort_entry(in_flight: &mut InFlightMap, key: &RequestKey) {
    if let Some(previous) = in_flight.remove(key) {
        debug!(kind = ?key.kind, task_id = ?key.task_id, "superseding in-flight request");
        previous.abort();
    }
}

async fn bounded<T>(
    timeout: Duration,
    request: impl Future<Output = TaskRepositoryResult<T>>,
) -> TaskRepositoryResult<T> {
    tokio::time::timeout(timeout, request)
        .await
        .map_err(|_| TaskRepositoryError::Timeout(timeout))?
}

fn failure(
    err: &TaskRepositoryError,
    event: fn(String) -> BoardEvent,
    message: &str,
) -> BoardEvent {
    warn!(error = %err, "{message}");
    event(message.to_owned())
}
