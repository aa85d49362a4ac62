//! Tunable settings for the task workflow services.

use crate::task::domain::{DEFAULT_UPCOMING_WINDOW_DAYS, DueDateClassifier};
use std::time::Duration;

/// Default deadline for a single persistence request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the workflow services and the request dispatcher.
///
/// High-priority protection during bulk deletion is not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Largest number of days ahead shown as "due in N days".
    pub upcoming_window_days: i64,
    /// Deadline applied to each dispatched persistence request.
    pub request_timeout: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl WorkflowConfig {
    /// Sets the upcoming window.
    #[must_use]
    pub const fn with_upcoming_window_days(mut self, days: i64) -> Self {
        self.upcoming_window_days = days;
        self
    }

    /// Sets the per-request deadline.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns a due-date classifier using the configured window.
    #[must_use]
    pub const fn due_date_classifier(&self) -> DueDateClassifier {
        DueDateClassifier::new(self.upcoming_window_days)
    }
}
