//! Due-date display buckets.

use super::TaskStatus;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of days ahead for which a due date is shown as
/// "due in N days".
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 7;

/// Display category for a task's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "bucket", rename_all = "snake_case")]
pub enum DueDateBucket {
    /// The task has no due date.
    NoDueDate,
    /// The due date has passed and the task is not done.
    Overdue {
        /// Whole calendar days since the due date.
        days: u64,
    },
    /// The task is due today and is not done.
    DueToday,
    /// The task is due tomorrow. Applies to done tasks as well.
    DueTomorrow,
    /// The task is due within the upcoming window.
    DueInNDays {
        /// Whole calendar days until the due date.
        days: i64,
    },
    /// Any other due date, shown as a plain date.
    DueOnDate {
        /// The due date.
        date: NaiveDate,
    },
}

impl DueDateBucket {
    /// Classifies a due date with the default upcoming window.
    #[must_use]
    pub fn classify(due_date: Option<NaiveDate>, status: TaskStatus, now: NaiveDateTime) -> Self {
        DueDateClassifier::default().classify(due_date, status, now)
    }

    /// Returns `true` for buckets that flag the task as needing attention.
    #[must_use]
    pub const fn is_urgent(self) -> bool {
        matches!(self, Self::Overdue { .. } | Self::DueToday)
    }
}

impl fmt::Display for DueDateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDueDate => f.write_str("No due date"),
            Self::Overdue { days } => write!(f, "Overdue by {days} day(s)"),
            Self::DueToday => f.write_str("Due today"),
            Self::DueTomorrow => f.write_str("Due tomorrow"),
            Self::DueInNDays { days } => write!(f, "Due in {days} days"),
            Self::DueOnDate { date } => write!(f, "Due {}", date.format("%b %-d, %Y")),
        }
    }
}

/// Computes [`DueDateBucket`]s relative to a reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDateClassifier {
    upcoming_window_days: i64,
}

impl Default for DueDateClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_UPCOMING_WINDOW_DAYS)
    }
}

impl DueDateClassifier {
    /// Creates a classifier with a custom upcoming window.
    #[must_use]
    pub const fn new(upcoming_window_days: i64) -> Self {
        Self {
            upcoming_window_days,
        }
    }

    /// Classifies `due_date` for a task in `status` as seen at `now`.
    ///
    /// Both dates are compared at calendar-day granularity, so the result
    /// does not change over the course of a day. Checks run top to bottom
    /// and the first match wins. Done tasks are never overdue or due today,
    /// but still report "due tomorrow".
    #[must_use]
    pub fn classify(
        &self,
        due_date: Option<NaiveDate>,
        status: TaskStatus,
        now: NaiveDateTime,
    ) -> DueDateBucket {
        let Some(due) = due_date else {
            return DueDateBucket::NoDueDate;
        };
        let done = status == TaskStatus::Done;
        let diff_days = due.signed_duration_since(now.date()).num_days();

        if diff_days < 0 && !done {
            DueDateBucket::Overdue {
                days: diff_days.unsigned_abs(),
            }
        } else if diff_days == 0 && !done {
            DueDateBucket::DueToday
        } else if diff_days == 1 {
            DueDateBucket::DueTomorrow
        } else if diff_days > 1 && diff_days <= self.upcoming_window_days {
            DueDateBucket::DueInNDays { days: diff_days }
        } else {
            DueDateBucket::DueOnDate { date: due }
        }
    }
}
