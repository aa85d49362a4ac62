//! The set of tasks marked for bulk operations.

use super::TaskId;
use serde::{Deserialize, Serialize};

/// Selected task identifiers, without duplicates, in the order they were
/// selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: Vec<TaskId>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Adds `id` if absent, removes it if present.
    pub fn toggle(&mut self, id: TaskId) {
        if self.contains(id) {
            self.remove(id);
        } else {
            self.ids.push(id);
        }
    }

    /// Replaces the whole selection, dropping duplicates.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = TaskId>) {
        self.ids.clear();
        for id in ids {
            if !self.contains(id) {
                self.ids.push(id);
            }
        }
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Removes `id` if present.
    pub fn remove(&mut self, id: TaskId) {
        self.ids.retain(|selected| *selected != id);
    }

    /// Keeps only the identifiers for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(TaskId) -> bool) {
        self.ids.retain(|id| keep(*id));
    }

    /// Returns `true` when `id` is selected.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns the number of selected tasks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over the selected identifiers in selection order.
    pub fn iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.ids.iter().copied()
    }

    /// Returns the selected identifiers as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[TaskId] {
        &self.ids
    }
}
