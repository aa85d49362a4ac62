//! Port for asking the user to confirm a destructive action.

/// Asks the user a yes/no question before a bulk deletion.
#[cfg_attr(test, mockall::automock)]
pub trait BulkDeleteConfirmation {
    /// Shows `prompt` and returns `true` when the user agrees.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> BulkDeleteConfirmation for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
