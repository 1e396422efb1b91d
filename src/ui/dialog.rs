//! Delete confirmation dialog.

use crate::app::Event;

/// Presentational confirmation dialog.
///
/// Holds only the title it displays. Its two buttons map to the events the
/// controller understands; it never decides anything itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    /// Name of the product about to be deleted. May be empty.
    pub title: String,
}

impl ConfirmDialog {
    /// Dialog asking to confirm deletion of `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Prompt text shown above the buttons.
    #[must_use]
    pub fn prompt(&self) -> String {
        if self.title.is_empty() {
            "Are you sure you want to delete this product?".to_string()
        } else {
            format!("Are you sure you want to delete {}?", self.title)
        }
    }

    /// Event emitted by the confirm button.
    #[must_use]
    pub fn confirm(&self) -> Event {
        Event::DialogConfirmed
    }

    /// Event emitted by the cancel button.
    #[must_use]
    pub fn cancel(&self) -> Event {
        Event::DialogCancelled
    }
}
