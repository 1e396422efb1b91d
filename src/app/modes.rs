//! State machine types for the list controller.
//!
//! - [`DeleteFlow`]: the confirmation-gated delete workflow
//! - [`LoadState`]: progress of the catalog fetch
//! - [`RowAction`]: entries of the per-row action menu
//!
//! # Delete Workflow
//!
//! ```text
//!            DeleteRequested              DialogConfirmed
//!   Idle ───────────────────► Pending ───────────────────► Deleting
//!    ▲                        Confirmation                     │
//!    │      DialogCancelled       │                            │
//!    ├────────────────────────────┘                            │
//!    └──────────── DeleteCompleted / DeleteFailed ◄────────────┘
//! ```

/// Delete confirmation workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteFlow {
    /// Nothing pending.
    #[default]
    Idle,

    /// The confirmation dialog is open for `id`.
    PendingConfirmation {
        /// Identity of the product to delete.
        id: String,
        /// Display title shown in the dialog; empty if the id was unknown.
        title: String,
    },

    /// The user confirmed; the deletion gateway has not answered yet.
    Deleting {
        /// Identity of the product being deleted.
        id: String,
    },
}

impl DeleteFlow {
    /// Returns the id held by the workflow, whether awaiting confirmation or
    /// the gateway.
    #[must_use]
    pub fn pending_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::PendingConfirmation { id, .. } | Self::Deleting { id } => Some(id),
        }
    }

    /// Returns the dialog title while confirmation is outstanding.
    #[must_use]
    pub fn pending_title(&self) -> Option<&str> {
        match self {
            Self::PendingConfirmation { title, .. } => Some(title),
            Self::Idle | Self::Deleting { .. } => None,
        }
    }

    /// The dialog is open exactly while confirmation is outstanding.
    #[must_use]
    pub const fn is_dialog_open(&self) -> bool {
        matches!(self, Self::PendingConfirmation { .. })
    }
}

/// Progress of the catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// The controller has not been activated.
    #[default]
    NotLoaded,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed. No retry is attempted.
    Failed,
}

/// Entries of the per-row action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Open the edit screen for the row's product.
    Edit,
    /// Ask for confirmation, then delete the row's product.
    Delete,
}

impl RowAction {
    /// Menu entries in display order.
    pub const ALL: [Self; 2] = [Self::Edit, Self::Delete];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }
}
