//! View model types representing renderable list state.
//!
//! View models are computed from [`ListState`](crate::app::ListState) via
//! `compute_viewmodel()` and hold display-ready data only: formatted dates,
//! menu labels, the dialog if open, the banner if visible. Whatever renders the
//! list (terminal, web bridge, test) consumes these without touching state.

use crate::app::RowAction;
use crate::ui::dialog::ConfirmDialog;

/// Complete view model for the product list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    /// Rows currently shown, in view order.
    pub rows: Vec<ProductRow>,

    /// Search input contents.
    pub search_bar: SearchBarInfo,

    /// Page-size selector contents.
    pub page_size: PageSizeSelector,

    /// Number of shown rows; the "N results" counter.
    pub result_count: usize,

    /// Size of the full catalog.
    pub total_count: usize,

    /// Whether a fetch is in flight.
    pub loading: bool,

    /// The confirmation dialog, when open.
    pub dialog: Option<ConfirmDialog>,

    /// Banner text, when visible.
    pub banner: Option<String>,

    /// Shown when there are no rows.
    pub empty_state: Option<EmptyState>,
}

/// One row of the product table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,

    /// Release date as `dd/mm/yyyy`, or the raw value if it did not parse.
    pub date_release: Option<String>,

    /// Revision date as `dd/mm/yyyy`, or the raw value if it did not parse.
    pub date_revision: Option<String>,

    /// Entries of the row's action menu.
    pub menu: Vec<MenuEntry>,
}

/// A labelled row-menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub action: RowAction,
}

impl MenuEntry {
    /// The standard row menu: Edit, then Delete.
    #[must_use]
    pub fn standard() -> Vec<Self> {
        RowAction::ALL
            .iter()
            .map(|&action| Self {
                label: action.label(),
                action,
            })
            .collect()
    }
}

/// Search input information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search text.
    pub query: String,
}

/// Page-size drop-down information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizeSelector {
    /// Active page size.
    pub current: usize,

    /// Values offered by the drop-down.
    pub options: Vec<usize>,
}

/// Empty state message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
