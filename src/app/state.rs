//! List state and view derivation.
//!
//! [`ListState`] is the single source of truth for the product list screen. It
//! keeps the authoritative product collection apart from the derived `view`, and
//! owns the delete workflow and the notification banner.
//!
//! # View Rules
//!
//! `view` is produced by exactly one of two rules, whichever ran last:
//!
//! - **Page-size rule**: the first `page_size` products in catalog order
//! - **Search rule**: every product whose name or description contains the
//!   search text (case-insensitive), regardless of `page_size`
//!
//! The rules override each other; they do not compose. A page-size change
//! discards an active search and a search discards the page limit.
//!
//! A successful delete removes the product from `view` only. The next
//! page-size recompute brings it back until the catalog is fetched again.
//!
//! # Example
//!
//! ```rust
//! use catalog_list::app::ListState;
//! use catalog_list::storage::ProductRecord;
//!
//! let mut state = ListState::default();
//! state.replace_products(vec![
//!     ProductRecord::new("1", "Test Product 1", "Test Description 1"),
//!     ProductRecord::new("2", "Test Product 2", "Test Description 2"),
//! ]);
//!
//! state.apply_search("1");
//! assert_eq!(state.view.len(), 1);
//! ```

use super::modes::{DeleteFlow, LoadState};
use crate::domain::Product;
use crate::storage::ProductRecord;
use crate::ui::viewmodel::{
    EmptyState, ListViewModel, MenuEntry, PageSizeSelector, ProductRow, SearchBarInfo,
};
use crate::ui::{ConfirmDialog, NotificationBanner};
use crate::Config;
use chrono::NaiveDate;
use std::time::Duration;

/// Page size used when none, or zero, is requested.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Page sizes offered by the selector by default.
pub const DEFAULT_PAGE_OPTIONS: [usize; 3] = [5, 10, 20];

/// How long a notification stays visible by default.
pub const DEFAULT_NOTIFICATION_DELAY: Duration = Duration::from_secs(5);

/// Display format for release and revision dates.
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Normalizes a requested page size, falling back to [`DEFAULT_PAGE_SIZE`].
#[must_use]
pub fn effective_page_size(requested: Option<usize>) -> usize {
    match requested {
        Some(n) if n > 0 => n,
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// Central state of the product list.
#[derive(Debug, Clone)]
pub struct ListState {
    /// Authoritative collection, replaced wholesale on every fetch.
    pub products: Vec<Product>,

    /// Products currently rendered, derived from `products`.
    pub view: Vec<Product>,

    /// Current search text, possibly empty.
    pub search_term: String,

    /// Current page size; always positive.
    pub page_size: usize,

    /// Page sizes offered by the selector.
    pub page_options: Vec<usize>,

    /// Delete confirmation workflow.
    pub delete_flow: DeleteFlow,

    /// Progress of the catalog fetch.
    pub load_state: LoadState,

    /// Transient user-facing message.
    pub banner: NotificationBanner,

    /// How long a notification stays visible.
    pub notification_delay: Duration,
}

impl ListState {
    /// Creates an empty list state.
    ///
    /// `page_size` goes through [`effective_page_size`], so zero falls back to
    /// the default.
    #[must_use]
    pub fn new(page_size: usize, page_options: Vec<usize>, notification_delay: Duration) -> Self {
        Self {
            products: Vec::new(),
            view: Vec::new(),
            search_term: String::new(),
            page_size: effective_page_size(Some(page_size)),
            page_options,
            delete_flow: DeleteFlow::Idle,
            load_state: LoadState::NotLoaded,
            banner: NotificationBanner::default(),
            notification_delay,
        }
    }

    /// Creates an empty list state from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.page_size,
            config.page_options.clone(),
            config.notification_delay,
        )
    }

    /// Replaces the catalog with freshly fetched records.
    ///
    /// Maps every record into a [`Product`], resets the search text and applies
    /// the page-size rule.
    pub fn replace_products(&mut self, records: Vec<ProductRecord>) {
        self.products = records.into_iter().map(Product::from).collect();
        self.search_term.clear();
        self.apply_page_size();

        tracing::debug!(
            product_count = self.products.len(),
            view_count = self.view.len(),
            "products replaced"
        );
    }

    /// Applies the page-size rule: the first `page_size` products.
    pub fn apply_page_size(&mut self) {
        let limit = self.page_size.min(self.products.len());
        self.view = self.products[..limit].to_vec();
    }

    /// Sets the page size and applies the page-size rule.
    ///
    /// Any active search is discarded from the view (the text is kept in
    /// `search_term`, the rule is not).
    pub fn set_page_size(&mut self, requested: Option<usize>) {
        self.page_size = effective_page_size(requested);
        self.apply_page_size();

        tracing::debug!(page_size = self.page_size, view_count = self.view.len(), "page size applied");
    }

    /// Stores `text` as the search term and recomputes the view.
    ///
    /// Empty text restores the page-size rule. Otherwise the view holds every
    /// product whose name or description contains `text`, ignoring case and
    /// ignoring the page size.
    pub fn apply_search(&mut self, text: &str) {
        let _span = tracing::debug_span!(
            "apply_search",
            total_products = self.products.len(),
            query_len = text.len()
        )
        .entered();

        self.search_term = text.to_string();

        if text.is_empty() {
            self.apply_page_size();
            return;
        }

        let needle = text.to_lowercase();
        self.view = self
            .products
            .iter()
            .filter(|product| product.matches_lowercase(&needle))
            .cloned()
            .collect();

        tracing::debug!(filtered_count = self.view.len(), "search filter applied");
    }

    /// Looks a product up by id in the full collection.
    #[must_use]
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Removes `id` from the view, keeping the order of the rest.
    ///
    /// Returns `true` if a row was removed. `products` is left untouched.
    pub fn remove_from_view(&mut self, id: &str) -> bool {
        let before = self.view.len();
        self.view.retain(|product| product.id != id);
        before != self.view.len()
    }

    /// Opens the confirmation dialog for `id`.
    ///
    /// The title is the product's name, or empty if the id is not in the catalog.
    pub fn begin_delete(&mut self, id: &str) {
        let title = self
            .find_product(id)
            .map(|product| product.name.clone())
            .unwrap_or_default();

        self.delete_flow = DeleteFlow::PendingConfirmation {
            id: id.to_string(),
            title,
        };
    }

    /// Closes the dialog and moves to `Deleting`.
    ///
    /// Returns the id to delete, or `None` if no confirmation was outstanding.
    pub fn confirm_delete(&mut self) -> Option<String> {
        match std::mem::take(&mut self.delete_flow) {
            DeleteFlow::PendingConfirmation { id, .. } => {
                self.delete_flow = DeleteFlow::Deleting { id: id.clone() };
                Some(id)
            }
            other => {
                self.delete_flow = other;
                None
            }
        }
    }

    /// Closes the dialog and discards the pending context.
    ///
    /// Returns `true` if a confirmation was outstanding.
    pub fn cancel_delete(&mut self) -> bool {
        if self.delete_flow.is_dialog_open() {
            self.delete_flow = DeleteFlow::Idle;
            true
        } else {
            false
        }
    }

    /// Returns to `Idle` once the gateway has answered for `id`.
    ///
    /// A flow that has since moved on to another product is left alone.
    pub fn finish_delete(&mut self, id: &str) {
        if matches!(&self.delete_flow, DeleteFlow::Deleting { id: pending } if pending == id) {
            self.delete_flow = DeleteFlow::Idle;
        }
    }

    /// Whether the confirmation dialog is open.
    #[must_use]
    pub const fn dialog_open(&self) -> bool {
        self.delete_flow.is_dialog_open()
    }

    /// Shows `message` on the banner.
    ///
    /// Returns the generation to schedule a clear for, if any.
    pub fn notify(&mut self, message: &str) -> Option<u64> {
        tracing::debug!(message = %message, "notification raised");
        self.banner.show(message)
    }

    /// Computes a display-ready view model from the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ListViewModel {
        let rows: Vec<ProductRow> = self.view.iter().map(product_row).collect();
        let loading = self.load_state == LoadState::Loading;

        let empty_state = if !rows.is_empty() || loading {
            None
        } else if self.products.is_empty() {
            Some(EmptyState {
                message: "No products found".to_string(),
                subtitle: "Add a product to get started".to_string(),
            })
        } else if !self.search_term.is_empty() {
            Some(EmptyState {
                message: "No matching products".to_string(),
                subtitle: format!("Nothing matches \"{}\"", self.search_term),
            })
        } else {
            // Deletes only shrink the view, so a page can run dry while the
            // catalog still has products.
            Some(EmptyState {
                message: "No products on this page".to_string(),
                subtitle: "Change the page size to show the rest".to_string(),
            })
        };

        ListViewModel {
            result_count: rows.len(),
            rows,
            search_bar: SearchBarInfo {
                query: self.search_term.clone(),
            },
            page_size: PageSizeSelector {
                current: self.page_size,
                options: self.page_options.clone(),
            },
            total_count: self.products.len(),
            loading,
            dialog: self.delete_flow.pending_title().map(ConfirmDialog::new),
            banner: self
                .banner
                .is_visible()
                .then(|| self.banner.message().to_string()),
            empty_state,
        }
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(
            DEFAULT_PAGE_SIZE,
            DEFAULT_PAGE_OPTIONS.to_vec(),
            DEFAULT_NOTIFICATION_DELAY,
        )
    }
}

fn product_row(product: &Product) -> ProductRow {
    ProductRow {
        id: product.id.clone(),
        name: product.name.clone(),
        description: product.description.clone(),
        logo: product.logo.clone(),
        date_release: display_date(product.release_date(), product.date_release.as_deref()),
        date_revision: display_date(product.revision_date(), product.date_revision.as_deref()),
        menu: MenuEntry::standard(),
    }
}

fn display_date(parsed: Option<NaiveDate>, raw: Option<&str>) -> Option<String> {
    parsed
        .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
        .or_else(|| raw.map(ToString::to_string))
}
