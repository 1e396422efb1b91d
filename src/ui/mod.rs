//! Presentation collaborators of the list controller.
//!
//! Nothing here renders markup. These are the data the list hands to whatever
//! draws it, plus the two small widgets with behaviour of their own.
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready snapshot of the list
//! - [`banner`]: Self-clearing notification banner
//! - [`dialog`]: Confirm/cancel dialog for deletes

pub mod banner;
pub mod dialog;
pub mod viewmodel;

pub use banner::NotificationBanner;
pub use dialog::ConfirmDialog;
pub use viewmodel::{
    EmptyState, ListViewModel, MenuEntry, PageSizeSelector, ProductRow, SearchBarInfo,
};
