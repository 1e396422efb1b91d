//! Application layer: the list controller.
//!
//! Sits between the runtime shell and the domain/storage/worker layers.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → handle_event → State Mutations → Actions → Side Effects
//!                           ↑                                        ↓
//!                           └────────── Worker Responses ────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Delete workflow, load progress, row-menu entries
//! - [`routes`]: Navigation destinations and the `Navigator` seam
//! - [`selection`]: Single-slot channel for the product picked for editing
//! - [`state`]: List state and view derivation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod routes;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use handler::{
    handle_event, Event, DELETE_FAILED_MESSAGE, DELETE_SUCCEEDED_MESSAGE, FETCH_FAILED_MESSAGE,
};
pub use modes::{DeleteFlow, LoadState, RowAction};
pub use routes::{Navigator, Route};
pub use selection::SelectionChannel;
pub use state::{effective_page_size, ListState, DEFAULT_PAGE_SIZE};
