//! Gateway layer: where the catalog's products come from and go to.
//!
//! The list controller depends only on the traits in [`backend`]. A file-backed
//! implementation is provided for local use and tests.
//!
//! # Modules
//!
//! - `backend`: [`CatalogGateway`] and [`DeletionGateway`] traits
//! - `json`: JSON file implementation of both gateways
//! - `models`: Raw wire records and operation results

pub mod backend;
pub mod json;
pub mod models;

pub use backend::{CatalogGateway, DeletionGateway};
pub use json::JsonCatalog;
pub use models::{FetchResult, OperationResult, ProductRecord};
