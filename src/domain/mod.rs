//! Domain layer for the catalog list controller.
//!
//! Core types that do not depend on the runtime, the gateways or the UI.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`product`]: Product domain model
//!
//! # Examples
//!
//! ```
//! use catalog_list::domain::{Product, Result};
//!
//! fn sample() -> Result<Product> {
//!     Ok(Product::new("1", "Test Product 1", "Test Description 1"))
//! }
//! # sample().unwrap();
//! ```

pub mod error;
pub mod product;

pub use error::{CatalogError, Result};
pub use product::Product;
