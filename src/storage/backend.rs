//! Gateway abstractions for fetching and deleting catalog products.
//!
//! The list controller never talks to a transport directly. It posts messages to
//! the worker, and the worker calls these traits. Any backend (HTTP client, file,
//! in-memory fake) can sit behind them.

use crate::domain::error::Result;
use crate::storage::models::{FetchResult, OperationResult};
use async_trait::async_trait;

/// Fetches the full catalog.
///
/// # Implementations
///
/// - [`JsonCatalog`](super::JsonCatalog): JSON file on disk
///
/// # Examples
///
/// ```no_run
/// use catalog_list::storage::{CatalogGateway, JsonCatalog};
///
/// # async fn run() -> catalog_list::Result<()> {
/// let catalog = JsonCatalog::new("/tmp/catalog.json");
/// let result = catalog.fetch_all().await?;
/// println!("{} products", result.data.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Returns every record, or fails as a whole. There are no partial results.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be reached or decoded.
    async fn fetch_all(&self) -> Result<FetchResult>;
}

/// Deletes a single product by id.
#[async_trait]
pub trait DeletionGateway: Send + Sync {
    /// Deletes the product with `id`.
    ///
    /// A reachable backend that refuses the delete answers `Ok` with
    /// `success == false`; callers treat both that and `Err` as failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    async fn delete(&self, id: &str) -> Result<OperationResult>;
}
