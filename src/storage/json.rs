//! JSON file-backed catalog gateway.
//!
//! [`JsonCatalog`] implements both [`CatalogGateway`] and [`DeletionGateway`] over
//! a single human-readable JSON document. Writes go to a temporary file that is
//! then renamed over the target, so a crash never leaves a truncated catalog.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "data": [
//!     {
//!       "id": "trj-crd",
//!       "name": "Tarjeta de credito",
//!       "description": "Tarjeta de consumo bajo la modalidad de credito",
//!       "logo": "https://example.com/logo.png",
//!       "date_release": "2025-01-01",
//!       "date_revision": "2026-01-01"
//!     }
//!   ]
//! }
//! ```

use crate::domain::error::{CatalogError, Result};
use crate::storage::backend::{CatalogGateway, DeletionGateway};
use crate::storage::models::{FetchResult, OperationResult, ProductRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// Top-level document serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogDocument {
    version: u32,

    /// Records in catalog order.
    #[serde(default)]
    data: Vec<ProductRecord>,
}

impl Default for CatalogDocument {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            data: Vec::new(),
        }
    }
}

/// JSON file catalog.
///
/// The file is read on every fetch, so edits made by other processes are picked
/// up on the next activation. Deletes hold an internal lock across the
/// read-modify-write cycle.
///
/// A missing file is an empty catalog, not an error.
#[derive(Debug)]
pub struct JsonCatalog {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonCatalog {
    /// Creates a catalog backed by `file_path`. Nothing is read until first use.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Replaces the whole catalog with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be written.
    pub async fn replace_all(&self, records: Vec<ProductRecord>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let document = CatalogDocument {
            version: FORMAT_VERSION,
            data: records,
        };
        self.save(&document).await
    }

    async fn load(&self) -> Result<CatalogDocument> {
        let contents = match tokio::fs::read_to_string(&self.file_path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.file_path, "catalog file missing, treating as empty");
                return Ok(CatalogDocument::default());
            }
            Err(e) => return Err(e.into()),
        };

        let document: CatalogDocument = serde_json::from_str(&contents)?;
        if document.version != FORMAT_VERSION {
            return Err(CatalogError::Gateway(format!(
                "unsupported catalog version {}",
                document.version
            )));
        }

        tracing::debug!(
            version = document.version,
            products = document.data.len(),
            "loaded catalog document"
        );
        Ok(document)
    }

    async fn save(&self, document: &CatalogDocument) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(document)?;
        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.file_path).await?;

        tracing::debug!(path = ?self.file_path, products = document.data.len(), "catalog saved");
        Ok(())
    }
}

#[async_trait]
impl CatalogGateway for JsonCatalog {
    async fn fetch_all(&self) -> Result<FetchResult> {
        let document = self.load().await?;
        Ok(FetchResult {
            data: document.data,
        })
    }
}

#[async_trait]
impl DeletionGateway for JsonCatalog {
    async fn delete(&self, id: &str) -> Result<OperationResult> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;

        let before = document.data.len();
        document.data.retain(|record| record.id != id);

        if document.data.len() == before {
            tracing::debug!(product_id = %id, "delete requested for unknown product");
            return Ok(OperationResult::rejected(format!("product {id} not found")));
        }

        self.save(&document).await?;
        Ok(OperationResult::ok(format!("product {id} deleted")))
    }
}
