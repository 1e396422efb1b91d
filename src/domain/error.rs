//! Error types for the catalog list controller.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] used throughout the crate. Gateway failures, file I/O, JSON decoding
//! and configuration problems all funnel into this one enum.

use thiserror::Error;

/// The main error type for catalog list operations.
///
/// Only two error classes ever reach the user: a failed fetch and a failed delete.
/// Both are reported through the notification banner with a fixed message, so the
/// variants here exist for logging and for gateway implementors, not for display.
///
/// # Examples
///
/// ```
/// use catalog_list::domain::CatalogError;
///
/// fn fetch() -> Result<(), CatalogError> {
///     Err(CatalogError::Gateway("connection refused".to_string()))
/// }
///
/// assert!(fetch().is_err());
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A gateway call failed at the transport or server level.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catalog document could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The background worker could not deliver a result.
    #[error("Worker error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for catalog list operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
