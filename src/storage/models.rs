//! Raw record types exchanged with the gateways.
//!
//! These types mirror the wire shape of the catalog service and are kept separate
//! from the domain [`Product`] so the mapping step stays explicit.

use crate::domain::Product;
use serde::{Deserialize, Serialize};

/// A product record as returned by a [`CatalogGateway`](super::CatalogGateway).
///
/// Optional display fields default to absent when missing from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_release: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_revision: Option<String>,
}

impl ProductRecord {
    /// Creates a record with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            logo: None,
            date_release: None,
            date_revision: None,
        }
    }
}

impl From<ProductRecord> for Product {
    /// Maps a raw gateway record into the view model used by the list.
    ///
    /// Blank optional fields are normalized to `None`.
    fn from(record: ProductRecord) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            logo: non_blank(record.logo),
            date_release: non_blank(record.date_release),
            date_revision: non_blank(record.date_revision),
        }
    }
}

/// Response of a fetch-all call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    /// All catalog records, in catalog order.
    pub data: Vec<ProductRecord>,
}

/// Response of a delete call.
///
/// A result with `success == false` is a failure, exactly like a transport error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
}

impl OperationResult {
    /// A successful result carrying `message`.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A rejected result carrying `message`.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
