//! Product domain model.
//!
//! A [`Product`] is one catalog entry as the list controller sees it. Identity is
//! the `id`; every other field is display data that the controller never mutates.
//! Gateways return raw [`ProductRecord`](crate::storage::ProductRecord)s, which are
//! mapped into this type when a fetch completes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by the catalog for release and revision dates.
const CATALOG_DATE_FORMAT: &str = "%Y-%m-%d";

/// A catalog product as held by the list controller.
///
/// # Fields
///
/// - `id`: Stable unique identity
/// - `name`: Display name, matched by search
/// - `description`: Free text, matched by search
/// - `logo`: Optional logo URL
/// - `date_release`: Optional release date (`YYYY-MM-DD`)
/// - `date_revision`: Optional revision date (`YYYY-MM-DD`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub date_release: Option<String>,
    pub date_revision: Option<String>,
}

impl Product {
    /// Creates a product with only the required fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_list::domain::Product;
    ///
    /// let product = Product::new("1", "Test Product 1", "Test Description 1");
    /// assert_eq!(product.id, "1");
    /// assert!(product.logo.is_none());
    /// ```
    #[must_use]
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

    /// Returns `true` if `needle` appears in the name or description, ignoring case.
    ///
    /// `needle` must already be lowercased; the caller lowercases once per search
    /// instead of once per product.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Parses `date_release`, returning `None` when absent or malformed.
    #[must_use]
    pub fn release_date(&self) -> Option<NaiveDate> {
        parse_catalog_date(self.date_release.as_deref())
    }

    /// Parses `date_revision`, returning `None` when absent or malformed.
    #[must_use]
    pub fn revision_date(&self) -> Option<NaiveDate> {
        parse_catalog_date(self.date_revision.as_deref())
    }
}

fn parse_catalog_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    // Records sometimes carry a full ISO timestamp; the date part is enough.
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, CATALOG_DATE_FORMAT).ok()
}
