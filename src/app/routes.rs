//! Navigation destinations.
//!
//! The controller only emits navigation intents; whatever hosts it decides what
//! a [`Route`] means. [`Navigator`] is that host-side seam.

use std::fmt;

/// A navigation destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// The product list itself.
    ProductList,
    /// Edit screen for one product.
    EditProduct { id: String },
    /// Empty form for a new product.
    AddProduct,
}

impl Route {
    /// Edit destination for `id`.
    pub fn edit(id: impl Into<String>) -> Self {
        Self::EditProduct { id: id.into() }
    }

    /// Path string of the destination.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_list::app::Route;
    ///
    /// assert_eq!(Route::edit("42").path(), "/products/edit/42");
    /// assert_eq!(Route::AddProduct.path(), "/products/add");
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::ProductList => "/products".to_string(),
            Self::EditProduct { id } => format!("/products/edit/{id}"),
            Self::AddProduct => "/products/add".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Receives navigation intents from the runtime.
pub trait Navigator {
    /// Navigates to `route`. Fire-and-forget; the controller does not wait.
    fn navigate(&self, route: &Route);
}
