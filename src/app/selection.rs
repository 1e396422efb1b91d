//! Single-slot channel carrying the product picked for editing.
//!
//! The list publishes the selected product (or `None` for a stale id) right
//! before navigating to the edit screen, which reads the latest value. There is
//! no history: every publish overwrites the slot.

use crate::domain::Product;
use tokio::sync::watch;

/// Last-value channel for the product selected for editing.
#[derive(Debug, Clone)]
pub struct SelectionChannel {
    sender: watch::Sender<Option<Product>>,
}

impl SelectionChannel {
    /// Creates an empty channel.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Overwrites the slot with `product`.
    pub fn publish(&self, product: Option<Product>) {
        tracing::debug!(
            product_id = product.as_ref().map(|p| p.id.as_str()),
            "publishing selection"
        );
        self.sender.send_replace(product);
    }

    /// Returns a copy of the most recently published value.
    #[must_use]
    pub fn latest(&self) -> Option<Product> {
        self.sender.borrow().clone()
    }

    /// Returns a receiver that observes every subsequent publish.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Product>> {
        self.sender.subscribe()
    }
}

impl Default for SelectionChannel {
    fn default() -> Self {
        Self::new()
    }
}
