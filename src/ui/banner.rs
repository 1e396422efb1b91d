//! Self-clearing notification banner.
//!
//! Each non-empty message bumps a generation counter. The runtime schedules one
//! clear per message and tags it with that generation; [`NotificationBanner::expire`]
//! ignores any generation that is no longer current, so only the latest
//! message's timer can clear the banner.

/// Transient user-facing message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationBanner {
    message: String,
    generation: u64,
}

impl NotificationBanner {
    /// Shows `message`, superseding whatever was displayed.
    ///
    /// Returns the generation to schedule a clear for, or `None` when `message`
    /// is empty (the banner is cleared immediately and nothing needs scheduling).
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_list::ui::NotificationBanner;
    ///
    /// let mut banner = NotificationBanner::default();
    /// let first = banner.show("saved").unwrap();
    /// let second = banner.show("deleted").unwrap();
    ///
    /// assert!(!banner.expire(first));
    /// assert_eq!(banner.message(), "deleted");
    /// assert!(banner.expire(second));
    /// assert!(!banner.is_visible());
    /// ```
    pub fn show(&mut self, message: impl Into<String>) -> Option<u64> {
        self.generation = self.generation.wrapping_add(1);
        self.message = message.into();
        if self.message.is_empty() {
            None
        } else {
            Some(self.generation)
        }
    }

    /// Clears the banner if `generation` is still the current one.
    ///
    /// Returns `true` if the banner was cleared.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.message.is_empty() {
            tracing::trace!(generation, current = self.generation, "ignoring stale banner clear");
            return false;
        }
        self.message.clear();
        true
    }

    /// Current message; empty when nothing is shown.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Generation of the current message.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a message is currently shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.message.is_empty()
    }
}
