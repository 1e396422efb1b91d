//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler mutates state and returns a `Vec<Action>`; it never
//! performs I/O itself. [`ListRuntime`](crate::runtime::ListRuntime) executes
//! the actions in order.

use crate::app::routes::Route;
use crate::domain::Product;
use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Runs a gateway call on the worker. The outcome returns as an
    /// [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
    PostToWorker(WorkerMessage),

    /// Asks the host to navigate.
    Navigate(Route),

    /// Overwrites the shared selection slot.
    PublishSelection(Option<Product>),

    /// Replaces any pending banner clear with one that fires after `delay`.
    ///
    /// The resulting `NotificationExpired` event carries `generation` so a
    /// timer that outlived its message cannot clear a newer one.
    ScheduleNotificationClear {
        /// Banner generation the clear applies to.
        generation: u64,
        /// Time until the clear fires.
        delay: Duration,
    },
}
