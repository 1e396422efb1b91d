//! Event handling and state transition logic.
//!
//! [`handle_event`] is the list controller. Every user interaction and every
//! gateway completion arrives as an [`Event`]; the handler mutates
//! [`ListState`] and returns the side effects to run as [`Action`]s. It performs
//! no I/O and never awaits, which keeps every transition synchronous and
//! deterministic.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Activate`
//! - **Filtering**: `SearchChanged`, `PageSizeChanged`
//! - **Row menu**: `EditRequested`, `DeleteRequested`, `RowAction`
//! - **Dialog**: `DialogConfirmed`, `DialogCancelled`
//! - **Navigation**: `AddRequested`, `HomeRequested`
//! - **Timers**: `NotificationExpired`
//! - **Worker**: `WorkerResponse`
//!
//! # Example
//!
//! ```rust
//! use catalog_list::app::{handle_event, Action, Event, ListState};
//!
//! let mut state = ListState::default();
//! let (_, actions) = handle_event(&mut state, &Event::Activate)?;
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), catalog_list::CatalogError>(())
//! ```

use crate::app::modes::{LoadState, RowAction};
use crate::app::routes::Route;
use crate::app::{Action, ListState};
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Banner text after a failed fetch.
pub const FETCH_FAILED_MESSAGE: &str = "failed to fetch items";

/// Banner text after a successful delete.
pub const DELETE_SUCCEEDED_MESSAGE: &str = "item deleted successfully";

/// Banner text after a failed or rejected delete.
pub const DELETE_FAILED_MESSAGE: &str = "failed to delete item";

/// Events triggered by user input, timers, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The list screen was opened; fetch the catalog.
    Activate,

    /// The search input changed.
    SearchChanged(String),

    /// The page-size selector changed. `None` or zero means "use the default".
    PageSizeChanged(Option<usize>),

    /// Edit was chosen for a product.
    EditRequested { id: String },

    /// Delete was chosen for a product; ask for confirmation first.
    DeleteRequested { id: String },

    /// A row-menu entry was chosen.
    RowAction { id: String, action: RowAction },

    /// The confirmation dialog's confirm button.
    DialogConfirmed,

    /// The confirmation dialog's cancel button.
    DialogCancelled,

    /// The "add product" button.
    AddRequested,

    /// The header link back to the product list.
    HomeRequested,

    /// A banner clear timer fired.
    NotificationExpired { generation: u64 },

    /// A gateway call finished.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates list state, and returns actions to execute.
///
/// The boolean is `true` when the view model changed and should be re-rendered.
///
/// # Errors
///
/// Reserved for transitions that cannot be applied. No current event fails:
/// gateway errors are reported through the banner, and stale ids degrade to
/// absent values.
pub fn handle_event(state: &mut ListState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Activate => {
            tracing::debug!("activating product list");
            state.load_state = LoadState::Loading;
            Ok((true, vec![Action::PostToWorker(WorkerMessage::fetch_all())]))
        }
        Event::SearchChanged(text) => {
            state.apply_search(text);
            Ok((true, vec![]))
        }
        Event::PageSizeChanged(requested) => {
            state.set_page_size(*requested);
            Ok((true, vec![]))
        }
        Event::EditRequested { id } => Ok((false, select_for_edit(state, id))),
        Event::DeleteRequested { id } => {
            request_delete(state, id);
            Ok((true, vec![]))
        }
        Event::RowAction { id, action } => match action {
            RowAction::Edit => Ok((false, select_for_edit(state, id))),
            RowAction::Delete => {
                request_delete(state, id);
                Ok((true, vec![]))
            }
        },
        Event::DialogConfirmed => {
            let Some(id) = state.confirm_delete() else {
                tracing::debug!("confirm without pending delete, ignoring");
                return Ok((false, vec![]));
            };

            tracing::debug!(product_id = %id, "delete confirmed");
            Ok((true, vec![Action::PostToWorker(WorkerMessage::delete(id))]))
        }
        Event::DialogCancelled => {
            let cancelled = state.cancel_delete();
            tracing::debug!(cancelled, "delete cancelled");
            Ok((cancelled, vec![]))
        }
        Event::AddRequested => Ok((false, vec![Action::Navigate(Route::AddProduct)])),
        Event::HomeRequested => Ok((false, vec![Action::Navigate(Route::ProductList)])),
        Event::NotificationExpired { generation } => {
            Ok((state.banner.expire(*generation), vec![]))
        }
        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
    }
}

fn handle_worker_response(state: &mut ListState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::ProductsFetched { records } => {
            state.replace_products(records.clone());
            state.load_state = LoadState::Loaded;
            (true, vec![])
        }
        WorkerResponse::FetchFailed { message } => {
            tracing::error!(error = %message, "failed to fetch products");
            state.load_state = LoadState::Failed;
            (true, notify(state, FETCH_FAILED_MESSAGE))
        }
        WorkerResponse::DeleteCompleted { id, result } if result.success => {
            let removed = state.remove_from_view(id);
            tracing::debug!(product_id = %id, removed, "product deleted");
            state.finish_delete(id);
            (true, notify(state, DELETE_SUCCEEDED_MESSAGE))
        }
        WorkerResponse::DeleteCompleted { id, result } => {
            tracing::warn!(product_id = %id, reason = %result.message, "delete rejected");
            state.finish_delete(id);
            (true, notify(state, DELETE_FAILED_MESSAGE))
        }
        WorkerResponse::DeleteFailed { id, message } => {
            tracing::error!(product_id = %id, error = %message, "failed to delete product");
            state.finish_delete(id);
            (true, notify(state, DELETE_FAILED_MESSAGE))
        }
    }
}

fn select_for_edit(state: &ListState, id: &str) -> Vec<Action> {
    let product = state.find_product(id).cloned();
    if product.is_none() {
        tracing::debug!(product_id = %id, "edit requested for unknown product");
    }

    vec![
        Action::PublishSelection(product),
        Action::Navigate(Route::edit(id)),
    ]
}

fn request_delete(state: &mut ListState, id: &str) {
    state.begin_delete(id);
    tracing::debug!(product_id = %id, "delete requested, awaiting confirmation");
}

fn notify(state: &mut ListState, message: &str) -> Vec<Action> {
    state
        .notify(message)
        .map(|generation| Action::ScheduleNotificationClear {
            generation,
            delay: state.notification_delay,
        })
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DeleteFlow;
    use crate::storage::{OperationResult, ProductRecord};
    use std::time::Duration;

    fn two_products() -> Vec<ProductRecord> {
        vec![
            ProductRecord::new("1", "Test Product 1", "Test Description 1"),
            ProductRecord::new("2", "Test Product 2", "Test Description 2"),
        ]
    }

    fn loaded_state() -> ListState {
        let mut state = ListState::default();
        handle_event(&mut state, &Event::Activate).unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::ProductsFetched {
                records: two_products(),
            }),
        )
        .unwrap();
        state
    }

    fn respond(state: &mut ListState, response: WorkerResponse) -> Vec<Action> {
        handle_event(state, &Event::WorkerResponse(response)).unwrap().1
    }

    #[test]
    fn activate_requests_fetch_and_marks_loading() {
        let mut state = ListState::default();

        let (render, actions) = handle_event(&mut state, &Event::Activate).unwrap();

        assert!(render);
        assert_eq!(state.load_state, LoadState::Loading);
        assert_eq!(actions, vec![Action::PostToWorker(WorkerMessage::fetch_all())]);
    }

    #[test]
    fn fetch_success_populates_products_and_view() {
        let state = loaded_state();

        assert_eq!(state.products.len(), 2);
        assert_eq!(state.view.len(), 2);
        assert_eq!(state.load_state, LoadState::Loaded);
    }

    #[test]
    fn fetch_failure_shows_fixed_message_and_schedules_clear() {
        let mut state = ListState::default();
        handle_event(&mut state, &Event::Activate).unwrap();

        let actions = respond(
            &mut state,
            WorkerResponse::FetchFailed {
                message: "503".to_string(),
            },
        );

        assert!(state.products.is_empty());
        assert!(state.view.is_empty());
        assert_eq!(state.banner.message(), FETCH_FAILED_MESSAGE);
        assert_eq!(state.load_state, LoadState::Failed);
        assert_eq!(
            actions,
            vec![Action::ScheduleNotificationClear {
                generation: state.banner.generation(),
                delay: Duration::from_secs(5),
            }]
        );
    }

    #[test]
    fn search_then_clear_round_trips_the_view() {
        let mut state = loaded_state();

        handle_event(&mut state, &Event::SearchChanged("1".to_string())).unwrap();
        assert_eq!(state.view.len(), 1);
        assert_eq!(state.view[0].id, "1");

        handle_event(&mut state, &Event::SearchChanged(String::new())).unwrap();
        assert_eq!(state.view.len(), 2);
    }

    #[test]
    fn page_size_change_bounds_the_view() {
        let mut state = loaded_state();

        handle_event(&mut state, &Event::PageSizeChanged(Some(1))).unwrap();
        assert_eq!(state.view.len(), 1);

        handle_event(&mut state, &Event::PageSizeChanged(Some(5))).unwrap();
        assert_eq!(state.view.len(), 2);
    }

    #[test]
    fn edit_publishes_selection_then_navigates() {
        let mut state = loaded_state();

        let (render, actions) = handle_event(
            &mut state,
            &Event::EditRequested {
                id: "1".to_string(),
            },
        )
        .unwrap();

        assert!(!render);
        assert_eq!(
            actions,
            vec![
                Action::PublishSelection(state.find_product("1").cloned()),
                Action::Navigate(Route::edit("1")),
            ]
        );
    }

    #[test]
    fn edit_of_stale_id_publishes_none() {
        let mut state = loaded_state();

        let (_, actions) = handle_event(
            &mut state,
            &Event::RowAction {
                id: "gone".to_string(),
                action: RowAction::Edit,
            },
        )
        .unwrap();

        assert_eq!(actions[0], Action::PublishSelection(None));
        assert_eq!(actions[1], Action::Navigate(Route::edit("gone")));
    }

    #[test]
    fn confirmed_delete_removes_row_on_success() {
        let mut state = loaded_state();

        handle_event(
            &mut state,
            &Event::RowAction {
                id: "1".to_string(),
                action: RowAction::Delete,
            },
        )
        .unwrap();
        assert!(state.dialog_open());

        let (_, actions) = handle_event(&mut state, &Event::DialogConfirmed).unwrap();
        assert!(!state.dialog_open());
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::delete("1".to_string()))]
        );

        respond(
            &mut state,
            WorkerResponse::DeleteCompleted {
                id: "1".to_string(),
                result: OperationResult::ok("Product deleted"),
            },
        );

        assert_eq!(state.view.len(), 1);
        assert_eq!(state.view[0].id, "2");
        assert_eq!(state.products.len(), 2);
        assert_eq!(state.banner.message(), DELETE_SUCCEEDED_MESSAGE);
        assert_eq!(state.delete_flow, DeleteFlow::Idle);
    }

    #[test]
    fn rejected_delete_is_reported_as_failure() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::DeleteRequested { id: "1".to_string() }).unwrap();
        handle_event(&mut state, &Event::DialogConfirmed).unwrap();

        respond(
            &mut state,
            WorkerResponse::DeleteCompleted {
                id: "1".to_string(),
                result: OperationResult::rejected("locked"),
            },
        );

        assert_eq!(state.view.len(), 2);
        assert_eq!(state.banner.message(), DELETE_FAILED_MESSAGE);
        assert_eq!(state.delete_flow, DeleteFlow::Idle);
    }

    #[test]
    fn failed_delete_of_unknown_id_leaves_view() {
        let mut state = loaded_state();
        handle_event(
            &mut state,
            &Event::DeleteRequested {
                id: "123".to_string(),
            },
        )
        .unwrap();
        handle_event(&mut state, &Event::DialogConfirmed).unwrap();

        respond(
            &mut state,
            WorkerResponse::DeleteFailed {
                id: "123".to_string(),
                message: "Error deleting product".to_string(),
            },
        );

        assert_eq!(state.view.len(), 2);
        assert_eq!(state.banner.message(), DELETE_FAILED_MESSAGE);
    }

    #[test]
    fn cancel_discards_pending_delete_without_gateway_call() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::DeleteRequested { id: "2".to_string() }).unwrap();
        let before = state.view.clone();

        let (render, actions) = handle_event(&mut state, &Event::DialogCancelled).unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.delete_flow, DeleteFlow::Idle);
        assert_eq!(state.view, before);
        assert_eq!(state.products.len(), 2);
    }

    #[test]
    fn confirm_without_request_is_a_no_op() {
        let mut state = loaded_state();

        let (render, actions) = handle_event(&mut state, &Event::DialogConfirmed).unwrap();

        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn add_navigates_to_add_route() {
        let mut state = loaded_state();

        let (_, actions) = handle_event(&mut state, &Event::AddRequested).unwrap();

        assert_eq!(actions, vec![Action::Navigate(Route::AddProduct)]);
    }

    #[test]
    fn home_navigates_to_list_route_without_touching_state() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SearchChanged("2".to_string())).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::HomeRequested).unwrap();

        assert!(!render);
        assert_eq!(actions, vec![Action::Navigate(Route::ProductList)]);
        assert_eq!(state.search_term, "2");
    }

    #[test]
    fn only_latest_notification_expiry_clears_banner() {
        let mut state = loaded_state();
        let first = match respond(
            &mut state,
            WorkerResponse::FetchFailed {
                message: String::new(),
            },
        )
        .as_slice()
        {
            [Action::ScheduleNotificationClear { generation, .. }] => *generation,
            other => panic!("unexpected actions: {other:?}"),
        };
        handle_event(&mut state, &Event::DeleteRequested { id: "1".to_string() }).unwrap();
        handle_event(&mut state, &Event::DialogConfirmed).unwrap();
        respond(
            &mut state,
            WorkerResponse::DeleteCompleted {
                id: "1".to_string(),
                result: OperationResult::ok("ok"),
            },
        );

        let (render, _) =
            handle_event(&mut state, &Event::NotificationExpired { generation: first }).unwrap();
        assert!(!render);
        assert_eq!(state.banner.message(), DELETE_SUCCEEDED_MESSAGE);

        let current = state.banner.generation();
        let (render, _) =
            handle_event(&mut state, &Event::NotificationExpired { generation: current }).unwrap();
        assert!(render);
        assert!(!state.banner.is_visible());
    }

    #[test]
    fn late_delete_response_does_not_close_a_newer_request() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::DeleteRequested { id: "1".to_string() }).unwrap();
        handle_event(&mut state, &Event::DialogConfirmed).unwrap();
        handle_event(&mut state, &Event::DeleteRequested { id: "2".to_string() }).unwrap();

        respond(
            &mut state,
            WorkerResponse::DeleteCompleted {
                id: "1".to_string(),
                result: OperationResult::ok("ok"),
            },
        );

        assert!(state.dialog_open());
        assert_eq!(state.delete_flow.pending_id(), Some("2"));
        assert_eq!(state.view.len(), 1);
    }
}
