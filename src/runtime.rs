//! Runtime shell that executes controller actions.
//!
//! [`ListRuntime`] owns the [`ListState`] and is the only thing that mutates
//! it. Gateway calls run on spawned tokio tasks; their results come back
//! through the runtime's event queue and are applied one at a time, so two
//! completions never touch the state concurrently. Completions apply in
//! whatever order they resolve.
//!
//! ```text
//! ┌───────────────────────────┐   PostToWorker    ┌──────────────────┐
//! │        ListRuntime        │ ────────────────► │ spawned task     │
//! │  ┌─────────────────────┐  │                   │  CatalogWorker   │
//! │  │ ListState (owned)   │  │ ◄──────────────── │  → gateways      │
//! │  └─────────────────────┘  │  Event queue      └──────────────────┘
//! │  Navigator · Selection    │ ◄──── banner clear timer (one at a time)
//! └───────────────────────────┘
//! ```
//!
//! All methods that execute actions must be called from within a tokio runtime.

use crate::app::{handle_event, Action, Event, ListState, Navigator, SelectionChannel};
use crate::storage::JsonCatalog;
use crate::ui::ListViewModel;
use crate::worker::{CatalogWorker, WorkerMessage};
use crate::{CatalogError, Config};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Drives a [`ListState`] by executing the actions its events produce.
pub struct ListRuntime {
    state: ListState,
    worker: CatalogWorker,
    navigator: Box<dyn Navigator + Send>,
    selection: SelectionChannel,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    clear_timer: Option<JoinHandle<()>>,
}

impl ListRuntime {
    /// Creates a runtime around an existing state and worker.
    pub fn new(
        state: ListState,
        worker: CatalogWorker,
        navigator: Box<dyn Navigator + Send>,
        selection: SelectionChannel,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state,
            worker,
            navigator,
            selection,
            events_tx,
            events_rx,
            clear_timer: None,
        }
    }

    /// Creates a runtime backed by the JSON catalog named in `config`.
    pub fn from_config(config: &Config, navigator: Box<dyn Navigator + Send>) -> Self {
        let catalog = Arc::new(JsonCatalog::new(config.catalog_file.clone()));
        tracing::debug!(catalog = ?catalog.path(), "using JSON catalog");

        Self::new(
            ListState::from_config(config),
            CatalogWorker::from_backend(catalog),
            navigator,
            SelectionChannel::new(),
        )
    }

    /// Current list state.
    #[must_use]
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// Channel the edit screen reads the selected product from.
    #[must_use]
    pub const fn selection(&self) -> &SelectionChannel {
        &self.selection
    }

    /// Display-ready snapshot of the list.
    #[must_use]
    pub fn viewmodel(&self) -> ListViewModel {
        self.state.compute_viewmodel()
    }

    /// Returns a sender for feeding events from elsewhere (UI callbacks, tests).
    #[must_use]
    pub fn events(&self) -> mpsc::UnboundedSender<Event> {
        self.events_tx.clone()
    }

    /// Handles `event` immediately and executes the resulting actions.
    ///
    /// Returns `true` if the view model changed.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.state, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Waits for the next queued event (a gateway completion, a timer, or an
    /// event sent through [`events`](Self::events)) and dispatches it.
    ///
    /// Returns `true` if the view model changed.
    pub async fn process_next(&mut self) -> bool {
        // The runtime holds a sender itself, so the queue never closes.
        match self.events_rx.recv().await {
            Some(event) => self.dispatch(&event),
            None => false,
        }
    }

    /// Dispatches every event already queued without waiting for more.
    ///
    /// Returns the number of events processed.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(&event);
            processed += 1;
        }
        processed
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::PostToWorker(message) => self.post_to_worker(message),
            Action::Navigate(route) => {
                tracing::debug!(route = %route, "navigating");
                self.navigator.navigate(&route);
            }
            Action::PublishSelection(product) => self.selection.publish(product),
            Action::ScheduleNotificationClear { generation, delay } => {
                self.schedule_notification_clear(generation, delay);
            }
        }
    }

    /// Runs `message` on its own task. A worker task that panics or is
    /// cancelled still answers, with the failure response for its request.
    fn post_to_worker(&self, message: WorkerMessage) {
        let worker = self.worker.clone();
        let events = self.events_tx.clone();
        let request = message.clone();

        tokio::spawn(async move {
            let task = tokio::spawn(async move { worker.handle_message(message).await });
            let response = match task.await {
                Ok(response) => response,
                Err(e) => {
                    let error = CatalogError::Worker(e.to_string());
                    tracing::error!(error = %error, "worker task did not complete");
                    request.failure(&error)
                }
            };
            if events.send(Event::WorkerResponse(response)).is_err() {
                tracing::debug!("runtime dropped before worker response arrived");
            }
        });
    }

    /// Replaces the pending banner clear, if any, with a new one.
    fn schedule_notification_clear(&mut self, generation: u64, delay: Duration) {
        if let Some(previous) = self.clear_timer.take() {
            previous.abort();
        }

        let events = self.events_tx.clone();
        self.clear_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(Event::NotificationExpired { generation });
        }));

        tracing::trace!(generation, delay_ms = delay.as_millis(), "banner clear scheduled");
    }
}

impl Drop for ListRuntime {
    fn drop(&mut self) {
        if let Some(timer) = self.clear_timer.take() {
            timer.abort();
        }
    }
}

impl std::fmt::Debug for ListRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListRuntime")
            .field("state", &self.state)
            .field("worker", &self.worker)
            .field("timer_pending", &self.clear_timer.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Route, DELETE_FAILED_MESSAGE, DELETE_SUCCEEDED_MESSAGE, FETCH_FAILED_MESSAGE};
    use crate::app::LoadState;
    use crate::storage::{
        CatalogGateway, DeletionGateway, FetchResult, OperationResult, ProductRecord,
    };
    use crate::CatalogError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;

    #[derive(Default)]
    struct FakeCatalog {
        records: Mutex<Vec<ProductRecord>>,
        fail_fetch: AtomicBool,
        fail_delete: AtomicBool,
        panic_fetch: AtomicBool,
        panic_delete: AtomicBool,
        deleted: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        fn with_products(count: usize) -> Arc<Self> {
            let records = (1..=count)
                .map(|i| {
                    ProductRecord::new(
                        i.to_string(),
                        format!("Test Product {i}"),
                        format!("Test Description {i}"),
                    )
                })
                .collect();
            Arc::new(Self {
                records: Mutex::new(records),
                ..Self::default()
            })
        }
    }

    #[async_trait]
    impl CatalogGateway for FakeCatalog {
        async fn fetch_all(&self) -> crate::Result<FetchResult> {
            assert!(!self.panic_fetch.load(Ordering::SeqCst), "catalog backend crashed");
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(CatalogError::Gateway("connection refused".to_string()));
            }
            Ok(FetchResult {
                data: self.records.lock().unwrap().clone(),
            })
        }
    }

    #[async_trait]
    impl DeletionGateway for FakeCatalog {
        async fn delete(&self, id: &str) -> crate::Result<OperationResult> {
            assert!(!self.panic_delete.load(Ordering::SeqCst), "deletion backend crashed");
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(CatalogError::Gateway("connection reset".to_string()));
            }
            self.deleted.lock().unwrap().push(id.to_string());
            Ok(OperationResult::ok("deleted"))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNavigator {
        routes: Arc<Mutex<Vec<Route>>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: &Route) {
            self.routes.lock().unwrap().push(route.clone());
        }
    }

    fn runtime_over(catalog: Arc<FakeCatalog>) -> (ListRuntime, RecordingNavigator) {
        let navigator = RecordingNavigator::default();
        let runtime = ListRuntime::new(
            ListState::default(),
            CatalogWorker::from_backend(catalog),
            Box::new(navigator.clone()),
            SelectionChannel::new(),
        );
        (runtime, navigator)
    }

    fn view_ids(runtime: &ListRuntime) -> Vec<String> {
        runtime.state().view.iter().map(|p| p.id.clone()).collect()
    }

    async fn activate(runtime: &mut ListRuntime) {
        runtime.dispatch(&Event::Activate);
        assert_eq!(runtime.state().load_state, LoadState::Loading);
        runtime.process_next().await;
    }

    async fn delete(runtime: &mut ListRuntime, id: &str) {
        runtime.dispatch(&Event::DeleteRequested { id: id.to_string() });
        runtime.dispatch(&Event::DialogConfirmed);
        runtime.process_next().await;
    }

    #[tokio::test(start_paused = true)]
    async fn activation_loads_first_page() {
        let (mut runtime, _) = runtime_over(FakeCatalog::with_products(7));

        activate(&mut runtime).await;

        assert_eq!(runtime.state().load_state, LoadState::Loaded);
        assert_eq!(runtime.state().products.len(), 7);
        assert_eq!(view_ids(&runtime), ["1", "2", "3", "4", "5"]);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_failure_banner_clears_after_delay() {
        let catalog = FakeCatalog::with_products(3);
        catalog.fail_fetch.store(true, Ordering::SeqCst);
        let (mut runtime, _) = runtime_over(catalog);
        let started = Instant::now();

        activate(&mut runtime).await;

        assert_eq!(runtime.state().load_state, LoadState::Failed);
        assert!(runtime.state().products.is_empty());
        assert_eq!(runtime.viewmodel().banner.as_deref(), Some(FETCH_FAILED_MESSAGE));

        assert!(runtime.process_next().await);
        assert!(started.elapsed() >= Duration::from_secs(5));
        assert!(runtime.viewmodel().banner.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn latest_notification_governs_the_clear() {
        let catalog = FakeCatalog::with_products(3);
        let (mut runtime, _) = runtime_over(catalog.clone());
        activate(&mut runtime).await;

        delete(&mut runtime, "1").await;
        assert_eq!(runtime.viewmodel().banner.as_deref(), Some(DELETE_SUCCEEDED_MESSAGE));
        let first_shown = Instant::now();

        tokio::time::advance(Duration::from_secs(3)).await;
        catalog.fail_delete.store(true, Ordering::SeqCst);
        delete(&mut runtime, "2").await;
        assert_eq!(runtime.viewmodel().banner.as_deref(), Some(DELETE_FAILED_MESSAGE));

        // Past the first message's deadline: nothing may clear the second one.
        tokio::time::advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        runtime.process_pending();
        assert_eq!(runtime.viewmodel().banner.as_deref(), Some(DELETE_FAILED_MESSAGE));

        runtime.process_next().await;
        assert!(runtime.viewmodel().banner.is_none());
        assert!(first_shown.elapsed() >= Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_fetch_still_reports_failure() {
        let catalog = FakeCatalog::with_products(3);
        catalog.panic_fetch.store(true, Ordering::SeqCst);
        let (mut runtime, _) = runtime_over(catalog);

        activate(&mut runtime).await;

        let viewmodel = runtime.viewmodel();
        assert_eq!(runtime.state().load_state, LoadState::Failed);
        assert!(!viewmodel.loading);
        assert_eq!(viewmodel.banner.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(viewmodel.empty_state.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_delete_returns_flow_to_idle() {
        let catalog = FakeCatalog::with_products(3);
        let (mut runtime, _) = runtime_over(catalog.clone());
        activate(&mut runtime).await;
        catalog.panic_delete.store(true, Ordering::SeqCst);

        delete(&mut runtime, "2").await;

        assert_eq!(runtime.state().delete_flow, crate::app::DeleteFlow::Idle);
        assert_eq!(runtime.viewmodel().banner.as_deref(), Some(DELETE_FAILED_MESSAGE));
        assert_eq!(view_ids(&runtime), ["1", "2", "3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_delete_reaches_gateway_and_leaves_view() {
        let catalog = FakeCatalog::with_products(3);
        let (mut runtime, _) = runtime_over(catalog.clone());
        activate(&mut runtime).await;

        runtime.dispatch(&Event::DeleteRequested { id: "2".to_string() });
        let dialog = runtime.viewmodel().dialog.unwrap();
        assert_eq!(dialog.title, "Test Product 2");

        runtime.dispatch(&dialog.confirm());
        assert!(runtime.viewmodel().dialog.is_none());
        runtime.process_next().await;

        assert_eq!(*catalog.deleted.lock().unwrap(), ["2"]);
        assert_eq!(view_ids(&runtime), ["1", "3"]);
        assert_eq!(runtime.state().products.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn deleted_product_resurfaces_on_page_size_change() {
        let (mut runtime, _) = runtime_over(FakeCatalog::with_products(3));
        activate(&mut runtime).await;
        delete(&mut runtime, "1").await;
        assert_eq!(view_ids(&runtime), ["2", "3"]);

        runtime.dispatch(&Event::PageSizeChanged(Some(10)));

        assert_eq!(view_ids(&runtime), ["1", "2", "3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_delete_never_reaches_gateway() {
        let catalog = FakeCatalog::with_products(2);
        let (mut runtime, _) = runtime_over(catalog.clone());
        activate(&mut runtime).await;

        runtime.dispatch(&Event::DeleteRequested { id: "1".to_string() });
        runtime.dispatch(&Event::DialogCancelled);
        tokio::task::yield_now().await;

        assert_eq!(runtime.process_pending(), 0);
        assert!(catalog.deleted.lock().unwrap().is_empty());
        assert_eq!(view_ids(&runtime), ["1", "2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_publishes_selection_then_navigates() {
        let (mut runtime, navigator) = runtime_over(FakeCatalog::with_products(3));
        activate(&mut runtime).await;
        let mut selected = runtime.selection().subscribe();

        runtime.dispatch(&Event::RowAction {
            id: "2".to_string(),
            action: crate::RowAction::Edit,
        });

        assert!(selected.has_changed().unwrap());
        assert_eq!(selected.borrow_and_update().as_ref().map(|p| p.name.as_str()), Some("Test Product 2"));
        assert_eq!(*navigator.routes.lock().unwrap(), [Route::edit("2")]);

        runtime.dispatch(&Event::EditRequested { id: "missing".to_string() });
        assert!(runtime.selection().latest().is_none());
        assert_eq!(navigator.routes.lock().unwrap().last(), Some(&Route::edit("missing")));
    }

    #[tokio::test(start_paused = true)]
    async fn add_navigates_to_empty_form() {
        let (mut runtime, navigator) = runtime_over(FakeCatalog::with_products(0));

        runtime.dispatch(&Event::AddRequested);

        assert_eq!(*navigator.routes.lock().unwrap(), [Route::AddProduct]);
    }

    #[tokio::test(start_paused = true)]
    async fn externally_sent_events_are_processed() {
        let (mut runtime, _) = runtime_over(FakeCatalog::with_products(6));
        activate(&mut runtime).await;

        runtime
            .events()
            .send(Event::SearchChanged("product 6".to_string()))
            .unwrap();

        assert!(runtime.process_next().await);
        assert_eq!(view_ids(&runtime), ["6"]);
    }
}
