//! Catalog worker: runs one [`WorkerMessage`] against the gateways.
//!
//! The worker is stateless apart from its gateway handles, so the runtime can
//! share one instance across every spawned task. Each message is executed inside
//! its own span, parented to the controller span that issued it.

use crate::storage::{CatalogGateway, DeletionGateway};
use crate::worker::{TraceContext, WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tracing::Instrument;

/// Executes worker messages against a catalog and a deletion gateway.
#[derive(Clone)]
pub struct CatalogWorker {
    catalog: Arc<dyn CatalogGateway>,
    deletion: Arc<dyn DeletionGateway>,
}

impl CatalogWorker {
    /// Creates a worker over the given gateways.
    pub fn new(catalog: Arc<dyn CatalogGateway>, deletion: Arc<dyn DeletionGateway>) -> Self {
        Self { catalog, deletion }
    }

    /// Creates a worker where one backend serves both gateways.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: CatalogGateway + DeletionGateway + 'static,
    {
        Self {
            catalog: backend.clone(),
            deletion: backend,
        }
    }

    /// Processes a worker message and returns the response to feed back.
    ///
    /// Never fails: gateway errors become `FetchFailed` / `DeleteFailed`.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        if let Some(context) = message.trace_context() {
            attach_parent(&span, context);
        }

        async move {
            match message {
                WorkerMessage::FetchAll { .. } => self.handle_fetch_all().await,
                WorkerMessage::Delete { id, .. } => self.handle_delete(id).await,
            }
        }
        .instrument(span)
        .await
    }

    async fn handle_fetch_all(&self) -> WorkerResponse {
        match self.catalog.fetch_all().await {
            Ok(result) => {
                tracing::debug!(product_count = result.data.len(), "catalog fetched");
                WorkerResponse::ProductsFetched {
                    records: result.data,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog fetch failed");
                WorkerResponse::FetchFailed {
                    message: format!("fetch all: {e}"),
                }
            }
        }
    }

    async fn handle_delete(&self, id: String) -> WorkerResponse {
        match self.deletion.delete(&id).await {
            Ok(result) => {
                tracing::debug!(
                    product_id = %id,
                    success = result.success,
                    message = %result.message,
                    "deletion gateway answered"
                );
                WorkerResponse::DeleteCompleted { id, result }
            }
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "delete failed");
                WorkerResponse::DeleteFailed {
                    message: format!("delete {id}: {e}"),
                    id,
                }
            }
        }
    }
}

impl std::fmt::Debug for CatalogWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogWorker").finish_non_exhaustive()
    }
}

/// Rebuilds the remote OpenTelemetry parent from `context` and sets it on `span`.
fn attach_parent(span: &tracing::Span, context: &TraceContext) {
    use opentelemetry::trace::{
        SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
    };
    use tracing_opentelemetry::OpenTelemetrySpanExt;

    let (Ok(trace_id), Ok(span_id)) = (
        TraceId::from_hex(&context.trace_id),
        SpanId::from_hex(&context.parent_span_id),
    ) else {
        tracing::debug!("ignoring malformed trace context");
        return;
    };

    let remote = SpanContext::new(
        trace_id,
        span_id,
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    );
    span.set_parent(opentelemetry::Context::new().with_remote_span_context(remote));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogError, Result};
    use crate::storage::{FetchResult, OperationResult, ProductRecord};
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl CatalogGateway for Unreachable {
        async fn fetch_all(&self) -> Result<FetchResult> {
            Err(CatalogError::Gateway("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl DeletionGateway for Unreachable {
        async fn delete(&self, _id: &str) -> Result<OperationResult> {
            Err(CatalogError::Gateway("connection refused".to_string()))
        }
    }

    struct OneProduct;

    #[async_trait]
    impl CatalogGateway for OneProduct {
        async fn fetch_all(&self) -> Result<FetchResult> {
            Ok(FetchResult {
                data: vec![ProductRecord::new("1", "Test Product 1", "Test Description 1")],
            })
        }
    }

    #[async_trait]
    impl DeletionGateway for OneProduct {
        async fn delete(&self, id: &str) -> Result<OperationResult> {
            Ok(OperationResult::rejected(format!("{id} is locked")))
        }
    }

    #[tokio::test]
    async fn fetch_success_carries_records() {
        let worker = CatalogWorker::from_backend(Arc::new(OneProduct));

        let response = worker.handle_message(WorkerMessage::fetch_all()).await;

        assert!(matches!(
            response,
            WorkerResponse::ProductsFetched { ref records } if records.len() == 1
        ));
    }

    #[tokio::test]
    async fn gateway_errors_become_failure_responses() {
        let worker = CatalogWorker::from_backend(Arc::new(Unreachable));

        let fetch = worker.handle_message(WorkerMessage::fetch_all()).await;
        let delete = worker
            .handle_message(WorkerMessage::delete("9".to_string()))
            .await;

        assert!(matches!(fetch, WorkerResponse::FetchFailed { .. }));
        assert!(matches!(delete, WorkerResponse::DeleteFailed { ref id, .. } if id == "9"));
    }

    #[tokio::test]
    async fn rejected_delete_is_passed_through_unchanged() {
        let worker = CatalogWorker::from_backend(Arc::new(OneProduct));

        let response = worker
            .handle_message(WorkerMessage::delete("1".to_string()))
            .await;

        assert_eq!(
            response,
            WorkerResponse::DeleteCompleted {
                id: "1".to_string(),
                result: OperationResult::rejected("1 is locked"),
            }
        );
    }
}
