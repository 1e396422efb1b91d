//! Request/response protocol between the list controller and the catalog worker.
//!
//! The controller never awaits a gateway directly. It emits a [`WorkerMessage`],
//! the runtime hands it to the worker on a separate task, and the outcome comes
//! back as a [`WorkerResponse`] event. Each request carries the tracing context
//! of the span that issued it so gateway spans join the controller's trace.

use crate::domain::CatalogError;
use crate::storage::{OperationResult, ProductRecord};

/// Distributed tracing context for cross-task span propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current `tracing` span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is
    /// not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    fetch_all(FetchAll {}),
    delete(Delete { id: String }),
}

/// Requests sent from the controller to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Fetch every product from the catalog gateway.
    FetchAll {
        trace_context: Option<TraceContext>,
    },

    /// Delete one product through the deletion gateway.
    Delete {
        /// Identity of the product to delete.
        id: String,

        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Returns the trace context attached to this message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchAll { trace_context } | Self::Delete { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }

    /// Failure response answering this request, used when the worker task
    /// itself died before producing one.
    #[must_use]
    pub fn failure(&self, error: &CatalogError) -> WorkerResponse {
        match self {
            Self::FetchAll { .. } => WorkerResponse::FetchFailed {
                message: error.to_string(),
            },
            Self::Delete { id, .. } => WorkerResponse::DeleteFailed {
                id: id.clone(),
                message: error.to_string(),
            },
        }
    }
}

/// Outcomes sent from the worker back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    /// The catalog was fetched in full.
    ProductsFetched {
        /// Raw records in catalog order.
        records: Vec<ProductRecord>,
    },

    /// The fetch failed; `message` is for logs only.
    FetchFailed { message: String },

    /// The deletion gateway answered. `result.success` may still be `false`.
    DeleteCompleted {
        /// Identity the delete was issued for.
        id: String,
        result: OperationResult,
    },

    /// The deletion gateway could not be reached.
    DeleteFailed {
        /// Identity the delete was issued for.
        id: String,
        message: String,
    },
}
