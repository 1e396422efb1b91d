//! Background worker for gateway calls.
//!
//! Gateway I/O runs on spawned tasks so the controller never blocks. Results are
//! delivered back to the controller as events, which keeps every state mutation
//! on the loop that owns the state.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol with trace context propagation
//! - `handler`: [`CatalogWorker`], which executes messages against the gateways

pub mod handler;
pub mod messages;

pub use handler::CatalogWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
