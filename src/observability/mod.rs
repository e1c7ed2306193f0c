//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     config → logging.rs (subscriber)
//!     config → tracing.rs / metrics.rs (providers)
//!     providers → telemetry.rs (facade init, falls back to inert)
//!
//! Request handlers:
//!     Telemetry::start_span → span.rs (ScopedSpan, closed on drop)
//!     Telemetry::counter    → counter.rs (Counter::add)
//! ```
//!
//! # Design Decisions
//! - Handlers never check whether telemetry is active
//! - Backend failures are logged once at init and never reach a request
//! - `memory.rs` records everything in process for tests

pub mod attributes;
pub mod counter;
pub mod logging;
pub mod memory;
pub mod metrics;
pub mod span;
pub mod telemetry;
pub mod tracing;

use thiserror::Error;

pub use attributes::{AttributeValue, KeyValue};
pub use counter::{Counter, CounterBackend, Meter, MeterProvider};
pub use span::{ScopedSpan, SpanBackend, Tracer, TracerBackend, TracerProvider};
pub use telemetry::{Telemetry, TelemetryBuilder};

/// Name of the order outcome counter.
pub const ORDERS_PROCESSED: &str = "orders_processed";

/// Errors raised while acquiring telemetry backends.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Tracer unavailable: {0}")]
    TracerUnavailable(String),

    #[error("Meter unavailable: {0}")]
    MeterUnavailable(String),

    #[error("Invalid instrument name: {0:?}")]
    InvalidInstrument(String),
}
