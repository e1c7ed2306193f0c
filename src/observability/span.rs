//! Scoped spans.
//!
//! # Responsibilities
//! - Define the tracer backend seam (`TracerProvider`, `TracerBackend`, `SpanBackend`)
//! - Select between an active and an inert tracer once, at init
//! - Close every span exactly once through the `ScopedSpan` guard
//!
//! # Design Decisions
//! - `ScopedSpan` is the only type handlers see; the inert variant carries no backend
//! - Closing happens in `Drop`, so early returns, `?` and unwinding all close the span
//! - Spans are owned by the request that opened them and are not `Clone`

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use tracing::instrument::{Instrument, Instrumented};

use crate::observability::attributes::{AttributeValue, KeyValue};
use crate::observability::TelemetryError;

/// Produces a tracer for an instrumentation scope (usually the service name).
pub trait TracerProvider: Send + Sync {
    fn tracer(&self, scope: &str) -> Result<Arc<dyn TracerBackend>, TelemetryError>;
}

/// Starts backend spans.
pub trait TracerBackend: Send + Sync {
    fn start_span(&self, name: &str) -> Box<dyn SpanBackend>;
}

/// A live backend span. `end` is called exactly once by `ScopedSpan`.
pub trait SpanBackend: Send + Sync {
    fn set_attribute(&mut self, attribute: KeyValue);

    fn add_event(&mut self, name: &str, attributes: &[KeyValue]);

    fn end(&mut self);

    /// The `tracing` span to enter for nested work, if the backend has one.
    fn current(&self) -> tracing::Span {
        tracing::Span::none()
    }
}

/// Tracer handle chosen at init.
#[derive(Clone, Default)]
pub enum Tracer {
    Active(Arc<dyn TracerBackend>),
    #[default]
    Inert,
}

impl Tracer {
    pub fn start_span(&self, name: &str) -> ScopedSpan {
        let name = if name.is_empty() { "unnamed" } else { name };
        match self {
            Tracer::Active(backend) => ScopedSpan {
                inner: Some(backend.start_span(name)),
            },
            Tracer::Inert => ScopedSpan::inert(),
        }
    }
}

/// A span that is closed when it goes out of scope.
///
/// Attribute and event calls on an inert span are silent no-ops.
pub struct ScopedSpan {
    inner: Option<Box<dyn SpanBackend>>,
}

impl ScopedSpan {
    pub fn inert() -> Self {
        Self { inner: None }
    }

    pub fn set_attribute(
        &mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<AttributeValue>,
    ) {
        if let Some(span) = self.inner.as_mut() {
            span.set_attribute(KeyValue::new(key, value));
        }
    }

    pub fn add_event(&mut self, name: &str, attributes: &[KeyValue]) {
        if let Some(span) = self.inner.as_mut() {
            span.add_event(name, attributes);
        }
    }

    /// Runs `f` with this span entered as the current `tracing` span.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.current().in_scope(f)
    }

    /// Attaches this span as the current span of `future`.
    pub fn instrument<F: Future>(&self, future: F) -> Instrumented<F> {
        future.instrument(self.current())
    }

    /// Closes the span now instead of at the end of the scope.
    pub fn end(mut self) {
        self.close();
    }

    fn current(&self) -> tracing::Span {
        self.inner
            .as_ref()
            .map(|span| span.current())
            .unwrap_or_else(tracing::Span::none)
    }

    fn close(&mut self) {
        if let Some(mut span) = self.inner.take() {
            span.end();
        }
    }
}

impl Drop for ScopedSpan {
    fn drop(&mut self) {
        self.close();
    }
}
