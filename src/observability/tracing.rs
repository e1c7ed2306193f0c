//! Tracer backed by the `tracing` crate.
//!
//! # Responsibilities
//! - Turn facade spans into `tracing` spans on target `order_service::trace`
//! - Emit span events and the final attribute set as log records
//!
//! # Design Decisions
//! - Span names are dynamic, so they go into the `otel.name` field
//! - Attributes are buffered and emitted once, on close
//! - A tracer is only handed out when a subscriber is installed

use std::sync::Arc;
use std::time::Instant;

use crate::observability::attributes::{DisplayAttributes, KeyValue};
use crate::observability::span::{SpanBackend, TracerBackend, TracerProvider};
use crate::observability::TelemetryError;

/// Hands out `tracing`-backed tracers.
#[derive(Debug, Clone, Default)]
pub struct TracingProvider;

impl TracingProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TracerProvider for TracingProvider {
    fn tracer(&self, scope: &str) -> Result<Arc<dyn TracerBackend>, TelemetryError> {
        let has_subscriber = tracing::dispatcher::get_default(|dispatch| {
            !dispatch.is::<tracing::subscriber::NoSubscriber>()
        });
        if !has_subscriber {
            return Err(TelemetryError::TracerUnavailable(
                "no tracing subscriber installed".to_string(),
            ));
        }
        Ok(Arc::new(TracingTracer {
            scope: scope.to_string(),
        }))
    }
}

struct TracingTracer {
    scope: String,
}

impl TracerBackend for TracingTracer {
    fn start_span(&self, name: &str) -> Box<dyn SpanBackend> {
        let span = tracing::info_span!(
            target: "order_service::trace",
            "span",
            otel.name = %name,
            otel.scope = %self.scope,
        );
        Box::new(TracingSpan {
            span,
            name: name.to_string(),
            attributes: Vec::new(),
            started: Instant::now(),
        })
    }
}

struct TracingSpan {
    span: tracing::Span,
    name: String,
    attributes: Vec<KeyValue>,
    started: Instant,
}

impl SpanBackend for TracingSpan {
    fn set_attribute(&mut self, attribute: KeyValue) {
        tracing::trace!(
            target: "order_service::trace",
            parent: &self.span,
            key = %attribute.key,
            value = %attribute.value,
            "Span attribute set"
        );
        match self.attributes.iter_mut().find(|kv| kv.key == attribute.key) {
            Some(existing) => existing.value = attribute.value,
            None => self.attributes.push(attribute),
        }
    }

    fn add_event(&mut self, name: &str, attributes: &[KeyValue]) {
        tracing::info!(
            target: "order_service::trace",
            parent: &self.span,
            event = name,
            attributes = %DisplayAttributes(attributes),
            "Span event"
        );
    }

    fn end(&mut self) {
        tracing::info!(
            target: "order_service::trace",
            parent: &self.span,
            span = %self.name,
            duration_ms = self.started.elapsed().as_secs_f64() * 1000.0,
            attributes = %DisplayAttributes(&self.attributes),
            "Span closed"
        );
    }

    fn current(&self) -> tracing::Span {
        self.span.clone()
    }
}
