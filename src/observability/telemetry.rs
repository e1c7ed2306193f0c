//! Telemetry facade.
//!
//! `Telemetry` is built once at startup and cloned into every handler. It
//! always hands out a span or a counter; whether the backend behind it is
//! real is decided here, during `init`, and nowhere else.

use std::collections::HashMap;
use std::sync::Arc;

use crate::observability::counter::{Counter, MeterProvider};
use crate::observability::span::{ScopedSpan, Tracer, TracerProvider};

/// Process-wide telemetry context.
#[derive(Clone, Default)]
pub struct Telemetry {
    tracer: Tracer,
    counters: Arc<HashMap<String, Counter>>,
}

impl Telemetry {
    pub fn builder(scope: impl Into<String>) -> TelemetryBuilder {
        TelemetryBuilder {
            scope: scope.into(),
            tracer_provider: None,
            meter_provider: None,
            counters: Vec::new(),
        }
    }

    /// A context where every span and counter is a no-op.
    pub fn inert() -> Self {
        Self::default()
    }

    /// Starts a span that closes when the returned guard is dropped.
    pub fn start_span(&self, name: &str) -> ScopedSpan {
        self.tracer.start_span(name)
    }

    /// Returns the counter registered under `name`, or an inert one.
    pub fn counter(&self, name: &str) -> Counter {
        match self.counters.get(name) {
            Some(counter) => counter.clone(),
            None => {
                tracing::debug!(counter = name, "Counter not registered, using inert counter");
                Counter::Inert
            }
        }
    }
}

struct CounterSpec {
    name: String,
    description: String,
}

/// Collects providers and instrument registrations, then runs the init protocol.
pub struct TelemetryBuilder {
    scope: String,
    tracer_provider: Option<Arc<dyn TracerProvider>>,
    meter_provider: Option<Arc<dyn MeterProvider>>,
    counters: Vec<CounterSpec>,
}

impl TelemetryBuilder {
    pub fn with_tracer_provider(mut self, provider: Arc<dyn TracerProvider>) -> Self {
        self.tracer_provider = Some(provider);
        self
    }

    pub fn with_meter_provider(mut self, provider: Arc<dyn MeterProvider>) -> Self {
        self.meter_provider = Some(provider);
        self
    }

    /// Registers a counter to be created during `init`.
    pub fn counter(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.counters.push(CounterSpec {
            name: name.into(),
            description: description.into(),
        });
        self
    }

    /// Acquires the tracer and meter. Never fails: any missing or failing
    /// provider is logged and replaced by its inert counterpart.
    pub fn init(self) -> Telemetry {
        let tracer = self.init_tracer();
        let counters = self.init_counters();
        Telemetry {
            tracer,
            counters: Arc::new(counters),
        }
    }

    fn init_tracer(&self) -> Tracer {
        let Some(provider) = &self.tracer_provider else {
            tracing::warn!(scope = %self.scope, "No tracer provider configured, spans are inert");
            return Tracer::Inert;
        };

        match provider.tracer(&self.scope) {
            Ok(backend) => {
                tracing::debug!(scope = %self.scope, "Tracer acquired");
                Tracer::Active(backend)
            }
            Err(e) => {
                tracing::warn!(scope = %self.scope, error = %e, "Unable to acquire tracer, spans are inert");
                Tracer::Inert
            }
        }
    }

    fn init_counters(&self) -> HashMap<String, Counter> {
        let inert = || -> HashMap<String, Counter> {
            self.counters
                .iter()
                .map(|spec| (spec.name.clone(), Counter::Inert))
                .collect()
        };

        let Some(provider) = &self.meter_provider else {
            tracing::warn!(scope = %self.scope, "No meter provider configured, counters are inert");
            return inert();
        };

        let meter = match provider.meter(&self.scope) {
            Ok(meter) => meter,
            Err(e) => {
                tracing::warn!(scope = %self.scope, error = %e, "Unable to acquire meter, counters are inert");
                return inert();
            }
        };

        self.counters
            .iter()
            .map(|spec| {
                let counter = match meter.create_counter(&spec.name, &spec.description) {
                    Ok(backend) => Counter::Active(backend),
                    Err(e) => {
                        tracing::warn!(counter = %spec.name, error = %e, "Unable to create counter, using inert counter");
                        Counter::Inert
                    }
                };
                (spec.name.clone(), counter)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::counter::Meter;
    use crate::observability::memory::InMemoryTelemetry;
    use crate::observability::span::TracerBackend;
    use crate::observability::{KeyValue, TelemetryError};

    struct BrokenProvider;

    impl TracerProvider for BrokenProvider {
        fn tracer(&self, _scope: &str) -> Result<Arc<dyn TracerBackend>, TelemetryError> {
            Err(TelemetryError::TracerUnavailable("exporter offline".into()))
        }
    }

    impl MeterProvider for BrokenProvider {
        fn meter(&self, _scope: &str) -> Result<Arc<dyn Meter>, TelemetryError> {
            Err(TelemetryError::MeterUnavailable("exporter offline".into()))
        }
    }

    #[test]
    fn test_no_providers_is_inert() {
        let telemetry = Telemetry::builder("order-service")
            .counter("orders_processed", "Number of orders processed")
            .init();

        let mut span = telemetry.start_span("db_process_order");
        span.set_attribute("order.value", 120u32);
        span.add_event("Order created successfully", &[KeyValue::new("order.status", "success")]);
        drop(span);

        telemetry
            .counter("orders_processed")
            .add(1, &[KeyValue::new("status", "success")]);
    }

    #[test]
    fn test_failing_providers_degrade() {
        let broken = Arc::new(BrokenProvider);
        let telemetry = Telemetry::builder("order-service")
            .with_tracer_provider(broken.clone())
            .with_meter_provider(broken)
            .counter("orders_processed", "Number of orders processed")
            .init();

        assert!(matches!(telemetry.tracer, Tracer::Inert));
        assert!(matches!(telemetry.counter("orders_processed"), Counter::Inert));
    }

    #[test]
    fn test_active_providers() {
        let backend = InMemoryTelemetry::new();
        let telemetry = Telemetry::builder("order-service")
            .with_tracer_provider(Arc::new(backend.clone()))
            .with_meter_provider(Arc::new(backend.clone()))
            .counter("orders_processed", "Number of orders processed")
            .init();

        {
            let mut span = telemetry.start_span("inventory_check");
            span.set_attribute("inventory.count", 7u32);
        }
        telemetry
            .counter("orders_processed")
            .add(1, &[KeyValue::new("status", "failed")]);

        let spans = backend.spans_named("inventory_check");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].end_count, 1);
        assert_eq!(
            backend.counter_value("orders_processed", &[KeyValue::new("status", "failed")]),
            1
        );
    }

    #[test]
    fn test_unregistered_counter_is_inert() {
        let backend = InMemoryTelemetry::new();
        let telemetry = Telemetry::builder("order-service")
            .with_meter_provider(Arc::new(backend.clone()))
            .init();

        let counter = telemetry.counter("never_registered");
        assert!(matches!(counter, Counter::Inert));
        counter.add(1, &[]);
        assert_eq!(backend.counter_total("never_registered"), 0);
    }

    #[test]
    fn test_invalid_counter_degrades_alone() {
        let backend = InMemoryTelemetry::new();
        let telemetry = Telemetry::builder("order-service")
            .with_meter_provider(Arc::new(backend.clone()))
            .counter("orders_processed", "Number of orders processed")
            .counter("bad name!", "Rejected by the meter")
            .init();

        assert!(matches!(telemetry.counter("orders_processed"), Counter::Active(_)));
        assert!(matches!(telemetry.counter("bad name!"), Counter::Inert));
    }
}
