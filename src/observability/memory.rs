//! In-memory telemetry backend.
//!
//! Keeps finished spans and counter totals in process so they can be
//! inspected, mostly from tests.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use dashmap::DashMap;

use crate::observability::attributes::KeyValue;
use crate::observability::counter::{CounterBackend, Meter, MeterProvider};
use crate::observability::metrics::validate_metric_name;
use crate::observability::span::{SpanBackend, TracerBackend, TracerProvider};
use crate::observability::TelemetryError;

/// An event recorded on a span.
#[derive(Debug, Clone)]
pub struct EventData {
    pub name: String,
    pub timestamp: SystemTime,
    pub attributes: Vec<KeyValue>,
}

/// A span as seen by the backend when it was closed.
#[derive(Debug, Clone)]
pub struct SpanData {
    pub name: String,
    pub attributes: Vec<KeyValue>,
    pub events: Vec<EventData>,
    pub end_count: usize,
}

impl SpanData {
    pub fn attribute(&self, key: &str) -> Option<&KeyValue> {
        self.attributes.iter().find(|kv| kv.key == key)
    }
}

type LabelSet = Vec<(String, String)>;

fn label_set(labels: &[KeyValue]) -> LabelSet {
    let mut set: LabelSet = labels
        .iter()
        .map(|kv| (kv.key.to_string(), kv.value.to_string()))
        .collect();
    set.sort();
    set
}

/// Tracer and meter provider that records into shared memory.
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryTelemetry {
    spans: Arc<Mutex<Vec<SpanData>>>,
    counters: Arc<DashMap<(String, LabelSet), u64>>,
}

impl InMemoryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finished_spans(&self) -> Vec<SpanData> {
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn spans_named(&self, name: &str) -> Vec<SpanData> {
        self.finished_spans()
            .into_iter()
            .filter(|span| span.name == name)
            .collect()
    }

    /// Value accumulated for `name` with exactly these labels.
    pub fn counter_value(&self, name: &str, labels: &[KeyValue]) -> u64 {
        self.counters
            .get(&(name.to_string(), label_set(labels)))
            .map(|entry| *entry.value())
            .unwrap_or(0)
    }

    /// Value accumulated for `name` across all label sets.
    pub fn counter_total(&self, name: &str) -> u64 {
        self.counters
            .iter()
            .filter(|entry| entry.key().0 == name)
            .map(|entry| *entry.value())
            .sum()
    }
}

impl TracerProvider for InMemoryTelemetry {
    fn tracer(&self, _scope: &str) -> Result<Arc<dyn TracerBackend>, TelemetryError> {
        Ok(Arc::new(self.clone()))
    }
}

impl TracerBackend for InMemoryTelemetry {
    fn start_span(&self, name: &str) -> Box<dyn SpanBackend> {
        Box::new(InMemorySpan {
            data: SpanData {
                name: name.to_string(),
                attributes: Vec::new(),
                events: Vec::new(),
                end_count: 0,
            },
            sink: self.spans.clone(),
        })
    }
}

struct InMemorySpan {
    data: SpanData,
    sink: Arc<Mutex<Vec<SpanData>>>,
}

impl SpanBackend for InMemorySpan {
    fn set_attribute(&mut self, attribute: KeyValue) {
        match self.data.attributes.iter_mut().find(|kv| kv.key == attribute.key) {
            Some(existing) => existing.value = attribute.value,
            None => self.data.attributes.push(attribute),
        }
    }

    fn add_event(&mut self, name: &str, attributes: &[KeyValue]) {
        self.data.events.push(EventData {
            name: name.to_string(),
            timestamp: SystemTime::now(),
            attributes: attributes.to_vec(),
        });
    }

    fn end(&mut self) {
        self.data.end_count += 1;
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(self.data.clone());
    }
}

impl MeterProvider for InMemoryTelemetry {
    fn meter(&self, _scope: &str) -> Result<Arc<dyn Meter>, TelemetryError> {
        Ok(Arc::new(self.clone()))
    }
}

impl Meter for InMemoryTelemetry {
    fn create_counter(
        &self,
        name: &str,
        _description: &str,
    ) -> Result<Arc<dyn CounterBackend>, TelemetryError> {
        validate_metric_name(name)?;
        Ok(Arc::new(InMemoryCounter {
            name: name.to_string(),
            counters: self.counters.clone(),
        }))
    }
}

struct InMemoryCounter {
    name: String,
    counters: Arc<DashMap<(String, LabelSet), u64>>,
}

impl CounterBackend for InMemoryCounter {
    fn add(&self, amount: u64, labels: &[KeyValue]) {
        // The entry guard holds the shard lock for the whole update.
        let mut total = self
            .counters
            .entry((self.name.clone(), label_set(labels)))
            .or_insert(0);
        *total = total.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::{AttributeValue, Telemetry};

    #[test]
    fn test_attribute_last_write_wins() {
        let backend = InMemoryTelemetry::new();
        let tracer = backend.tracer("test").unwrap();
        let mut span = tracer.start_span("work");
        span.set_attribute(KeyValue::new("k", 1i64));
        span.set_attribute(KeyValue::new("k", 2i64));
        span.add_event("first", &[]);
        span.add_event("second", &[KeyValue::new("x", true)]);
        span.end();

        let spans = backend.finished_spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].attributes.len(), 1);
        assert_eq!(spans[0].attribute("k").unwrap().value, AttributeValue::I64(2));
        let names: Vec<_> = spans[0].events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_label_order_is_irrelevant() {
        let backend = InMemoryTelemetry::new();
        let counter = backend.create_counter("orders_processed", "").unwrap();
        counter.add(1, &[KeyValue::new("a", "1"), KeyValue::new("b", "2")]);
        counter.add(1, &[KeyValue::new("b", "2"), KeyValue::new("a", "1")]);
        assert_eq!(
            backend.counter_value("orders_processed", &[KeyValue::new("a", "1"), KeyValue::new("b", "2")]),
            2
        );
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let backend = InMemoryTelemetry::new();
        let telemetry = Telemetry::builder("test")
            .with_meter_provider(Arc::new(backend.clone()))
            .counter("orders_processed", "")
            .init();

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let telemetry = telemetry.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        telemetry
                            .counter("orders_processed")
                            .add(1, &[KeyValue::new("status", "success")]);
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        assert_eq!(backend.counter_total("orders_processed"), 8000);
    }
}
