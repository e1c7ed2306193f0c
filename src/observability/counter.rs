//! Counters.
//!
//! # Responsibilities
//! - Define the meter backend seam (`MeterProvider`, `Meter`, `CounterBackend`)
//! - Hand out `Counter` handles that are either active or inert
//!
//! # Design Decisions
//! - Backends synchronize internally; `Counter` adds no locking of its own
//! - `add` returns nothing, so a broken backend cannot fail a request

use std::sync::Arc;

use crate::observability::attributes::KeyValue;
use crate::observability::TelemetryError;

/// Produces a meter for an instrumentation scope.
pub trait MeterProvider: Send + Sync {
    fn meter(&self, scope: &str) -> Result<Arc<dyn Meter>, TelemetryError>;
}

/// Registers instruments.
pub trait Meter: Send + Sync {
    fn create_counter(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Arc<dyn CounterBackend>, TelemetryError>;
}

/// A monotonic counter. Must tolerate concurrent `add` calls.
pub trait CounterBackend: Send + Sync {
    fn add(&self, amount: u64, labels: &[KeyValue]);
}

/// Counter handle chosen at init.
#[derive(Clone, Default)]
pub enum Counter {
    Active(Arc<dyn CounterBackend>),
    #[default]
    Inert,
}

impl Counter {
    pub fn add(&self, amount: u64, labels: &[KeyValue]) {
        if let Counter::Active(backend) = self {
            backend.add(amount, labels);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Default)]
    struct Total(AtomicU64);

    impl CounterBackend for Total {
        fn add(&self, amount: u64, _labels: &[KeyValue]) {
            self.0.fetch_add(amount, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_active_counter_forwards() {
        let total = Arc::new(Total::default());
        let counter = Counter::Active(total.clone());
        counter.add(2, &[KeyValue::new("status", "success")]);
        counter.clone().add(3, &[]);
        assert_eq!(total.0.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn test_inert_counter_is_noop() {
        let counter = Counter::default();
        counter.add(u64::MAX, &[KeyValue::new("status", "failed")]);
        counter.add(0, &[]);
    }
}
