//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Back facade counters with the `metrics` crate
//! - Install the Prometheus exporter when a meter is first acquired
//! - Record per-request HTTP metrics
//!
//! # Metrics
//! - `orders_processed` (counter): orders by `status` (success, failed)
//! - `http_requests_total` (counter): requests by method, path, status
//! - `http_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Without an installed recorder every `metrics` macro is a no-op
//! - Instrument names are validated before registration so bad names fail at init

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use metrics::Label;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::observability::attributes::KeyValue;
use crate::observability::counter::{CounterBackend, Meter, MeterProvider};
use crate::observability::TelemetryError;

/// Checks a name against the Prometheus metric name grammar.
pub fn validate_metric_name(name: &str) -> Result<(), TelemetryError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(TelemetryError::InvalidInstrument(name.to_string()))
    }
}

/// Meter provider that installs the Prometheus exporter on first use.
pub struct PrometheusMeterProvider {
    listen_address: SocketAddr,
    installed: Mutex<bool>,
}

impl PrometheusMeterProvider {
    pub fn new(listen_address: SocketAddr) -> Self {
        Self {
            listen_address,
            installed: Mutex::new(false),
        }
    }
}

impl MeterProvider for PrometheusMeterProvider {
    fn meter(&self, scope: &str) -> Result<Arc<dyn Meter>, TelemetryError> {
        let mut installed = self
            .installed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !*installed {
            PrometheusBuilder::new()
                .with_http_listener(self.listen_address)
                .add_global_label("service", scope)
                .install()
                .map_err(|e| TelemetryError::MeterUnavailable(e.to_string()))?;
            *installed = true;

            tracing::info!(
                address = %self.listen_address,
                "Prometheus metrics exporter listening"
            );
        }

        Ok(Arc::new(MetricsMeter))
    }
}

/// Meter that registers counters with whatever `metrics` recorder is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsMeter;

impl Meter for MetricsMeter {
    fn create_counter(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Arc<dyn CounterBackend>, TelemetryError> {
        validate_metric_name(name)?;
        if !description.is_empty() {
            metrics::describe_counter!(name.to_string(), description.to_string());
        }
        Ok(Arc::new(MetricsCounter {
            name: name.to_string(),
        }))
    }
}

struct MetricsCounter {
    name: String,
}

impl CounterBackend for MetricsCounter {
    fn add(&self, amount: u64, labels: &[KeyValue]) {
        let labels: Vec<Label> = labels
            .iter()
            .map(|kv| Label::new(kv.key.to_string(), kv.value.to_string()))
            .collect();
        metrics::counter!(self.name.clone(), labels).increment(amount);
    }
}

/// Record one served HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!("http_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_name_validation() {
        assert!(validate_metric_name("orders_processed").is_ok());
        assert!(validate_metric_name("http:requests_total").is_ok());
        assert!(validate_metric_name("_private").is_ok());
        assert!(validate_metric_name("").is_err());
        assert!(validate_metric_name("9lives").is_err());
        assert!(validate_metric_name("bad name!").is_err());
        assert!(validate_metric_name("orders-processed").is_err());
    }

    #[test]
    fn test_metrics_meter_without_recorder_is_harmless() {
        let counter = MetricsMeter.create_counter("orders_processed", "Number of orders processed").unwrap();
        counter.add(1, &[KeyValue::new("status", "success")]);
        record_request("GET", "/health", 200, Instant::now());
    }

    #[test]
    fn test_metrics_meter_rejects_invalid_name() {
        let result = MetricsMeter.create_counter("orders processed", "");
        assert!(matches!(result, Err(TelemetryError::InvalidInstrument(_))));
    }
}
