//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the order service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Logging, tracing and metrics settings.
    pub observability: ObservabilityConfig,

    /// Simulated work parameters.
    pub simulation: SimulationConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5001".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Instrumentation scope for spans and meters.
    pub service_name: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Emit spans through the tracing subscriber.
    pub tracing_enabled: bool,

    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,

    /// Where traces can be browsed; only printed in the startup banner.
    pub traces_ui_url: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "order-service".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            tracing_enabled: true,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9464".to_string(),
            traces_ui_url: Some("http://localhost:3301".to_string()),
        }
    }
}

/// Parameters of the random work simulator.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Probability that an order succeeds (0.0 - 1.0).
    pub success_rate: f64,

    /// Order processing delay range in milliseconds, inclusive.
    pub order_delay_ms: [u64; 2],

    /// Inventory lookup delay range in milliseconds, inclusive.
    pub inventory_delay_ms: [u64; 2],

    /// Upper bound of the reported stock level.
    pub max_stock: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            success_rate: 0.9,
            order_delay_ms: [50, 150],
            inventory_delay_ms: [200, 800],
            max_stock: 1000,
        }
    }
}
