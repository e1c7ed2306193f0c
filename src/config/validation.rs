//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, ranges and probabilities
//! - Keep simulated delays below the request timeout, so handlers never time out
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;
use crate::simulation::MAX_STOCK;

/// A single semantic problem with a config, tagged with the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    let obs = &config.observability;
    if obs.service_name.trim().is_empty() {
        errors.push(ValidationError::new("observability.service_name", "must not be empty"));
    }
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", obs.metrics_address),
        ));
    }

    let sim = &config.simulation;
    if !(0.0..=1.0).contains(&sim.success_rate) {
        errors.push(ValidationError::new(
            "simulation.success_rate",
            format!("{} is outside [0, 1]", sim.success_rate),
        ));
    }
    if sim.order_delay_ms[0] > sim.order_delay_ms[1] {
        errors.push(ValidationError::new("simulation.order_delay_ms", "min exceeds max"));
    }
    if sim.inventory_delay_ms[0] > sim.inventory_delay_ms[1] {
        errors.push(ValidationError::new("simulation.inventory_delay_ms", "min exceeds max"));
    }
    if sim.max_stock > MAX_STOCK {
        errors.push(ValidationError::new(
            "simulation.max_stock",
            format!("{} exceeds {}", sim.max_stock, MAX_STOCK),
        ));
    }

    // A delay at or past the timeout would turn the response into a 408.
    if config.timeouts.request_secs > 0 {
        let timeout_ms = config.timeouts.request_secs.saturating_mul(1000);
        if sim.order_delay_ms[1] >= timeout_ms {
            errors.push(ValidationError::new(
                "simulation.order_delay_ms",
                format!("max {}ms must be below the {}ms request timeout", sim.order_delay_ms[1], timeout_ms),
            ));
        }
        if sim.inventory_delay_ms[1] >= timeout_ms {
            errors.push(ValidationError::new(
                "simulation.inventory_delay_ms",
                format!("max {}ms must be below the {}ms request timeout", sim.inventory_delay_ms[1], timeout_ms),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
