//! Synthetic traffic generation.
//!
//! # Data Flow
//! ```text
//! traffic-gen CLI
//!     → runner.rs (NotReady ends the run, exit code 1)
//!     → readiness.rs (poll /health until 200 or deadline)
//!     → workload.rs (fixed batches of createOrder + checkInventory)
//!     → one line per response on stdout
//! ```
//!
//! # Design Decisions
//! - Readiness retries with a fixed backoff; workload requests are never retried
//! - A failed workload request is printed and the loop moves on

pub mod readiness;
pub mod runner;
pub mod workload;

use thiserror::Error;
use url::Url;

pub use readiness::{wait_for_ready, ReadinessPolicy};
pub use runner::{run_traffic, TrafficOutcome, TrafficRun};
pub use workload::{run_workload, WorkloadPlan, WorkloadReport, WorkloadStep};

/// Errors that end a traffic run.
#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse the service base URL; only http and https are accepted.
pub fn parse_base_url(raw: &str) -> Result<Url, TrafficError> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TrafficError::UnsupportedScheme(other.to_string())),
    }
}

/// URL of the health endpoint under `base`.
pub fn health_url(base: &Url) -> Result<Url, TrafficError> {
    Ok(base.join("/health")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url() {
        let url = parse_base_url("http://localhost:5001").unwrap();
        assert_eq!(health_url(&url).unwrap().as_str(), "http://localhost:5001/health");

        assert!(matches!(parse_base_url("localhost:5001"), Err(TrafficError::UnsupportedScheme(_))));
        assert!(matches!(parse_base_url("not a url"), Err(TrafficError::InvalidUrl(_))));
        assert!(matches!(parse_base_url("ftp://host"), Err(TrafficError::UnsupportedScheme(_))));
    }
}
