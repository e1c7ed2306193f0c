//! Order Service Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod simulation;
pub mod traffic;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::Telemetry;
