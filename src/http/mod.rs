//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/ (request metrics)
//!     → handlers.rs (span + simulated work + counter)
//!     → response.rs (JSON bodies)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;

pub use server::{build_router, AppState, HttpServer};
