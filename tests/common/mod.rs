//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

use order_service::config::ServiceConfig;
use order_service::http::HttpServer;
use order_service::lifecycle::Shutdown;
use order_service::observability::Telemetry;
use order_service::simulation::WorkSimulator;

/// A running service; shut down when dropped.
pub struct TestService {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestService {
    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    #[allow(dead_code)]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service on an ephemeral port.
pub async fn spawn_service(telemetry: Telemetry, simulator: Arc<dyn WorkSimulator>) -> TestService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    spawn_service_on(listener, telemetry, simulator)
}

/// Start the service on an already bound listener.
pub fn spawn_service_on(
    listener: TcpListener,
    telemetry: Telemetry,
    simulator: Arc<dyn WorkSimulator>,
) -> TestService {
    let addr = listener.local_addr().unwrap();
    let mut config = ServiceConfig::default();
    config.listener.bind_address = addr.to_string();
    config.observability.traces_ui_url = None;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, telemetry, simulator);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestService { addr, shutdown }
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start a backend whose `/health` always answers with `status`.
#[allow(dead_code)]
pub async fn start_health_stub(status: StatusCode) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/health", get(move || async move { status }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// `ORD-` followed by exactly five digits.
#[allow(dead_code)]
pub fn is_order_id(id: &str) -> bool {
    id.strip_prefix("ORD-")
        .map(|digits| digits.len() == 5 && digits.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}
