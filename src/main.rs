//! Order Service
//!
//! A demonstration HTTP service with simulated order creation, inventory
//! checks and a health probe, instrumented with spans and an order counter.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request     ┌──────────────────────────────────────────────────┐
//!     ───────────────────┼─▶ http::server ──▶ http::handlers                 │
//!                        │   (request id,        │          │               │
//!                        │    trace, metrics,    ▼          ▼               │
//!                        │    timeout)      simulation   observability::    │
//!                        │                  (work)       Telemetry          │
//!                        │                                │        │        │
//!                        │                          ScopedSpan   Counter    │
//!                        │                          (tracing)   (metrics)   │
//!                        │                               │         │        │
//!                        │                         inert when backend absent │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use order_service::config::{self, ServiceConfig};
use order_service::http::HttpServer;
use order_service::lifecycle::{spawn_signal_listener, Shutdown};
use order_service::observability::logging::init_logging;
use order_service::observability::metrics::PrometheusMeterProvider;
use order_service::observability::tracing::TracingProvider;
use order_service::observability::{Telemetry, ORDERS_PROCESSED};
use order_service::simulation::RandomWorkSimulator;

#[derive(Parser)]
#[command(name = "order-service")]
#[command(about = "Demo order service with best-effort telemetry", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, env = "ORDER_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long, env = "ORDER_SERVICE_BIND")]
    bind: Option<String>,
}

fn build_telemetry(config: &ServiceConfig) -> Telemetry {
    let obs = &config.observability;
    let mut builder = Telemetry::builder(obs.service_name.clone())
        .counter(ORDERS_PROCESSED, "Number of orders processed");

    if obs.tracing_enabled {
        builder = builder.with_tracer_provider(Arc::new(TracingProvider::new()));
    }

    if obs.metrics_enabled {
        match obs.metrics_address.parse() {
            Ok(addr) => {
                builder = builder.with_meter_provider(Arc::new(PrometheusMeterProvider::new(addr)));
            }
            Err(e) => {
                tracing::error!(
                    metrics_address = %obs.metrics_address,
                    error = %e,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    builder.init()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        tracing_enabled = config.observability.tracing_enabled,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    let telemetry = build_telemetry(&config);
    let simulator = Arc::new(RandomWorkSimulator::new(config.simulation.clone()));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    let server = HttpServer::new(config, telemetry, simulator);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
