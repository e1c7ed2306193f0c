use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use order_service::traffic::{parse_base_url, run_traffic, ReadinessPolicy, TrafficRun, WorkloadPlan};

#[derive(Parser)]
#[command(name = "traffic-gen")]
#[command(about = "Generate synthetic traffic against the order service", long_about = None)]
struct Cli {
    #[arg(short, long, env = "ORDER_SERVICE_URL", default_value = "http://localhost:5001")]
    url: String,

    /// Number of batches; each batch creates an order and checks inventory.
    #[arg(short, long, default_value_t = 20)]
    batches: u32,

    /// Pause between batches.
    #[arg(long, default_value_t = 1000)]
    batch_delay_ms: u64,

    /// How long to wait for /health before giving up.
    #[arg(long, default_value_t = 15)]
    ready_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let run = TrafficRun {
        base_url: parse_base_url(&cli.url)?,
        readiness: ReadinessPolicy {
            deadline: Duration::from_secs(cli.ready_timeout_secs),
            ..ReadinessPolicy::default()
        },
        plan: WorkloadPlan {
            batches: cli.batches,
            batch_delay: Duration::from_millis(cli.batch_delay_ms),
            ..WorkloadPlan::default()
        },
    };

    let outcome = run_traffic(&reqwest::Client::new(), &run, &mut std::io::stdout()).await?;
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
