//! A complete traffic run: wait for readiness, then drive the workload.

use std::io::Write;

use url::Url;

use crate::traffic::{
    health_url, run_workload, wait_for_ready, ReadinessPolicy, TrafficError, WorkloadPlan,
    WorkloadReport,
};

/// Everything a traffic run needs besides the HTTP client.
#[derive(Debug, Clone)]
pub struct TrafficRun {
    pub base_url: Url,
    pub readiness: ReadinessPolicy,
    pub plan: WorkloadPlan,
}

/// How a traffic run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrafficOutcome {
    /// The service became ready and every batch was sent.
    Finished(WorkloadReport),
    /// The service never answered `/health` with 200 before the deadline.
    NotReady,
}

impl TrafficOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TrafficOutcome::Finished(_))
    }
}

/// Wait for the service, then run the workload, writing progress to `out`.
pub async fn run_traffic<W: Write>(
    client: &reqwest::Client,
    run: &TrafficRun,
    out: &mut W,
) -> Result<TrafficOutcome, TrafficError> {
    writeln!(out, "Generating test traffic...")?;

    if !wait_for_ready(client, &health_url(&run.base_url)?, &run.readiness).await {
        writeln!(
            out,
            "Order Service is not reachable at {}. Start it first with `cargo run --bin order-service`.",
            run.base_url
        )?;
        return Ok(TrafficOutcome::NotReady);
    }

    let report = run_workload(client, &run.base_url, &run.plan, out).await?;
    tracing::info!(
        completed = report.completed,
        failed = report.failed,
        statuses = ?report.statuses,
        "Workload finished"
    );
    writeln!(out, "Done! Check your tracing backend")?;
    Ok(TrafficOutcome::Finished(report))
}
