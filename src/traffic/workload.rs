//! Fixed workload loop.

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use reqwest::Method;
use url::Url;

use crate::traffic::TrafficError;

/// One request of a batch.
#[derive(Debug, Clone)]
pub struct WorkloadStep {
    pub method: Method,
    pub path: &'static str,
    pub label: &'static str,
}

/// Batches of requests sent against the service.
#[derive(Debug, Clone)]
pub struct WorkloadPlan {
    pub steps: Vec<WorkloadStep>,
    pub batches: u32,
    pub batch_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for WorkloadPlan {
    fn default() -> Self {
        Self {
            steps: vec![
                WorkloadStep {
                    method: Method::POST,
                    path: "/createOrder",
                    label: "order run",
                },
                WorkloadStep {
                    method: Method::GET,
                    path: "/checkInventory",
                    label: "inventory ping",
                },
            ],
            batches: 20,
            batch_delay: Duration::from_secs(1),
            request_timeout: Duration::from_secs(3),
        }
    }
}

/// What happened during a workload run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkloadReport {
    /// Requests that got any HTTP response.
    pub completed: usize,
    /// Requests that failed before a response arrived.
    pub failed: usize,
    /// Responses by status code.
    pub statuses: BTreeMap<u16, usize>,
}

/// Run every batch of `plan`, writing one line per request to `out`.
///
/// Request errors are reported and skipped; they never stop the loop.
pub async fn run_workload<W: Write>(
    client: &reqwest::Client,
    base_url: &Url,
    plan: &WorkloadPlan,
    out: &mut W,
) -> Result<WorkloadReport, TrafficError> {
    let targets = plan
        .steps
        .iter()
        .map(|step| base_url.join(step.path).map(|url| (step, url)))
        .collect::<Result<Vec<_>, url::ParseError>>()?;

    let mut report = WorkloadReport::default();

    for batch in 1..=plan.batches {
        for (step, url) in &targets {
            let result = client
                .request(step.method.clone(), url.clone())
                .timeout(plan.request_timeout)
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status().as_u16();
                    report.completed += 1;
                    *report.statuses.entry(status).or_insert(0) += 1;
                    writeln!(out, "{} {}: {}", step.label, batch, status)?;
                }
                Err(e) => {
                    report.failed += 1;
                    writeln!(out, "{} {} failed: {}", step.label, batch, e)?;
                }
            }
        }

        if batch < plan.batches {
            tokio::time::sleep(plan.batch_delay).await;
        }
    }

    Ok(report)
}
