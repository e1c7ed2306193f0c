//! Readiness polling.

use std::time::Duration;

use tokio::time::Instant;
use url::Url;

/// How long and how often to poll `/health`.
#[derive(Debug, Clone)]
pub struct ReadinessPolicy {
    /// Give up after this long.
    pub deadline: Duration,
    /// Pause between failed attempts.
    pub backoff: Duration,
    /// Timeout of a single health request.
    pub attempt_timeout: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(15),
            backoff: Duration::from_millis(500),
            attempt_timeout: Duration::from_secs(1),
        }
    }
}

/// Poll `GET /health` until it answers 200 or the deadline passes.
///
/// Returns `true` once the service is ready.
pub async fn wait_for_ready(client: &reqwest::Client, health_url: &Url, policy: &ReadinessPolicy) -> bool {
    let deadline = Instant::now() + policy.deadline;
    let mut attempt = 0u32;

    while Instant::now() < deadline {
        attempt += 1;
        match client
            .get(health_url.clone())
            .timeout(policy.attempt_timeout)
            .send()
            .await
        {
            Ok(response) if response.status() == reqwest::StatusCode::OK => {
                tracing::debug!(attempt, "Service is ready");
                return true;
            }
            Ok(response) => {
                tracing::debug!(attempt, status = %response.status(), "Service not ready yet");
            }
            Err(e) => {
                tracing::debug!(attempt, error = %e, "Service unreachable");
            }
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        tokio::time::sleep(policy.backoff.min(remaining)).await;
    }

    tracing::warn!(attempts = attempt, deadline = ?policy.deadline, "Service never became ready");
    false
}
