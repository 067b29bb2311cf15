use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::{ResourceClient, WaitError, WaitSpec, WaitState};

/// Time allowed for the status check issued once the wait budget is spent.
pub const FINAL_POLL_GRACE: Duration = Duration::from_secs(1);

/// Summary of a successful wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitReport {
    /// Number of `get` calls issued.
    pub polls: u32,
    pub elapsed: Duration,
    /// Target phase that ended the wait, `None` when the resource vanished.
    pub final_phase: Option<String>,
}

/// Issue a delete for `id` and wait until the resource is gone.
///
/// A delete answered with "not found" means the resource is already gone and
/// returns immediately without polling.
#[instrument(level = "debug", skip(client, spec), fields(timeout = ?spec.timeout))]
pub async fn delete_and_wait<C>(
    client: &C,
    id: &str,
    spec: &WaitSpec,
) -> Result<WaitReport, WaitError>
where
    C: ResourceClient + ?Sized,
{
    match client.delete(id).await {
        Ok(()) => {
            debug!(id, "delete accepted; waiting for removal");
        }
        Err(e) if e.is_not_found() => {
            info!(id, "delete: resource already gone");
            return Ok(WaitReport {
                polls: 0,
                elapsed: Duration::ZERO,
                final_phase: None,
            });
        }
        Err(source) => {
            warn!(id, error = %source, "delete request failed");
            return Err(WaitError::DeleteFailed {
                id: id.to_string(),
                source,
            });
        }
    }
    wait_for_deletion(client, id, spec).await
}

/// Poll `id` until it disappears, reaches a target phase, fails, or the
/// timeout in `spec` elapses. The delete must already have been issued.
#[instrument(level = "debug", skip(client, spec), fields(timeout = ?spec.timeout))]
pub async fn wait_for_deletion<C>(
    client: &C,
    id: &str,
    spec: &WaitSpec,
) -> Result<WaitReport, WaitError>
where
    C: ResourceClient + ?Sized,
{
    let start = Instant::now();
    let deadline = start + spec.timeout;
    let mut state = WaitState::default();
    let mut polls = 0u32;

    loop {
        polls += 1;
        let remaining = deadline.saturating_duration_since(Instant::now());
        // the poll that lands on the deadline still gets a chance to answer
        let budget = if remaining.is_zero() {
            FINAL_POLL_GRACE
        } else {
            remaining
        };
        let observed =
            match tokio::time::timeout(budget, client.get(id)).await {
                Ok(res) => res.map(|r| client.phase(&r)),
                Err(_) => {
                    warn!(id, polls, "status check outlived the wait budget");
                    return Err(timed_out(id, spec, &state));
                }
            };

        let before = state.last_phase().map(str::to_owned);
        state = state.step(spec, id, observed);
        debug!(
            id,
            attempt = polls,
            before = before.as_deref().unwrap_or("-"),
            after = state.last_phase().unwrap_or("-"),
            "poll transition"
        );

        match state {
            WaitState::Terminated { phase } => {
                let elapsed = start.elapsed();
                info!(id, polls, elapsed_ms = elapsed.as_millis() as u64, "resource deleted");
                return Ok(WaitReport {
                    polls,
                    elapsed,
                    final_phase: phase,
                });
            }
            WaitState::Failed(e) => {
                warn!(id, polls, error = %e, "wait for deletion failed");
                return Err(e);
            }
            WaitState::Pending { .. } => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(timed_out(id, spec, &state));
                }
                let delay = spec.poll_interval.min(deadline - now);
                tokio::time::sleep(delay).await;
            }
        }
    }
}

fn timed_out(id: &str, spec: &WaitSpec, state: &WaitState) -> WaitError {
    WaitError::Timeout {
        id: id.to_string(),
        timeout: spec.timeout,
        last_phase: state.last_phase().map(str::to_owned),
    }
}
