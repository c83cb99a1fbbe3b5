//! Periodic reaping of idle booking flows.
//!
//! Spawns a background task that drops abandoned flows from the registry
//! after the configured idle TTL. Runs on a fixed interval using
//! `tokio::time::interval`. Flows with a submission in flight are left
//! alone regardless of age.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::flows::FlowRegistry;

/// How often the reaper sweeps the registry.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Run the idle flow reaping loop.
///
/// Drops flows idle for longer than `idle_ttl_secs`. Runs until `cancel`
/// is triggered.
pub async fn run(flows: Arc<FlowRegistry>, idle_ttl_secs: u64, cancel: CancellationToken) {
    tracing::info!(
        idle_ttl_secs,
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Flow reaper started"
    );

    let ttl = chrono::Duration::seconds(idle_ttl_secs as i64);
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Flow reaper stopping");
                break;
            }
            _ = interval.tick() => {
                let reaped = flows.sweep_idle(ttl).await;
                if reaped > 0 {
                    tracing::info!(reaped, "Flow reaper: dropped idle flows");
                } else {
                    tracing::debug!("Flow reaper: nothing to reap");
                }
            }
        }
    }
}
