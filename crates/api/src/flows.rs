//! Registry of live booking flows.
//!
//! Each browser session gets its own [`BookingFlow`], keyed by a server
//! issued UUID. The registry serializes all access to a flow behind one
//! async mutex; the lock is never held across store I/O (the submit
//! handler snapshots the draft out, runs the pipeline, then re-locks to
//! record the outcome).

use std::collections::HashMap;

use tokio::sync::Mutex;
use uuid::Uuid;

use inkflow_core::error::CoreError;
use inkflow_core::flow::{BookingFlow, Stage};
use inkflow_core::types::Timestamp;

use crate::error::AppError;

/// One registered flow plus its bookkeeping.
struct FlowEntry {
    flow: BookingFlow,
    /// Refreshed on every interaction; drives idle reaping.
    last_activity: Timestamp,
}

/// Manages all live booking flows.
///
/// Thread-safe via an interior `Mutex`; designed to be wrapped in `Arc`
/// and shared across the application.
pub struct FlowRegistry {
    flows: Mutex<HashMap<Uuid, FlowEntry>>,
}

impl FlowRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            flows: Mutex::new(HashMap::new()),
        }
    }

    /// Open a fresh flow on the choosing screen and register it.
    pub async fn open(&self) -> (Uuid, Stage) {
        let id = Uuid::new_v4();
        let mut flow = BookingFlow::new();
        flow.open();
        let stage = flow.stage();

        self.flows.lock().await.insert(
            id,
            FlowEntry {
                flow,
                last_activity: chrono::Utc::now(),
            },
        );
        tracing::debug!(flow_id = %id, "Booking flow opened");
        (id, stage)
    }

    /// Run `op` against a registered flow, refreshing its activity stamp.
    ///
    /// Unknown ids (never opened, closed, or reaped) map to a 404.
    pub async fn with_flow<T>(
        &self,
        id: Uuid,
        op: impl FnOnce(&mut BookingFlow) -> Result<T, CoreError>,
    ) -> Result<T, AppError> {
        let mut flows = self.flows.lock().await;
        let entry = flows.get_mut(&id).ok_or(AppError::FlowNotFound(id))?;
        entry.last_activity = chrono::Utc::now();
        op(&mut entry.flow).map_err(AppError::from)
    }

    /// Close a flow and drop it from the registry.
    ///
    /// Closing is allowed at any time, including while a submission is in
    /// flight; the in-flight outcome is then discarded by [`Self::finish`].
    pub async fn close(&self, id: Uuid) -> Result<(), AppError> {
        match self.flows.lock().await.remove(&id) {
            Some(_) => {
                tracing::debug!(flow_id = %id, "Booking flow closed");
                Ok(())
            }
            None => Err(AppError::FlowNotFound(id)),
        }
    }

    /// Record the outcome of a submission attempt.
    ///
    /// Success is terminal and removes the flow. Failure releases the
    /// submission latch so the client can retry with the draft intact.
    /// Outcomes for flows that were closed mid-flight are discarded; flow
    /// ids are never reused, so a late outcome can only belong to the
    /// closed flow itself.
    pub async fn finish(&self, id: Uuid, created: bool) {
        let mut flows = self.flows.lock().await;
        if !flows.contains_key(&id) {
            tracing::debug!(
                flow_id = %id,
                created,
                "Discarding submission outcome for a closed flow"
            );
            return;
        }
        if created {
            flows.remove(&id);
            tracing::info!(flow_id = %id, "Booking flow completed");
        } else if let Some(entry) = flows.get_mut(&id) {
            entry.flow.finish_submit(false);
            entry.last_activity = chrono::Utc::now();
        }
    }

    /// Drop flows that have been idle longer than `ttl`.
    ///
    /// Flows with a submission in flight are never reaped, whatever their
    /// age; the outcome handler decides their fate.
    pub async fn sweep_idle(&self, ttl: chrono::Duration) -> usize {
        let cutoff = chrono::Utc::now() - ttl;
        let mut flows = self.flows.lock().await;
        let before = flows.len();
        flows.retain(|_, entry| entry.flow.is_submitting() || entry.last_activity >= cutoff);
        before - flows.len()
    }

    /// Return the current number of live flows.
    pub async fn active_count(&self) -> usize {
        self.flows.lock().await.len()
    }
}

impl Default for FlowRegistry {
    fn default() -> Self {
        Self::new()
    }
}
