//! Background history refresh
//!
//! A history view may re-fetch on a fixed interval to reduce staleness.
//! Freshness here is best-effort; correctness rests solely on the backend's
//! authoritative transition results.

use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use rehome_core::device::Device;

use super::engine::WorkflowEngine;

/// Cancellable fixed-interval re-fetch of the beneficiary history.
///
/// Tied to the owning view's lifetime: stopping or dropping the poller ends
/// the task, so no timer outlives a navigation. Failed fetches keep the
/// previous snapshot visible.
pub struct HistoryPoller {
    latest: watch::Receiver<Vec<Device>>,
    stop_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl HistoryPoller {
    /// Start polling through `engine` every `interval`
    pub fn spawn(engine: WorkflowEngine, interval: Duration) -> Self {
        let (latest_tx, latest) = watch::channel(Vec::new());
        let (stop_tx, mut stop_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        debug!("History poll stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        match engine.beneficiary_history().await {
                            Ok(history) => {
                                let _ = latest_tx.send(history);
                            }
                            Err(e) => {
                                warn!("History poll failed, keeping last snapshot: {}", e);
                            }
                        }
                    }
                }
            }
        });

        Self {
            latest,
            stop_tx: Some(stop_tx),
            handle,
        }
    }

    /// Receiver for the most recent successfully fetched history
    pub fn latest(&self) -> watch::Receiver<Vec<Device>> {
        self.latest.clone()
    }

    /// Stop the polling task and wait for it to finish
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.handle).await;
    }
}

impl Drop for HistoryPoller {
    fn drop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}
