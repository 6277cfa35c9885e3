//! Polling refresher.
//!
//! Timer-driven silent refresh loop for the session list of the selected
//! workspace. Cancel it when the selection changes or the owning view goes
//! away; a running tick finishes before the task exits.

use crate::session_list::SessionListController;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Handle to a running silent-refresh loop.
///
/// Ticks are serialized: each reload completes before the next tick is
/// armed, and ticks that fell due during a slow reload are skipped rather
/// than queued. Overlapping in-flight polls cannot happen.
pub struct PollingRefresher {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl PollingRefresher {
    /// Spawns the refresh loop over the shared session controller.
    ///
    /// The first reload happens one full interval after the spawn; callers
    /// wanting immediate data run `load()` themselves first.
    pub fn spawn(controller: Arc<Mutex<SessionListController>>, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // interval fires immediately; skip that synthetic first tick
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        controller.lock().await.load_silent().await;
                    }
                }
            }
            tracing::debug!("polling refresher stopped");
        });
        Self { cancel, handle }
    }

    /// Requests the loop to stop after any in-flight reload.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Cancels and waits for the loop to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        let _ = (&mut self.handle).await;
    }

    /// True once the loop task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PollingRefresher {
    fn drop(&mut self) {
        // Dropping the handle must not leave a timer refreshing a
        // deselected workspace.
        self.cancel.cancel();
    }
}
