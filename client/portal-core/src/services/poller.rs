use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::ApiError;

/// Named, cancellable fixed-interval refresh task (notification badge,
/// score refresh). Replaces a bare uncancelled timer: the owner holds the
/// handle and tears it down explicitly on page exit.
///
/// A failing tick is logged and the task keeps running; nothing is retried
/// between ticks, and a stalled tick delays rather than bursts.
pub struct PeriodicTask {
    name: String,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    /// Spawns the task. The first tick fires immediately, then every
    /// `interval`.
    pub fn spawn<F, Fut>(name: impl Into<String>, interval: Duration, mut op: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ApiError>> + Send,
    {
        let name = name.into();
        let task_name = name.clone();
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            tracing::debug!(task = %task_name, ?interval, "periodic task started");
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = op().await {
                            tracing::warn!(task = %task_name, error = %e, "periodic refresh failed");
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!(task = %task_name, "periodic task stopped");
        });

        Self {
            name,
            shutdown,
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signals shutdown and waits for the in-flight tick (if any) to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}
