use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A background task that calls an update function once per interval until
/// it is stopped. The first call happens immediately.
///
/// Dropping the handle also ends the task (the stop channel closes).
pub struct PeriodicTask {
    name: String,
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    /// Spawn on the current tokio runtime. A zero `period` is clamped to 1ms.
    pub fn spawn<F>(name: impl Into<String>, period: Duration, mut update: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let name = name.into();
        let period = period.max(Duration::from_millis(1));
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => update(),
                }
            }
            tracing::debug!(task = %task_name, "periodic task exited");
        });

        tracing::info!(task = %name, period_ms = period_ms(period), "periodic task started");
        Self {
            name,
            stop_tx,
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signal the task to stop without waiting for it.
    pub fn cancel(&self) {
        self.stop_tx.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signal and wait. The update function is not called after this returns.
    pub async fn stop(self) {
        self.cancel();
        if let Err(e) = self.handle.await {
            tracing::warn!(task = %self.name, error = %e, "periodic task ended abnormally");
        } else {
            tracing::info!(task = %self.name, "periodic task stopped");
        }
    }
}

/// Saturates instead of truncating `as_millis()`'s u128.
fn period_ms(period: Duration) -> u64 {
    u64::try_from(period.as_millis()).unwrap_or(u64::MAX)
}
