use crate::Result;
use crate::engine::{FlushSummary, RankingEngine};
use core::time::Duration;
use ohno::IntoAppError;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

const LOG_TARGET: &str = "     flush";

/// Background task that writes dirty groups on a fixed period
///
/// Dropping the task stops the loop without a final flush; use [`FlushTask::shutdown`] to stop it
/// and write whatever is still pending.
#[derive(Debug)]
pub struct FlushTask {
    engine: Arc<RankingEngine>,
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl FlushTask {
    /// Start flushing `engine` every `period`
    ///
    /// The first flush happens one period after the start. Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(engine: Arc<RankingEngine>, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(flush_loop(Arc::clone(&engine), period, stop_rx));

        log::debug!(target: LOG_TARGET, "Flushing every {period:?}");

        Self {
            engine,
            stop: Some(stop_tx),
            handle,
        }
    }

    /// Stop the periodic loop and write every group that is still dirty
    ///
    /// # Errors
    ///
    /// Returns an error if the loop or the final flush panicked
    pub async fn shutdown(mut self) -> Result<FlushSummary> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }

        self.handle.await.into_app_err("flush task failed")?;

        let engine = Arc::clone(&self.engine);
        let summary = tokio::task::spawn_blocking(move || engine.flush_all())
            .await
            .into_app_err("final flush failed")?;

        log::info!(
            target: LOG_TARGET,
            "Final flush wrote {} group(s), {} failed",
            summary.written.len(),
            summary.failed.len()
        );

        Ok(summary)
    }
}

async fn flush_loop(engine: Arc<RankingEngine>, period: Duration, mut stop: oneshot::Receiver<()>) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let engine = Arc::clone(&engine);
                if let Err(e) = tokio::task::spawn_blocking(move || engine.flush_all()).await {
                    log::error!(target: LOG_TARGET, "Periodic flush failed: {e}");
                }
            }

            // a dropped sender also ends the loop
            _ = &mut stop => break,
        }
    }
}
