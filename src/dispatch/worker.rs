//! The single consumer of the fetch queue.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error_handling::FailureKind;
use crate::fetch::FetchPipeline;
use crate::models::FetchOutcome;

use super::job::FetchJob;
use super::queue::QueueState;

/// Runs queued jobs one at a time, idling `interval` after each.
pub(crate) struct DispatchWorker {
    pub(crate) receiver: mpsc::UnboundedReceiver<FetchJob>,
    pub(crate) pipeline: FetchPipeline,
    pub(crate) state: Arc<QueueState>,
    pub(crate) interval: Duration,
    pub(crate) shutdown: CancellationToken,
}

impl DispatchWorker {
    /// Worker loop. Returns only on shutdown or when every queue handle is gone.
    pub(crate) async fn run(mut self) {
        log::info!(
            "Dispatcher started (interval {:.1}s between upstream jobs)",
            self.interval.as_secs_f64()
        );

        loop {
            let job = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                job = self.receiver.recv() => match job {
                    Some(job) => job,
                    None => break,
                },
            };
            self.state.depth.fetch_sub(1, Ordering::SeqCst);

            self.execute(job).await;

            if !self.interval.is_zero() {
                tokio::select! {
                    biased;
                    _ = self.shutdown.cancelled() => break,
                    _ = tokio::time::sleep(self.interval) => {}
                }
            }
        }

        self.state.worker_running.store(false, Ordering::SeqCst);
        self.drain();
        log::info!("Dispatcher stopped");
    }

    async fn execute(&self, job: FetchJob) {
        let started = Instant::now();
        log::debug!(
            "Job {} started after {:.2}s in queue",
            job.id,
            started.duration_since(job.submitted_at).as_secs_f64()
        );

        let outcome = AssertUnwindSafe(self.pipeline.run(&job.query))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                let reason = panic_message(panic.as_ref());
                log::error!("Job {} panicked: {}", job.id, reason);
                FetchOutcome::failure(
                    FailureKind::UpstreamSearchFailed,
                    format!("internal error while fetching: {}", reason),
                )
            });

        self.state.jobs_processed.fetch_add(1, Ordering::SeqCst);
        let id = job.id;
        let succeeded = outcome.is_success();
        if job.complete(outcome) {
            log::debug!(
                "Job {} finished in {:.2}s (success: {})",
                id,
                started.elapsed().as_secs_f64(),
                succeeded
            );
        } else {
            log::info!("Job {} finished after its caller gave up; result discarded", id);
        }
    }

    // Jobs still queued at shutdown get an explicit outcome instead of a
    // silently dropped sender.
    fn drain(&mut self) {
        self.receiver.close();
        let mut drained = 0usize;
        while let Ok(job) = self.receiver.try_recv() {
            self.state.depth.fetch_sub(1, Ordering::SeqCst);
            job.complete(FetchOutcome::failure(
                FailureKind::Unavailable,
                "dispatcher shut down before the job ran",
            ));
            drained += 1;
        }
        if drained > 0 {
            log::warn!("Dispatcher shut down with {} queued jobs", drained);
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
