//! Caller-facing handle to the fetch queue.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error_handling::FailureKind;
use crate::fetch::FetchPipeline;
use crate::models::{FetchOutcome, ImageQuery};

use super::job::FetchJob;
use super::worker::DispatchWorker;

/// Counters shared between the queue handles and the worker.
#[derive(Debug, Default)]
pub(crate) struct QueueState {
    pub(crate) depth: AtomicUsize,
    pub(crate) worker_running: AtomicBool,
    pub(crate) jobs_processed: AtomicU64,
    pub(crate) next_id: AtomicU64,
}

/// Point-in-time view of the queue for health reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueSnapshot {
    pub queue_length: usize,
    pub interval_seconds: f64,
    pub worker_running: bool,
    pub jobs_processed: u64,
}

/// Cloneable handle for submitting image queries to the single worker.
///
/// Jobs run strictly in submission order, one at a time, with the worker
/// idling for `interval` after each job completes.
#[derive(Clone)]
pub struct RequestQueue {
    sender: mpsc::UnboundedSender<FetchJob>,
    state: Arc<QueueState>,
    interval: Duration,
    caller_timeout: Duration,
}

impl RequestQueue {
    /// Spawns the worker and returns a handle plus the worker's join handle.
    ///
    /// The worker stops when `shutdown` is cancelled or when every
    /// `RequestQueue` clone has been dropped.
    pub fn start(
        pipeline: FetchPipeline,
        interval: Duration,
        caller_timeout: Duration,
        shutdown: CancellationToken,
    ) -> (RequestQueue, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let state = Arc::new(QueueState::default());
        state.worker_running.store(true, Ordering::SeqCst);

        let worker = DispatchWorker {
            receiver,
            pipeline,
            state: Arc::clone(&state),
            interval,
            shutdown,
        };
        let handle = tokio::spawn(worker.run());

        (
            RequestQueue {
                sender,
                state,
                interval,
                caller_timeout,
            },
            handle,
        )
    }

    /// Enqueues `query` and waits up to the caller timeout for its outcome.
    ///
    /// On timeout the job stays queued and still runs; only this caller stops
    /// waiting.
    pub async fn submit(&self, query: ImageQuery) -> FetchOutcome {
        let (tx, rx) = oneshot::channel();
        let id = self.state.next_id.fetch_add(1, Ordering::SeqCst);
        let job = FetchJob::new(id, query, tx);

        let depth = self.state.depth.fetch_add(1, Ordering::SeqCst) + 1;
        if self.sender.send(job).is_err() {
            self.state.depth.fetch_sub(1, Ordering::SeqCst);
            log::error!("Job {} rejected: dispatcher is not running", id);
            return FetchOutcome::failure(FailureKind::Unavailable, "dispatcher is not running");
        }
        log::debug!("Queued job {} (queue length {})", id, depth);

        match tokio::time::timeout(self.caller_timeout, rx).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => {
                log::error!("Job {} was dropped without an outcome", id);
                FetchOutcome::failure(
                    FailureKind::Unavailable,
                    "dispatcher stopped before the job completed",
                )
            }
            Err(_) => {
                log::warn!(
                    "Job {} still queued after {}s; caller gave up",
                    id,
                    self.caller_timeout.as_secs_f64()
                );
                FetchOutcome::failure(
                    FailureKind::Timeout,
                    format!(
                        "no result within {}s",
                        self.caller_timeout.as_secs_f64()
                    ),
                )
            }
        }
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            queue_length: self.state.depth.load(Ordering::SeqCst),
            interval_seconds: self.interval.as_secs_f64(),
            worker_running: self.state.worker_running.load(Ordering::SeqCst),
            jobs_processed: self.state.jobs_processed.load(Ordering::SeqCst),
        }
    }

    pub fn len(&self) -> usize {
        self.state.depth.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
