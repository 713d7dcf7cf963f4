//! Queued fetch jobs.

use std::time::Instant;

use tokio::sync::oneshot;

use crate::models::{FetchOutcome, ImageQuery};

/// One queued image query together with the slot its caller waits on.
///
/// The completion sender is consumed by `complete`, so an outcome can be
/// delivered at most once.
#[derive(Debug)]
pub struct FetchJob {
    pub id: u64,
    pub query: ImageQuery,
    pub submitted_at: Instant,
    completion: oneshot::Sender<FetchOutcome>,
}

impl FetchJob {
    pub fn new(id: u64, query: ImageQuery, completion: oneshot::Sender<FetchOutcome>) -> Self {
        FetchJob {
            id,
            query,
            submitted_at: Instant::now(),
            completion,
        }
    }

    /// Delivers the outcome. Returns `false` if the caller stopped waiting.
    pub fn complete(self, outcome: FetchOutcome) -> bool {
        self.completion.send(outcome).is_ok()
    }
}
