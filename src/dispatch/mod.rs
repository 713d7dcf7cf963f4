//! Serialized dispatch of image queries.
//!
//! Every upstream fetch goes through a single FIFO queue drained by one
//! worker task. The worker idles for a fixed interval after each job, which
//! keeps the proxy's upstream request rate bounded no matter how many callers
//! are waiting.

mod job;
mod queue;
mod worker;

pub use job::FetchJob;
pub use queue::{QueueSnapshot, RequestQueue};
