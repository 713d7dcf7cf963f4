//! Process lifecycle helpers used by `run_server`.

pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use shutdown::{shutdown_gracefully, shutdown_signal};
pub use statistics::log_final_statistics;
