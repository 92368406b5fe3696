//! Polling runtime: fixed-interval modified-after checks.

mod error;
mod runtime;

pub use error::DaemonError;
pub use runtime::{run, start_blocking, DEFAULT_POLL_INTERVAL};
