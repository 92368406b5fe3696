//! # pagevar-sync
//!
//! Two-pass workspace synchronization and modified-after polling.
//!
//! Call [`run`] to collect variable assignments from every page and rewrite
//! placeholders across the full page set, or drive an [`UpdatePoller`] to
//! watch a database for records modified after its watermark.

pub mod engine;
pub mod error;
pub mod poller;

pub use engine::{run, SyncReport, WriteOutcome};
pub use error::SyncError;
pub use poller::{PollOutcome, UpdatePoller};
