//! # pagevar-client
//!
//! Workspace store collaborator: the [`PageStore`] trait the synchronizer
//! and poller are written against, and [`WorkspaceClient`], the
//! reqwest-backed implementation that owns transport, auth, and pagination.

pub mod error;
pub mod http;
pub mod store;
mod wire;

pub use error::StoreError;
pub use http::WorkspaceClient;
pub use store::PageStore;
