//! Execution API client
//!
//! This module provides the signed HTTP client for the agent's execution
//! API: submission, task fetching, and result waiting.
//!
//! # Architecture
//!
//! - One [`ExecutionClient`] per operation, bound to a [`ClientConfig`]
//! - All requests signed through [`crate::auth::HmacSigner`]
//! - Strict operations propagate the error taxonomy unchanged
//! - Polling-oriented operations degrade to `None`/empty instead
//!
//! [`ClientConfig`]: orchex_domain::ClientConfig

pub mod client;
pub mod poller;

pub use client::ExecutionClient;
pub use poller::WaitStatus;

use orchex_domain::Result;
use tracing::warn;

/// Best-effort wrapping combinator.
///
/// The polling-oriented operations (`wait`, `fetch_tasks`, `fetch_task`)
/// must never crash a caller's polling loop on a transient failure: any
/// error is logged and collapsed into `None`. Strict operations never pass
/// through here.
pub(crate) fn degrade<T>(operation: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(operation, %error, "degrading failed operation to empty result");
            None
        }
    }
}
