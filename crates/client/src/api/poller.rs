//! Bounded poll loop over the wait endpoint
//!
//! [`ExecutionClient::wait`] performs exactly one round trip; callers that
//! want to block until completion loop here instead, paced by the
//! configuration's `poll_interval_ms` and bounded by `max_wait_ms`. The
//! loop keeps at most one request outstanding and spawns no background
//! tasks.

use std::time::Instant;

use orchex_domain::Payload;
use tracing::{debug, warn};

use super::client::ExecutionClient;

/// Terminal state of one wait-endpoint probe.
///
/// The endpoint answers 200 once the execution completed and 202 with a
/// snapshot while it is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    Complete,
    Pending,
}

impl ExecutionClient {
    /// Probe the wait endpoint until the execution completes or the
    /// configured maximum wait elapses.
    ///
    /// Controller-level failures degrade: a blank key, a transport error,
    /// a taxonomy error, or an exhausted wait window all log and return
    /// `None` rather than propagate.
    pub async fn poll_until_complete(&self, idem_key: &str, caller_id: &str) -> Option<Payload> {
        let deadline = Instant::now() + self.config().max_wait();
        let interval = self.config().poll_interval();

        loop {
            match self.wait_snapshot(idem_key, caller_id).await {
                Ok((WaitStatus::Complete, payload)) => return Some(payload),
                Ok((WaitStatus::Pending, _)) => {
                    debug!(idem_key, "execution still pending");
                }
                Err(error) => {
                    warn!(idem_key, %error, "wait poll failed");
                    return None;
                }
            }

            if Instant::now() + interval > deadline {
                warn!(idem_key, "gave up waiting for execution result");
                return None;
            }
            tokio::time::sleep(interval).await;
        }
    }
}
