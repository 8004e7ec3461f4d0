//! Request types submitted to the agent

use serde_json::{Map, Value};

use crate::config::TimeoutConfig;
use crate::payload::Payload;

/// One execution submission.
///
/// Transient: exists only for the duration of a single `submit` call. The
/// wire body carries `operation`, `caller`, `params`, and `idem_key`;
/// `run_async` travels as the `async=1` query flag and `timeouts` never
/// leaves the process.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    /// Operation identifier understood by the agent.
    pub operation: String,
    /// Identity of the submitting service or user.
    pub caller_id: String,
    /// Arbitrary structured parameters for the operation.
    pub params: Payload,
    /// Submit asynchronously (`POST /executions?async=1`).
    pub run_async: bool,
    /// Idempotency key correlating this submission with later waits.
    pub idem_key: Option<String>,
    /// Per-call transport timeout override; never mutates shared config.
    pub timeouts: Option<TimeoutConfig>,
}

impl ExecutionRequest {
    pub fn new(operation: impl Into<String>, caller_id: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            caller_id: caller_id.into(),
            params: Value::Object(Map::new()),
            run_async: false,
            idem_key: None,
            timeouts: None,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: Payload) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn asynchronous(mut self, run_async: bool) -> Self {
        self.run_async = run_async;
        self
    }

    #[must_use]
    pub fn with_idem_key(mut self, idem_key: impl Into<String>) -> Self {
        self.idem_key = Some(idem_key.into());
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = Some(timeouts);
        self
    }
}
