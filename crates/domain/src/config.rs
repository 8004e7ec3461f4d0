//! Client configuration structures
//!
//! Pure configuration data; loading from the environment or a file lives in
//! `orchex-client::config::loader`. A config is owned by exactly one named
//! registry entry and is immutable for the duration of a request; per-call
//! overrides travel on the request itself, never here.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AGENT_HOST, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_HMAC_SECRET, DEFAULT_HMAC_SKEW_SECS,
    DEFAULT_MAX_WAIT_MS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_READ_TIMEOUT_MS,
    DEFAULT_WRITE_TIMEOUT_MS,
};

/// Transport timeout budget, in milliseconds.
///
/// `connect` bounds connection establishment; `read` and `write` together
/// bound the request/response exchange. Also used as the per-call override
/// type on [`crate::types::ExecutionRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub connect_ms: u64,
    pub read_ms: u64,
    pub write_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_ms: DEFAULT_READ_TIMEOUT_MS,
            write_ms: DEFAULT_WRITE_TIMEOUT_MS,
        }
    }
}

impl TimeoutConfig {
    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_millis(self.connect_ms)
    }

    /// Total budget for the request/response exchange once connected.
    #[must_use]
    pub fn exchange(&self) -> Duration {
        Duration::from_millis(self.read_ms + self.write_ms)
    }
}

/// Configuration for one named client instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the agent (e.g. `http://localhost:4002`).
    pub host_base: String,
    /// Shared secret for HMAC request signing.
    pub hmac_secret: String,
    /// Maximum allowed clock drift when verifying signatures, in seconds.
    pub hmac_skew_secs: u64,
    /// Default transport timeouts, overridable per call.
    pub timeouts: TimeoutConfig,
    /// Pacing hint between wait-endpoint probes.
    pub poll_interval_ms: u64,
    /// Upper bound on the total time spent polling for a result.
    pub max_wait_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host_base: DEFAULT_AGENT_HOST.to_owned(),
            hmac_secret: DEFAULT_HMAC_SECRET.to_owned(),
            hmac_skew_secs: DEFAULT_HMAC_SKEW_SECS,
            timeouts: TimeoutConfig::default(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_wait_ms: DEFAULT_MAX_WAIT_MS,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_protocol_constants() {
        let config = ClientConfig::default();
        assert_eq!(config.host_base, "http://localhost:4002");
        assert_eq!(config.hmac_secret, "supersecret");
        assert_eq!(config.hmac_skew_secs, 300);
        assert_eq!(config.timeouts.connect(), Duration::from_secs(2));
        assert_eq!(config.timeouts.exchange(), Duration::from_secs(6));
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.max_wait(), Duration::from_secs(30));
    }

    #[test]
    fn partial_config_files_fill_in_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"host_base":"http://agent.internal:9000"}"#).unwrap();
        assert_eq!(config.host_base, "http://agent.internal:9000");
        assert_eq!(config.hmac_secret, "supersecret");
        assert_eq!(config.timeouts, TimeoutConfig::default());
    }
}
