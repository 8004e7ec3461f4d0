//! Protocol constants
//!
//! Centralized location for the wire-level constants shared by the signer,
//! the request executor, and the configuration defaults.

// Authentication headers carried on every request
pub const HEADER_TIMESTAMP: &str = "X-Orch-Timestamp";
pub const HEADER_CALLER: &str = "X-Orch-Caller";
pub const HEADER_SIGNATURE: &str = "X-Orch-Signature";

// Endpoint paths, relative to the configured host base
pub const EXECUTIONS_PATH: &str = "executions";
pub const FETCH_TASKS_PATH: &str = "executions/fetch_tasks";
pub const FETCH_TASK_PATH: &str = "executions/fetch_task";
pub const WAIT_PATH: &str = "executions/wait";

/// Query flag appended to submissions that should run asynchronously.
pub const ASYNC_QUERY: &str = "async=1";

/// Registry entry used when no client name is given.
pub const DEFAULT_CLIENT: &str = "default";

// Configuration defaults (mirrored by `ClientConfig::default`)
pub const DEFAULT_AGENT_HOST: &str = "http://localhost:4002";
pub const DEFAULT_HMAC_SECRET: &str = "supersecret";
pub const DEFAULT_HMAC_SKEW_SECS: u64 = 300;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_MAX_WAIT_MS: u64 = 30_000;
