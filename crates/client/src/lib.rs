//! # Orchex Client
//!
//! Signed HTTP client for submitting and monitoring asynchronous
//! executions on a remote orchestration agent.
//!
//! This crate contains:
//! - HMAC-SHA256 request signing ([`auth`])
//! - The raw request transport ([`http`])
//! - The execution API operations and their classification logic ([`api`])
//! - Configuration loading ([`config`])
//! - The named-client registry facade ([`registry`])
//!
//! ## Architecture
//! - Domain types and the error taxonomy live in `orchex-domain`
//! - Strict operations (`submit`, `try_*`) propagate taxonomy errors;
//!   polling-oriented operations degrade to `None`/empty instead
//! - Every operation is a single awaited round trip: no background tasks,
//!   no automatic retry
//!
//! ## Example
//! ```rust,no_run
//! use orchex_client::ClientRegistry;
//! use orchex_domain::ExecutionRequest;
//! use serde_json::json;
//!
//! # async fn example() -> orchex_domain::Result<()> {
//! let registry = ClientRegistry::new();
//! registry.configure("billing", |config| {
//!     config.host_base = "http://agent.internal:4002".to_owned();
//!     config.hmac_secret = "shared-secret".to_owned();
//! });
//!
//! let request = ExecutionRequest::new("invoice.rebuild", "billing-svc")
//!     .with_params(json!({"month": "2026-07"}))
//!     .asynchronous(true)
//!     .with_idem_key("rebuild-2026-07");
//! let accepted = registry.submit("billing", &request).await?;
//!
//! let result = registry.poll_until_complete("billing", "rebuild-2026-07", "billing-svc").await?;
//! # let _ = (accepted, result);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod http;
pub mod registry;

// Re-export commonly used items
pub use api::{ExecutionClient, WaitStatus};
pub use auth::{HmacSigner, SignedHeaders};
pub use registry::ClientRegistry;
