//! Named-client registry and operation facade
//!
//! The original process-global client table is reimplemented as an
//! explicit registry object so tests and embedders can hold isolated
//! instances. Each entry maps a name to one [`ClientConfig`]; the facade
//! operations resolve a name, bind a fresh [`ExecutionClient`] to the
//! resolved config, and delegate. No per-operation state survives a call.

use std::collections::HashMap;

use orchex_domain::constants::DEFAULT_CLIENT;
use orchex_domain::{ClientConfig, ExecutionRequest, OrchexError, Payload, Result};
use parking_lot::RwLock;

use crate::api::ExecutionClient;

/// Registry of named client configurations.
///
/// Entries are created on first `configure` and live as long as the
/// registry. Re-configuring an existing name mutates that entry in place
/// (last writer wins); the interior lock makes concurrent configuration of
/// different names safe.
#[derive(Default)]
pub struct ClientRegistry {
    clients: RwLock<HashMap<String, ClientConfig>>,
}

impl ClientRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the named entry with defaults if absent, then apply the
    /// mutator to it.
    pub fn configure(&self, name: &str, mutate: impl FnOnce(&mut ClientConfig)) {
        let mut clients = self.clients.write();
        let entry = clients.entry(name.to_owned()).or_default();
        mutate(entry);
    }

    /// Snapshot of the configuration for `name`.
    ///
    /// The default entry resolves lazily: it is created on first access.
    ///
    /// # Errors
    /// `OrchexError::Config` for any other name that was never configured.
    pub fn get(&self, name: &str) -> Result<ClientConfig> {
        if let Some(config) = self.clients.read().get(name) {
            return Ok(config.clone());
        }
        if name == DEFAULT_CLIENT {
            return Ok(self.clients.write().entry(name.to_owned()).or_default().clone());
        }
        Err(OrchexError::Config(format!("client not configured: {name}")))
    }

    /// Names with an entry, in no particular order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.clients.read().keys().cloned().collect()
    }

    fn client(&self, name: &str) -> Result<ExecutionClient> {
        ExecutionClient::new(self.get(name)?)
    }

    // --- facade operations ---

    /// Submit an execution through the named client. Strict.
    ///
    /// # Errors
    /// `Config` for an unresolvable name, otherwise any taxonomy kind.
    pub async fn submit(&self, name: &str, request: &ExecutionRequest) -> Result<Payload> {
        self.client(name)?.submit(request).await
    }

    /// Best-effort task listing through the named client.
    ///
    /// # Errors
    /// Only `Config`, for an unresolvable name: resolution happens before
    /// the best-effort boundary, exactly like the other local
    /// preconditions.
    pub async fn fetch_tasks(&self, name: &str, caller_id: &str) -> Result<Vec<Payload>> {
        Ok(self.client(name)?.fetch_tasks(caller_id).await)
    }

    /// Best-effort single-task fetch through the named client.
    ///
    /// # Errors
    /// Only `Config`, for an unresolvable name.
    pub async fn fetch_task(
        &self,
        name: &str,
        task_name: &str,
        caller_id: &str,
    ) -> Result<Option<Payload>> {
        Ok(self.client(name)?.fetch_task(task_name, caller_id).await)
    }

    /// Best-effort single-shot wait through the named client.
    ///
    /// # Errors
    /// Only `Config`, for an unresolvable name.
    pub async fn wait(
        &self,
        name: &str,
        idem_key: &str,
        caller_id: &str,
    ) -> Result<Option<Payload>> {
        Ok(self.client(name)?.wait(idem_key, caller_id).await)
    }

    /// Bounded poll for a result through the named client.
    ///
    /// # Errors
    /// Only `Config`, for an unresolvable name.
    pub async fn poll_until_complete(
        &self,
        name: &str,
        idem_key: &str,
        caller_id: &str,
    ) -> Result<Option<Payload>> {
        Ok(self.client(name)?.poll_until_complete(idem_key, caller_id).await)
    }
}
