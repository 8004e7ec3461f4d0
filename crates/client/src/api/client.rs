//! Request executor for the execution API
//!
//! Issues signed HTTP calls and classifies raw responses into either a
//! decoded payload or one kind of the error taxonomy. Classification is a
//! pure function of the status code; transport failures arrive from the
//! transport layer already folded into `Timeout`/`Connection`.

use orchex_domain::constants::{
    ASYNC_QUERY, EXECUTIONS_PATH, FETCH_TASKS_PATH, FETCH_TASK_PATH, WAIT_PATH,
};
use orchex_domain::{
    canonicalize_keys, response_message, ClientConfig, ExecutionRequest, OrchexError, Payload,
    Result,
};
use reqwest::Method;
use serde_json::{json, Value};
use url::Url;

use super::degrade;
use super::poller::WaitStatus;
use crate::auth::HmacSigner;
use crate::http::{RawResponse, Transport};

/// Signed client for the agent's execution API, bound to one configuration.
///
/// Construction is cheap; the facade builds a fresh instance per operation
/// and nothing is retained across calls.
pub struct ExecutionClient {
    config: ClientConfig,
    transport: Transport,
}

impl ExecutionClient {
    /// Bind a client to a configuration.
    ///
    /// # Errors
    /// Returns `OrchexError::Config` if the transport cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Transport::new(&config.timeouts)?;
        Ok(Self { config, transport })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submit an execution (`POST /executions`, `?async=1` when
    /// asynchronous). Strict: propagates taxonomy errors unchanged.
    ///
    /// # Errors
    /// Any taxonomy kind per the classification table.
    pub async fn submit(&self, request: &ExecutionRequest) -> Result<Payload> {
        let mut url = self.endpoint(EXECUTIONS_PATH)?;
        if request.run_async {
            url.set_query(Some(ASYNC_QUERY));
        }

        let body = json!({
            "operation": request.operation,
            "caller": request.caller_id,
            "params": request.params,
            "idem_key": request.idem_key,
        })
        .to_string();

        let headers = HmacSigner::sign(&request.caller_id, &self.config.hmac_secret, &body);
        let response = self
            .transport
            .execute(Method::POST, url, Some(body), &headers, request.timeouts.as_ref())
            .await?;

        Self::classify(&response)
    }

    /// Fetch the queued task descriptors (`GET /executions/fetch_tasks`).
    /// Strict variant; an absent `tasks` field is an empty list, not an
    /// error.
    ///
    /// # Errors
    /// `Unauthorized`, `Forbidden`, `Unexpected`, or a transport kind.
    pub async fn try_fetch_tasks(&self, caller_id: &str) -> Result<Vec<Payload>> {
        let url = self.endpoint(FETCH_TASKS_PATH)?;
        let headers = HmacSigner::sign(caller_id, &self.config.hmac_secret, "");
        let response = self.transport.execute(Method::GET, url, None, &headers, None).await?;

        match response.status {
            200 => {
                // The `tasks` envelope key is read raw; only the descriptors
                // themselves get canonicalized.
                let body: Payload = serde_json::from_str(&response.body).map_err(|_| {
                    OrchexError::Unexpected { status: response.status, body: response.body.clone() }
                })?;
                let tasks = body.get("tasks").and_then(Value::as_array).cloned().unwrap_or_default();
                Ok(tasks.into_iter().map(canonicalize_keys).collect())
            }
            401 => Err(OrchexError::Unauthorized(response_message(&response.body))),
            403 => Err(OrchexError::Forbidden(response_message(&response.body))),
            status => Err(OrchexError::Unexpected { status, body: response.body }),
        }
    }

    /// Best-effort task listing: logs and returns an empty list on any
    /// internal failure.
    pub async fn fetch_tasks(&self, caller_id: &str) -> Vec<Payload> {
        degrade("fetch_tasks", self.try_fetch_tasks(caller_id).await).unwrap_or_default()
    }

    /// Fetch one task by name (`GET /executions/fetch_task?task=<name>`).
    /// Strict variant.
    ///
    /// # Errors
    /// `InvalidInput` before any network call when the name is blank;
    /// otherwise `NotFound`, `Unauthorized`, `Unexpected`, or a transport
    /// kind.
    pub async fn try_fetch_task(&self, task_name: &str, caller_id: &str) -> Result<Payload> {
        if task_name.trim().is_empty() {
            return Err(OrchexError::InvalidInput("task_name required".to_owned()));
        }

        let mut url = self.endpoint(FETCH_TASK_PATH)?;
        url.query_pairs_mut().append_pair("task", task_name);

        let headers = HmacSigner::sign(caller_id, &self.config.hmac_secret, "");
        let response = self.transport.execute(Method::GET, url, None, &headers, None).await?;

        match response.status {
            200 => Self::decode(&response),
            404 => Err(OrchexError::NotFound(response_message(&response.body))),
            401 => Err(OrchexError::Unauthorized(response_message(&response.body))),
            status => Err(OrchexError::Unexpected { status, body: response.body }),
        }
    }

    /// Best-effort single-task fetch: logs and returns `None` on any
    /// internal failure.
    pub async fn fetch_task(&self, task_name: &str, caller_id: &str) -> Option<Payload> {
        degrade("fetch_task", self.try_fetch_task(task_name, caller_id).await)
    }

    /// One status probe of the wait endpoint
    /// (`GET /executions/wait/<idem_key>`, empty-body signature).
    ///
    /// 200 means the execution completed; 202 means the endpoint answered
    /// with a snapshot while the execution is still pending. Both decode
    /// the payload.
    ///
    /// # Errors
    /// `InvalidInput` before any network call when the key is blank;
    /// otherwise `Unauthorized`, `Unexpected`, or a transport kind.
    pub async fn wait_snapshot(
        &self,
        idem_key: &str,
        caller_id: &str,
    ) -> Result<(WaitStatus, Payload)> {
        if idem_key.trim().is_empty() {
            return Err(OrchexError::InvalidInput("idem_key required".to_owned()));
        }

        let mut url = self.endpoint(WAIT_PATH)?;
        url.path_segments_mut()
            .map_err(|()| OrchexError::Config("host base cannot carry path segments".to_owned()))?
            .push(idem_key);

        let headers = HmacSigner::sign(caller_id, &self.config.hmac_secret, "");
        let response = self.transport.execute(Method::GET, url, None, &headers, None).await?;

        match response.status {
            200 => Ok((WaitStatus::Complete, Self::decode(&response)?)),
            202 => Ok((WaitStatus::Pending, Self::decode(&response)?)),
            401 => Err(OrchexError::Unauthorized(response_message(&response.body))),
            status => Err(OrchexError::Unexpected { status, body: response.body }),
        }
    }

    /// Strict single-shot wait: exactly one network round trip, payload
    /// regardless of complete/pending.
    ///
    /// # Errors
    /// As [`ExecutionClient::wait_snapshot`].
    pub async fn try_wait(&self, idem_key: &str, caller_id: &str) -> Result<Payload> {
        self.wait_snapshot(idem_key, caller_id).await.map(|(_, payload)| payload)
    }

    /// Best-effort single-shot wait: any internal failure (local
    /// validation, transport, or taxonomy) is logged and collapsed into
    /// `None`. Never propagates.
    pub async fn wait(&self, idem_key: &str, caller_id: &str) -> Option<Payload> {
        degrade("wait", self.try_wait(idem_key, caller_id).await)
    }

    /// Classify a raw response per the status table: 200/202 decode the
    /// body, every other code maps to its taxonomy kind.
    fn classify(response: &RawResponse) -> Result<Payload> {
        match response.status {
            200 | 202 => Self::decode(response),
            status => Err(Self::status_error(status, &response.body)),
        }
    }

    fn decode(response: &RawResponse) -> Result<Payload> {
        serde_json::from_str::<Payload>(&response.body).map(canonicalize_keys).map_err(|_| {
            OrchexError::Unexpected { status: response.status, body: response.body.clone() }
        })
    }

    fn status_error(status: u16, body: &str) -> OrchexError {
        match status {
            401 => OrchexError::Unauthorized(response_message(body)),
            403 => OrchexError::Forbidden(response_message(body)),
            404 => OrchexError::NotFound(response_message(body)),
            409 => OrchexError::Conflict(response_message(body)),
            422 => OrchexError::Validation(response_message(body)),
            502 | 504 => OrchexError::BadGateway(response_message(body)),
            500..=599 => OrchexError::Server(response_message(body)),
            _ => OrchexError::Unexpected { status, body: body.to_owned() },
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.config.host_base.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|err| {
            OrchexError::Config(format!("invalid host base {:?}: {err}", self.config.host_base))
        })?;
        base.join(path)
            .map_err(|err| OrchexError::Config(format!("invalid endpoint path {path:?}: {err}")))
    }
}
