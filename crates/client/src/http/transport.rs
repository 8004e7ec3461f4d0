//! Raw request transport
//!
//! Thin wrapper around `reqwest` that issues exactly one signed round trip
//! per call: no automatic retry, no redirect-following surprises, no
//! connection reuse contract across clients. Transport failures fold into
//! the two transport kinds of the taxonomy: `Timeout` for an exhausted
//! budget, `Connection` for everything below HTTP (refused, DNS, reset).

use orchex_domain::{OrchexError, Result, TimeoutConfig};
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client as ReqwestClient, Method};
use tracing::debug;
use url::Url;

use crate::auth::SignedHeaders;

/// Status code and body text of one HTTP exchange, before classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// One-shot request transport bound to a timeout budget.
pub struct Transport {
    client: ReqwestClient,
    timeouts: TimeoutConfig,
}

impl Transport {
    /// Build a transport from the configured timeout budget.
    ///
    /// # Errors
    /// Returns `OrchexError::Config` if the underlying client cannot be
    /// constructed.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self> {
        Ok(Self { client: build_client(timeouts)?, timeouts: timeouts.clone() })
    }

    /// Issue a single signed request and collect the raw response.
    ///
    /// A per-call `timeout_override` supersedes the configured budget for
    /// this exchange only; the shared configuration is never touched. The
    /// `Content-Type: application/json` header is attached exactly when a
    /// body is present.
    ///
    /// # Errors
    /// Returns `Timeout` or `Connection` when the transport itself fails.
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
        headers: &SignedHeaders,
        timeout_override: Option<&TimeoutConfig>,
    ) -> Result<RawResponse> {
        // An override carries its own connect budget, which reqwest pins at
        // client construction, so the overridden call gets a fresh client.
        let (client, budget) = match timeout_override {
            Some(timeouts) => (build_client(timeouts)?, timeouts.exchange()),
            None => (self.client.clone(), self.timeouts.exchange()),
        };

        let mut builder = client.request(method.clone(), url.clone()).timeout(budget);
        builder = headers.apply(builder);
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        debug!(%method, %url, "sending request");

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_transport_error)?;

        Ok(RawResponse { status, body })
    }
}

fn build_client(timeouts: &TimeoutConfig) -> Result<ReqwestClient> {
    ReqwestClient::builder()
        .connect_timeout(timeouts.connect())
        .timeout(timeouts.exchange())
        .redirect(redirect::Policy::none())
        .no_proxy()
        .build()
        .map_err(|err| OrchexError::Config(format!("failed to build HTTP client: {err}")))
}

fn map_transport_error(err: reqwest::Error) -> OrchexError {
    if err.is_timeout() {
        OrchexError::Timeout("request timed out".to_owned())
    } else {
        OrchexError::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::Duration;

    use wiremock::matchers::{header, header_exists, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::HmacSigner;

    fn test_url(server: &MockServer) -> Url {
        Url::parse(&server.uri()).expect("mock server uri")
    }

    fn signed() -> SignedHeaders {
        HmacSigner::sign("tester", "secret", "")
    }

    #[tokio::test]
    async fn collects_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = Transport::new(&TimeoutConfig::default()).unwrap();
        let response =
            transport.execute(Method::GET, test_url(&server), None, &signed(), None).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "ok");
    }

    #[tokio::test]
    async fn content_type_only_accompanies_a_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("Content-Type", "application/json"))
            .and(header_exists("X-Orch-Signature"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let transport = Transport::new(&TimeoutConfig::default()).unwrap();
        transport
            .execute(Method::POST, test_url(&server), Some("{}".to_owned()), &signed(), None)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);

        // The empty-body GET carries the auth headers but no content type.
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).mount(&server).await;
        let transport = Transport::new(&TimeoutConfig::default()).unwrap();
        transport.execute(Method::GET, test_url(&server), None, &signed(), None).await.unwrap();
        let requests = server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("content-type"));
        assert!(requests[0].headers.contains_key("x-orch-timestamp"));
    }

    #[tokio::test]
    async fn connection_refused_maps_to_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so the request fails with ECONNREFUSED

        let transport = Transport::new(&TimeoutConfig::default()).unwrap();
        let url = Url::parse(&format!("http://{addr}")).unwrap();
        let result = transport.execute(Method::GET, url, None, &signed(), None).await;

        assert!(matches!(result, Err(OrchexError::Connection(_))));
    }

    #[tokio::test]
    async fn exhausted_budget_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let tight = TimeoutConfig { connect_ms: 1000, read_ms: 50, write_ms: 50 };
        let transport = Transport::new(&tight).unwrap();
        let result = transport.execute(Method::GET, test_url(&server), None, &signed(), None).await;

        assert!(matches!(result, Err(OrchexError::Timeout(_))));
    }

    #[tokio::test]
    async fn per_call_override_supersedes_configured_budget() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        // Generous configured budget, tight override: the override wins.
        let transport = Transport::new(&TimeoutConfig::default()).unwrap();
        let tight = TimeoutConfig { connect_ms: 1000, read_ms: 50, write_ms: 50 };
        let result = transport
            .execute(Method::GET, test_url(&server), None, &signed(), Some(&tight))
            .await;

        assert!(matches!(result, Err(OrchexError::Timeout(_))));
    }
}
