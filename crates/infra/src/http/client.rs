use std::time::Duration;

use coreshift_core::classify;
use coreshift_domain::{CoreShiftError, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

/// HTTP client with timeout support.
///
/// Requests are sent exactly once: failures surface to the caller and any
/// retry is a user decision, never an automatic one.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    ///
    /// # Errors
    /// `NetworkUnreachable` when no response arrives (connect failure,
    /// timeout, DNS). A response with any status code is `Ok`; status
    /// interpretation belongs to the caller.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder
            .build()
            .map_err(|err| CoreShiftError::internal(format!("failed to build request: {err}")))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(classify::network_unreachable(&err.to_string()))
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), user_agent: None, default_headers: None }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder
            .build()
            .map_err(|err| CoreShiftError::config(format!("failed to build HTTP client: {err}")))?;

        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use coreshift_domain::ErrorKind;
    use reqwest::{Method, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn sends_a_single_request_per_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().expect("http client");
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn does_not_retry_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().expect("http client");
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        // A 5xx is still a response; only transport failures are errors here.
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn connection_failure_maps_to_network_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so the request fails with ECONNREFUSED
        let url = format!("http://{}", addr);

        let client = HttpClient::new().expect("http client");
        let err = client.send(client.request(Method::GET, &url)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NetworkUnreachable);
        assert!(err.display_message().starts_with("Server not reachable"));
    }
}
