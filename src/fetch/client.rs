//! HTTP client wrapper for single fetch attempts.
//!
//! The client is built once per run and reused for every source so that
//! connections are pooled. The User-Agent is supplied per request so each
//! attempt can present a different browser identity.

use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument};
use url::Url;

use super::content::{RawContent, SourceKind};
use super::error::FetchError;
use crate::user_agent::DEFAULT_ACCEPT_LANGUAGE;

/// Default request timeout (connect + read), in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client issuing one GET per call.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the TLS backend cannot be initialized.
    #[instrument(level = "debug")]
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = base_client_builder(timeout)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Performs one GET and decodes the body according to the source kind.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] when the URL is invalid, the request fails or
    /// times out, the status is not 2xx, or a structured body is not JSON.
    #[instrument(skip(self, user_agent), fields(url = %url))]
    pub async fn get(&self, url: &str, user_agent: &str) -> Result<RawContent, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        let response = self
            .client
            .get(parsed)
            .header(USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(url, e))?;
        debug!(bytes = body.len(), status = status.as_u16(), "response received");

        match SourceKind::of(url) {
            SourceKind::Structured => serde_json::from_str(&body)
                .map(RawContent::Structured)
                .map_err(|e| FetchError::decode(url, e)),
            SourceKind::Text => Ok(RawContent::Text(body)),
        }
    }
}

fn base_client_builder(timeout: Duration) -> ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
    );

    Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .default_headers(headers)
        .gzip(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const UA: &str = "Mozilla/5.0 (test)";

    #[tokio::test]
    async fn test_get_text_source_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/deals/iphone15"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>iPhone 15</h1>"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/deals/iphone15", server.uri());
        let content = client.get(&url, UA).await.unwrap();

        assert_eq!(content, RawContent::Text("<h1>iPhone 15</h1>".to_string()));
    }

    #[tokio::test]
    async fn test_get_structured_source_decodes_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/price-feed"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"model": "iphone 13", "price": 799})),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/api/price-feed?model=iphone13", server.uri());
        let content = client.get(&url, UA).await.unwrap();

        assert_eq!(
            content,
            RawContent::Structured(serde_json::json!({"model": "iphone 13", "price": 799}))
        );
    }

    #[tokio::test]
    async fn test_get_sends_user_agent_and_accept_language() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        client
            .get(&format!("{}/page", server.uri()), UA)
            .await
            .unwrap();

        // Compared as raw header text: the comma-separated language list is
        // one header value.
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let header_text = |name: &str| {
            requests[0]
                .headers
                .get(name)
                .map(|value| value.to_str().unwrap().to_string())
        };
        assert_eq!(header_text("user-agent").as_deref(), Some(UA));
        assert_eq!(
            header_text("accept-language").as_deref(),
            Some(DEFAULT_ACCEPT_LANGUAGE)
        );
        assert_eq!(DEFAULT_ACCEPT_LANGUAGE, "en-US,en;q=0.9");
    }

    #[tokio::test]
    async fn test_get_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let error = client
            .get(&format!("{}/page", server.uri()), UA)
            .await
            .unwrap_err();

        assert!(matches!(error, FetchError::HttpStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_get_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let error = client
            .get(&format!("{}/api/feed", server.uri()), UA)
            .await
            .unwrap_err();

        assert!(matches!(error, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_get_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("slow")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = HttpClient::with_timeout(Duration::from_millis(200)).unwrap();
        let error = client
            .get(&format!("{}/slow", server.uri()), UA)
            .await
            .unwrap_err();

        assert!(matches!(error, FetchError::Timeout { .. }), "{error:?}");
    }

    #[tokio::test]
    async fn test_get_invalid_url() {
        let client = HttpClient::new().unwrap();
        let error = client.get("not a url", UA).await.unwrap_err();
        assert!(matches!(error, FetchError::InvalidUrl { .. }));
    }
}
