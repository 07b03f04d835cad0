//! Search gateway
//!
//! Sends one JSON POST per call to `{base_url}/{endpoint}`, times the
//! exchange, and returns the decoded response with `latency_seconds` set.
//! See: https://serper.dev

use async_trait::async_trait;
use mcp_common::{IntoMcpError, McpError};
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

use crate::config::SerperConfig;
use crate::types::{Endpoint, SearchResponse};

/// Errors raised by a gateway call
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Connection failure, timeout, or other transport problem
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status
    #[error("Serper error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Body was not a JSON object
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl IntoMcpError for GatewayError {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(self.to_string(), None)
    }
}

/// Trait for search gateways
///
/// The server and the answer resolver only talk to upstream through this
/// trait.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// POST `payload` to `endpoint`
    ///
    /// `timeout` overrides the gateway's default request timeout.
    async fn post(
        &self,
        endpoint: Endpoint,
        payload: Value,
        timeout: Option<Duration>,
    ) -> Result<SearchResponse, GatewayError>;
}

/// Gateway backed by the Serper HTTP API
pub struct SerperGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SerperGateway {
    pub fn new(config: &SerperConfig) -> Result<Self, GatewayError> {
        Url::parse(&config.base_url).map_err(|source| GatewayError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent("serper-mcp/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl SearchGateway for SerperGateway {
    async fn post(
        &self,
        endpoint: Endpoint,
        payload: Value,
        timeout: Option<Duration>,
    ) -> Result<SearchResponse, GatewayError> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!("POST {} payload={}", url, payload);

        let mut request = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&payload);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let latency = started.elapsed().as_secs_f64();

        tracing::debug!("{} responded {} in {:.3}s", endpoint, status, latency);

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            tracing::warn!("{} returned {}: {}", endpoint, status, body);
            return Err(GatewayError::Status { status, body });
        }

        let mut decoded = SearchResponse::new(serde_json::from_slice(&body)?);
        decoded.set_latency(latency);
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> SerperConfig {
        SerperConfig {
            api_key: "test-api-key".to_string(),
            base_url: format!("{}/search", server.uri()),
            ..SerperConfig::default()
        }
    }

    #[tokio::test]
    async fn test_post_sends_headers_and_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search/news"))
            .and(header("X-API-KEY", "test-api-key"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({"q": "rust", "num": 10})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "news": [{"title": "Rust 2.0"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = SerperGateway::new(&config_for(&mock_server)).unwrap();
        let response = gateway
            .post(Endpoint::News, json!({"q": "rust", "num": 10}), None)
            .await
            .unwrap();

        assert_eq!(response.get("news").unwrap()[0]["title"], "Rust 2.0");
        let latency = response.latency_seconds().unwrap();
        assert!(latency >= 0.0);
    }

    #[tokio::test]
    async fn test_latency_is_serialized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search/places"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"places": []})))
            .mount(&mock_server)
            .await;

        let gateway = SerperGateway::new(&config_for(&mock_server)).unwrap();
        let response = gateway
            .post(Endpoint::Places, json!({"q": "cafe"}), None)
            .await
            .unwrap();

        let value = serde_json::to_value(&response).unwrap();
        assert!(value["latency_seconds"].as_f64().unwrap() >= 0.0);
        assert_eq!(value["places"], json!([]));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search/search"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Unauthorized."))
            .mount(&mock_server)
            .await;

        let gateway = SerperGateway::new(&config_for(&mock_server)).unwrap();
        let err = gateway
            .post(Endpoint::Search, json!({"q": "x"}), None)
            .await
            .unwrap_err();

        match err {
            GatewayError::Status { status, body } => {
                assert_eq!(status.as_u16(), 403);
                assert_eq!(body, "Unauthorized.");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let gateway = SerperGateway::new(&config_for(&mock_server)).unwrap();
        let err = gateway
            .post(Endpoint::Search, json!({"q": "x"}), None)
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_timeout_override_applies() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let gateway = SerperGateway::new(&config_for(&mock_server)).unwrap();
        let err = gateway
            .post(
                Endpoint::Search,
                json!({"q": "slow"}),
                Some(Duration::from_millis(50)),
            )
            .await
            .unwrap_err();

        match err {
            GatewayError::Transport(e) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_default_timeout_applies_without_override() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&mock_server)
            .await;

        let config = SerperConfig {
            request_timeout_seconds: 1,
            ..config_for(&mock_server)
        };
        let gateway = SerperGateway::new(&config).unwrap();
        let err = gateway
            .post(Endpoint::Search, json!({"q": "slow"}), None)
            .await
            .unwrap_err();

        match err {
            GatewayError::Transport(e) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unexpected_field_types_pass_through() {
        let mock_server = MockServer::start().await;

        let upstream = json!({
            "answerBox": {"answer": 1969, "title": "Moon landing"},
            "organic": [null, {"link": "https://a.example", "title": "A"}]
        });
        Mock::given(method("POST"))
            .and(path("/search/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&upstream))
            .mount(&mock_server)
            .await;

        let gateway = SerperGateway::new(&config_for(&mock_server)).unwrap();
        let response = gateway
            .post(Endpoint::Search, json!({"q": "x"}), None)
            .await
            .unwrap();

        let mut value = serde_json::to_value(&response).unwrap();
        assert!(value["latency_seconds"].is_number());
        value.as_object_mut().unwrap().remove("latency_seconds");
        assert_eq!(value, upstream);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = SerperConfig {
            base_url: "not a url".to_string(),
            ..SerperConfig::default()
        };
        assert!(matches!(
            SerperGateway::new(&config),
            Err(GatewayError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let config = SerperConfig {
            base_url: "https://google.serper.dev/search/".to_string(),
            ..SerperConfig::default()
        };
        let gateway = SerperGateway::new(&config).unwrap();
        assert_eq!(
            gateway.endpoint_url(Endpoint::Scholar),
            "https://google.serper.dev/search/scholar"
        );
    }
}
