//! HTTP transport used by endpoints.
//!
//! Endpoints never talk to the network directly; they hand a fully resolved
//! [`HttpRequest`] to an [`HttpClient`]. [`ReqwestClient`] is the default
//! implementation. Tests and applications can inject their own.
//!
//! # Examples
//!
//! ```ignore
//! use webbind::client::{HttpClient, ReqwestClient};
//! use webbind::HttpRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ReqwestClient::new();
//!     let request = HttpRequest {
//!         method: http::Method::GET,
//!         url: "https://api.example.com/user/show/alice".to_string(),
//!         headers: Default::default(),
//!         body: None,
//!     };
//!     let (meta, content) = client.request(request).await?;
//!     println!("Status: {}", meta.status);
//!     Ok(())
//! }
//! ```

use crate::client::config::ClientConfig;
use crate::client::utils::convert_headers;
use crate::error::{BindError, Result};
use crate::types::{HttpRequest, ResponseMeta};
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use std::sync::Arc;

/// Capability to send one HTTP request.
///
/// Timeouts, redirects and TLS are the implementation's concern. Errors
/// should be reported as [`BindError::Transport`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send the request and return the response metadata and body.
    async fn request(&self, request: HttpRequest) -> Result<(ResponseMeta, Bytes)>;
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl ReqwestClient {
    /// Create a client with default configuration.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration.
    ///
    /// An unusable proxy URL is logged and ignored.
    pub fn with_config(config: ClientConfig) -> Self {
        let mut builder = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone());

        if !config.proxy_url.is_empty() {
            match reqwest::Proxy::all(&config.proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!("Ignoring invalid proxy {}: {}", config.proxy_url, e),
            }
        }

        let client = builder.build().unwrap_or_default();

        ReqwestClient {
            client,
            config: Arc::new(config),
        }
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_client(client: reqwest::Client) -> Self {
        ReqwestClient {
            client,
            config: Arc::new(ClientConfig::default()),
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send(&self, request: HttpRequest) -> Result<(ResponseMeta, Bytes)> {
        let mut req_builder = self.client.request(request.method, &request.url);

        for (k, v) in &request.headers {
            let name = HeaderName::from_bytes(k.as_bytes())?;
            let value = HeaderValue::from_str(v)?;
            req_builder = req_builder.header(name, value);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body.into_bytes()?);
        }

        let response = req_builder.send().await?;

        let meta = ResponseMeta {
            status: response.status().as_u16(),
            headers: convert_headers(response.headers()),
        };

        let content = response.bytes().await?;

        Ok((meta, content))
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn request(&self, request: HttpRequest) -> Result<(ResponseMeta, Bytes)> {
        let url = request.url.clone();
        let result = self.send(request).await;
        if let Err(BindError::Transport(message)) = &result {
            if self.config.enable_logging {
                tracing::warn!("Request to {} failed: {}", url, message);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Body;
    use http::Method;

    #[test]
    fn test_client_creation() {
        let client = ReqwestClient::new();
        assert_eq!(client.config().request_timeout_ms, 30_000);
    }

    #[test]
    fn test_invalid_proxy_ignored() {
        let config = ClientConfig {
            proxy_url: "not a url".to_string(),
            ..Default::default()
        };
        let client = ReqwestClient::with_config(config);
        assert_eq!(client.config().proxy_url, "not a url");
    }

    #[tokio::test]
    async fn test_round_trip_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/issues/comment/bob/r1/42")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body("comment=hi")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let mut headers = crate::types::Headers::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        let request = HttpRequest {
            method: Method::POST,
            url: format!("{}/issues/comment/bob/r1/42", server.url()),
            headers,
            body: Some(Body::from("comment=hi")),
        };

        let (meta, content) = ReqwestClient::new().request(request).await.unwrap();
        mock.assert_async().await;
        assert_eq!(meta.status, 201);
        assert_eq!(meta.header("Content-Type"), Some("application/json"));
        assert_eq!(content, Bytes::from_static(br#"{"ok":true}"#));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let request = HttpRequest {
            method: Method::GET,
            url: "http://127.0.0.1:1/unreachable".to_string(),
            headers: Default::default(),
            body: None,
        };
        let err = ReqwestClient::new().request(request).await.unwrap_err();
        assert!(matches!(err, BindError::Transport(_)));
    }

    #[tokio::test]
    async fn test_invalid_header_rejected_before_send() {
        let mut headers = crate::types::Headers::new();
        headers.insert("Bad Header".to_string(), "x".to_string());
        let request = HttpRequest {
            method: Method::GET,
            url: "http://127.0.0.1:1/".to_string(),
            headers,
            body: None,
        };
        let err = ReqwestClient::new().request(request).await.unwrap_err();
        assert!(matches!(err, BindError::InvalidHeader(_)));
    }
}
