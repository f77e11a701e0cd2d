//! Configuration for the reqwest-backed HTTP client.

use serde::{Deserialize, Serialize};

/// Options for [`ReqwestClient`](super::ReqwestClient).
///
/// Deserializable so it can be read from an application's config file; any
/// missing field takes its default.
///
/// ```
/// use webbind::client::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{"request_timeout_ms": 5000}"#).unwrap();
/// assert_eq!(config.request_timeout_ms, 5000);
/// assert!(config.enable_logging);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Proxy for all requests; empty means none.
    pub proxy_url: String,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Log transport failures with `tracing`.
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            request_timeout_ms: 30_000,
            proxy_url: String::new(),
            user_agent: concat!("webbind/", env!("CARGO_PKG_VERSION")).to_string(),
            enable_logging: true,
        }
    }
}
