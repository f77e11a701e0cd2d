//! Core value types passed through the dispatch pipeline.
//!
//! | Type | Role |
//! |------|------|
//! | [`Call`] | Path parameters, headers and body for one dispatch |
//! | [`Body`] | Request body before and after the request transform |
//! | [`HttpRequest`] | What the [`HttpClient`](crate::client::HttpClient) is asked to send |
//! | [`ResponseMeta`] | Status and headers of a response |
//! | [`Reply`] | Output of the response transform |
//! | [`Credentials`] | Basic-auth username/password pair |

use crate::error::Result;
use bytes::Bytes;
use http::Method;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Header map used by transforms and the HTTP client.
pub type Headers = BTreeMap<String, String>;

/// A request body.
///
/// Transforms usually turn a [`Body::Json`] value into an encoded
/// [`Body::Text`]. A `Json` body that reaches the client untouched is sent as
/// its JSON text.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Structured value, not yet encoded.
    Json(Value),
    /// Encoded text.
    Text(String),
    /// Raw bytes.
    Bytes(Bytes),
}

impl Body {
    /// Encode the body for the wire.
    pub fn into_bytes(self) -> Result<Bytes> {
        match self {
            Body::Json(value) => Ok(Bytes::from(serde_json::to_vec(&value)?)),
            Body::Text(text) => Ok(Bytes::from(text)),
            Body::Bytes(bytes) => Ok(bytes),
        }
    }

    /// The text of a [`Body::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(bytes))
    }
}

/// Arguments for a single endpoint dispatch.
///
/// Each `Call` owns its own header map; nothing is shared between calls.
///
/// # Examples
///
/// ```
/// use webbind::Call;
/// use serde_json::json;
///
/// let call = Call::new()
///     .with_param("user", "bob")
///     .with_param("id", "42")
///     .with_header("Accept", "application/json")
///     .with_body(json!({"comment": "hi"}));
///
/// assert_eq!(call.params.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Call {
    /// Values for the pattern's parameters.
    pub params: BTreeMap<String, String>,
    /// Extra request headers.
    pub headers: Headers,
    /// Request body handed to the request transform.
    pub body: Option<Body>,
}

impl Call {
    /// Create an empty call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a path parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Bind several path parameters.
    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A fully-resolved request handed to an [`HttpClient`](crate::client::HttpClient).
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Headers after the request transform.
    pub headers: Headers,
    /// Body after the request transform.
    pub body: Option<Body>,
}

/// Status and headers of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMeta {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, keys lowercased.
    pub headers: Headers,
}

impl ResponseMeta {
    /// Create response metadata with no headers.
    pub fn new(status: u16) -> Self {
        ResponseMeta {
            status,
            headers: Headers::new(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        crate::client::is_success_status(self.status)
    }

    /// Look up a response header, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        crate::protocol::find_header(&self.headers, name)
    }
}

/// Result of the response transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Response passed through unchanged.
    Raw {
        /// Status and headers.
        meta: ResponseMeta,
        /// Response body.
        content: Bytes,
    },
    /// Response body parsed as JSON.
    Json(Value),
}

impl Reply {
    /// The parsed JSON, if the response transform produced any.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Reply::Json(value) => Some(value),
            Reply::Raw { .. } => None,
        }
    }

    /// Consume the reply and return its JSON value.
    pub fn into_json(self) -> Option<Value> {
        match self {
            Reply::Json(value) => Some(value),
            Reply::Raw { .. } => None,
        }
    }

    /// Response metadata of a raw reply.
    pub fn meta(&self) -> Option<&ResponseMeta> {
        match self {
            Reply::Raw { meta, .. } => Some(meta),
            Reply::Json(_) => None,
        }
    }

    /// Body of a raw reply.
    pub fn content(&self) -> Option<&Bytes> {
        match self {
            Reply::Raw { content, .. } => Some(content),
            Reply::Json(_) => None,
        }
    }
}

/// Username and password for HTTP Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The `Authorization` header value for these credentials.
    pub fn header_value(&self) -> String {
        crate::protocol::format_basic_auth(&self.username, &self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_body_into_bytes() {
        let body = Body::from(json!({"a": 1}));
        assert_eq!(body.into_bytes().unwrap(), Bytes::from_static(b"{\"a\":1}"));
    }

    #[test]
    fn test_call_builders_are_independent() {
        let first = Call::new().with_header("X-Trace", "1");
        let second = Call::new();
        assert_eq!(first.headers.len(), 1);
        assert!(second.headers.is_empty());
    }

    #[test]
    fn test_call_with_params() {
        let call = Call::new().with_params([("user", "bob"), ("repo", "r1")]);
        assert_eq!(call.params.get("repo").map(String::as_str), Some("r1"));
    }

    #[test]
    fn test_response_meta_header_lookup() {
        let mut meta = ResponseMeta::new(201);
        meta.headers
            .insert("content-type".to_string(), "application/json".to_string());
        assert!(meta.is_success());
        assert_eq!(meta.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("bob", "secret");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("bob"));
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_reply_accessors() {
        let reply = Reply::Json(json!({"ok": true}));
        assert_eq!(reply.as_json(), Some(&json!({"ok": true})));
        assert!(reply.meta().is_none());
    }
}
