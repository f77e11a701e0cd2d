//! Endpoint declaration and the dispatch pipeline.
//!
//! An [`Endpoint`] binds a URL pattern and HTTP method to a base URL, an
//! optional Basic-auth requirement, and a pair of transforms. Dispatching it
//! runs:
//!
//! 1. Expand the pattern with the call's parameters and prefix the base URL
//! 2. Insert the `Authorization` header if the endpoint requires auth
//! 3. Apply the request callback to `(headers, body)`
//! 4. Send through the [`HttpClient`]
//! 5. Apply the response callback to `(response, content)`
//!
//! Steps 1 and 2 fail before anything is sent. Nothing is retried.
//!
//! # Examples
//!
//! ```ignore
//! use webbind::{Call, Endpoint};
//! use webbind::callbacks::response_to_json;
//!
//! let get_user = Endpoint::get("/user/show/:user")
//!     .base_url("https://api.example.com")
//!     .response_callback(response_to_json)
//!     .build();
//!
//! let reply = get_user.dispatch(Call::new().with_param("user", "alice")).await?;
//! println!("{:?}", reply.as_json());
//! ```

use crate::callbacks::{self, RequestCallback, ResponseCallback};
use crate::client::{HttpClient, ReqwestClient};
use crate::error::{BindError, Result};
use crate::protocol::constants::headers;
use crate::protocol::{set_header, UrlPattern};
use crate::types::{Body, Call, Credentials, Headers, HttpRequest, Reply, ResponseMeta};
use bytes::Bytes;
use http::Method;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Mutable part of an endpoint.
struct EndpointState {
    base_url: Option<String>,
    credentials: Option<Credentials>,
    auth_header: Option<String>,
    request_callback: RequestCallback,
    response_callback: ResponseCallback,
    client: Option<Arc<dyn HttpClient>>,
}

/// A single declared API call.
///
/// Pattern, method and the auth requirement are fixed at construction. The
/// base URL and client can each be set once; credentials and callbacks can be
/// replaced at any time. All of it sits behind a lock, so an endpoint can be
/// shared across tasks.
pub struct Endpoint {
    pattern: UrlPattern,
    method: Method,
    requires_auth: bool,
    state: RwLock<EndpointState>,
    default_client: OnceLock<Arc<dyn HttpClient>>,
}

impl Endpoint {
    /// Create a GET endpoint with no base URL, no auth and identity callbacks.
    pub fn new(template: &str) -> Self {
        Self::builder(template).build()
    }

    /// Start building an endpoint.
    pub fn builder(template: &str) -> EndpointBuilder {
        EndpointBuilder::new(template)
    }

    /// Builder for a GET endpoint.
    pub fn get(template: &str) -> EndpointBuilder {
        Self::builder(template).method(Method::GET)
    }

    /// Builder for a POST endpoint.
    pub fn post(template: &str) -> EndpointBuilder {
        Self::builder(template).method(Method::POST)
    }

    /// Builder for a PUT endpoint.
    pub fn put(template: &str) -> EndpointBuilder {
        Self::builder(template).method(Method::PUT)
    }

    /// Builder for a PATCH endpoint.
    pub fn patch(template: &str) -> EndpointBuilder {
        Self::builder(template).method(Method::PATCH)
    }

    /// Builder for a DELETE endpoint.
    pub fn delete(template: &str) -> EndpointBuilder {
        Self::builder(template).method(Method::DELETE)
    }

    /// The compiled URL pattern.
    pub fn pattern(&self) -> &UrlPattern {
        &self.pattern
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Whether dispatch sends Basic credentials.
    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    /// The base URL, if one has been set.
    pub fn base_url(&self) -> Option<String> {
        self.state.read().base_url.clone()
    }

    /// Set the base URL unless one is already present.
    ///
    /// Returns `true` if this call stored the URL.
    pub fn set_base_url(&self, url: impl Into<String>) -> bool {
        let mut state = self.state.write();
        if state.base_url.is_some() {
            return false;
        }
        state.base_url = Some(url.into());
        true
    }

    /// Set the HTTP client unless one is already present.
    ///
    /// Returns `true` if this call stored the client.
    pub fn set_client(&self, client: Arc<dyn HttpClient>) -> bool {
        let mut state = self.state.write();
        if state.client.is_some() {
            return false;
        }
        state.client = Some(client);
        true
    }

    /// Replace the request callback.
    pub fn set_request_callback(&self, callback: RequestCallback) {
        self.state.write().request_callback = callback;
    }

    /// Replace the response callback.
    pub fn set_response_callback(&self, callback: ResponseCallback) {
        self.state.write().response_callback = callback;
    }

    /// Store Basic credentials for this endpoint.
    ///
    /// Ignored on endpoints that do not require auth. Calling it again
    /// replaces the previous credentials. No request is made.
    pub fn authenticate(&self, username: &str, password: &str) {
        if !self.requires_auth {
            tracing::debug!(pattern = %self.pattern, "ignoring credentials for public endpoint");
            return;
        }

        let credentials = Credentials::new(username, password);
        let mut state = self.state.write();
        state.auth_header = Some(credentials.header_value());
        state.credentials = Some(credentials);
    }

    /// Whether credentials have been stored.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().auth_header.is_some()
    }

    /// The stored credentials.
    pub fn credentials(&self) -> Option<Credentials> {
        self.state.read().credentials.clone()
    }

    /// Absolute URL for the given path parameters.
    ///
    /// # Errors
    ///
    /// - [`BindError::MissingParameter`] if a pattern parameter is unbound
    /// - [`BindError::Configuration`] if no base URL has been set
    pub fn url_for(&self, params: &std::collections::BTreeMap<String, String>) -> Result<String> {
        let path = self.pattern.expand(params)?;
        let state = self.state.read();
        let base_url = state.base_url.as_deref().ok_or_else(|| {
            BindError::Configuration(format!("no base URL set for endpoint {}", self.pattern))
        })?;
        Ok(format!("{}{}", base_url, path))
    }

    /// Perform the call.
    ///
    /// # Errors
    ///
    /// - [`BindError::MissingParameter`] / [`BindError::Configuration`] from URL resolution
    /// - [`BindError::Authentication`] if auth is required but was never set up
    /// - [`BindError::Transport`] from the HTTP client
    /// - anything returned by the callbacks, unchanged
    pub async fn dispatch(&self, call: Call) -> Result<Reply> {
        let Call {
            params,
            headers: mut request_headers,
            body,
        } = call;

        let url = self.url_for(&params)?;

        let (auth_header, request_callback, response_callback, client) = {
            let state = self.state.read();
            (
                state.auth_header.clone(),
                state.request_callback.clone(),
                state.response_callback.clone(),
                state.client.clone(),
            )
        };

        if self.requires_auth {
            let value = auth_header.ok_or_else(|| {
                BindError::Authentication(format!(
                    "endpoint {} requires authentication but no credentials were set",
                    self.pattern
                ))
            })?;
            set_header(&mut request_headers, headers::AUTHORIZATION, value);
        }

        tracing::debug!(method = %self.method, url = %url, auth = self.requires_auth, "dispatching request");

        let (request_headers, body) = request_callback(request_headers, body)?;
        tracing::trace!(headers = ?request_headers.keys().collect::<Vec<_>>(), "request callback applied");

        let client = client.unwrap_or_else(|| self.fallback_client());
        let (meta, content) = client
            .request(HttpRequest {
                method: self.method.clone(),
                url,
                headers: request_headers,
                body,
            })
            .await?;

        tracing::debug!(status = meta.status, bytes = content.len(), "response received");
        response_callback(meta, content)
    }

    /// Alias for [`dispatch`](Self::dispatch).
    pub async fn request(&self, call: Call) -> Result<Reply> {
        self.dispatch(call).await
    }

    fn fallback_client(&self) -> Arc<dyn HttpClient> {
        self.default_client
            .get_or_init(|| Arc::new(ReqwestClient::new()))
            .clone()
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Endpoint")
            .field("pattern", &self.pattern.template())
            .field("method", &self.method)
            .field("requires_auth", &self.requires_auth)
            .field("base_url", &state.base_url)
            .field("credentials", &state.credentials)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Endpoint`].
///
/// ```
/// use webbind::Endpoint;
/// use webbind::callbacks::request_to_formdata;
/// use http::Method;
///
/// let comment = Endpoint::builder("/issues/comment/:user/:repo/:id")
///     .method(Method::POST)
///     .requires_auth(true)
///     .request_callback(request_to_formdata)
///     .build();
///
/// assert_eq!(comment.method(), &Method::POST);
/// assert!(comment.requires_auth());
/// assert!(comment.base_url().is_none());
/// ```
pub struct EndpointBuilder {
    pattern: UrlPattern,
    method: Method,
    base_url: Option<String>,
    requires_auth: bool,
    request_callback: Option<RequestCallback>,
    response_callback: Option<ResponseCallback>,
    client: Option<Arc<dyn HttpClient>>,
}

impl EndpointBuilder {
    /// Start from a URL template. Defaults to GET.
    pub fn new(template: &str) -> Self {
        EndpointBuilder {
            pattern: UrlPattern::compile(template),
            method: Method::GET,
            base_url: None,
            requires_auth: false,
            request_callback: None,
            response_callback: None,
            client: None,
        }
    }

    /// HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Base URL; takes priority over one supplied later by an API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Require Basic credentials on every dispatch.
    pub fn requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Request transform.
    pub fn request_callback<F>(mut self, f: F) -> Self
    where
        F: Fn(Headers, Option<Body>) -> Result<(Headers, Option<Body>)> + Send + Sync + 'static,
    {
        self.request_callback = Some(callbacks::request_callback(f));
        self
    }

    /// Response transform.
    pub fn response_callback<F>(mut self, f: F) -> Self
    where
        F: Fn(ResponseMeta, Bytes) -> Result<Reply> + Send + Sync + 'static,
    {
        self.response_callback = Some(callbacks::response_callback(f));
        self
    }

    /// HTTP client; takes priority over one supplied later by an API.
    pub fn client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Finish the endpoint.
    pub fn build(self) -> Endpoint {
        Endpoint {
            pattern: self.pattern,
            method: self.method,
            requires_auth: self.requires_auth,
            state: RwLock::new(EndpointState {
                base_url: self.base_url,
                credentials: None,
                auth_header: None,
                request_callback: self
                    .request_callback
                    .unwrap_or_else(|| callbacks::request_callback(callbacks::identity_request)),
                response_callback: self
                    .response_callback
                    .unwrap_or_else(|| callbacks::response_callback(callbacks::identity_response)),
                client: self.client,
            }),
            default_client: OnceLock::new(),
        }
    }
}

impl From<EndpointBuilder> for Endpoint {
    fn from(builder: EndpointBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callbacks::{request_to_json, response_to_json};
    use crate::test_support::{FailingClient, RecordingClient};
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let endpoint = Endpoint::new("/user/show/:user");
        assert_eq!(endpoint.method(), &Method::GET);
        assert!(!endpoint.requires_auth());
        assert!(endpoint.base_url().is_none());
        assert!(!endpoint.is_authenticated());
    }

    #[test]
    fn test_set_base_url_first_write_wins() {
        let endpoint = Endpoint::new("/x");
        assert!(endpoint.set_base_url("https://first.example.com"));
        assert!(!endpoint.set_base_url("https://second.example.com"));
        assert_eq!(endpoint.base_url().as_deref(), Some("https://first.example.com"));
    }

    #[test]
    fn test_explicit_base_url_not_replaced() {
        let endpoint = Endpoint::get("/x").base_url("https://explicit.example.com").build();
        assert!(!endpoint.set_base_url("https://shared.example.com"));
        assert_eq!(endpoint.base_url().as_deref(), Some("https://explicit.example.com"));
    }

    #[test]
    fn test_authenticate_ignored_without_requires_auth() {
        let endpoint = Endpoint::new("/public");
        endpoint.authenticate("u", "p");
        assert!(!endpoint.is_authenticated());
        assert!(endpoint.credentials().is_none());
    }

    #[test]
    fn test_authenticate_overwrites() {
        let endpoint = Endpoint::get("/private").requires_auth(true).build();
        endpoint.authenticate("first", "one");
        endpoint.authenticate("second", "two");
        assert_eq!(endpoint.credentials(), Some(Credentials::new("second", "two")));
    }

    #[test]
    fn test_url_for() {
        let endpoint = Endpoint::get("/user/show/:user")
            .base_url("https://api.example.com")
            .build();
        let params = [("user".to_string(), "alice".to_string())].into_iter().collect();
        assert_eq!(
            endpoint.url_for(&params).unwrap(),
            "https://api.example.com/user/show/alice"
        );
    }

    #[tokio::test]
    async fn test_dispatch_get_without_auth() {
        let client = RecordingClient::new();
        let endpoint = Endpoint::get("/user/show/:user")
            .base_url("https://api.example.com")
            .client(client.clone())
            .build();

        endpoint
            .dispatch(Call::new().with_param("user", "alice"))
            .await
            .unwrap();

        let sent = client.last();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.url, "https://api.example.com/user/show/alice");
        assert!(!sent.headers.contains_key("Authorization"));
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn test_missing_parameter_sends_nothing() {
        let client = RecordingClient::new();
        let endpoint = Endpoint::get("/user/show/:user")
            .base_url("https://api.example.com")
            .client(client.clone())
            .build();

        let err = endpoint.dispatch(Call::new()).await.unwrap_err();
        assert!(matches!(err, BindError::MissingParameter { .. }));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_base_url_is_configuration_error() {
        let client = RecordingClient::new();
        let endpoint = Endpoint::get("/user").client(client.clone()).build();

        let err = endpoint.dispatch(Call::new()).await.unwrap_err();
        assert!(matches!(err, BindError::Configuration(_)));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unauthenticated_dispatch_fails_before_transport() {
        let client = RecordingClient::new();
        let endpoint = Endpoint::get("/user/show")
            .base_url("https://api.example.com")
            .requires_auth(true)
            .client(client.clone())
            .build();

        let err = endpoint.dispatch(Call::new()).await.unwrap_err();
        assert!(matches!(err, BindError::Authentication(_)));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_auth_header_replaces_caller_header() {
        let client = RecordingClient::new();
        let endpoint = Endpoint::get("/me")
            .base_url("https://api.example.com")
            .requires_auth(true)
            .client(client.clone())
            .build();
        endpoint.authenticate("bob", "secret");

        endpoint
            .dispatch(Call::new().with_header("authorization", "Bearer stale"))
            .await
            .unwrap();

        let sent = client.last();
        assert_eq!(sent.headers.len(), 1);
        assert_eq!(sent.headers["Authorization"], "Basic Ym9iOnNlY3JldA==");
    }

    #[tokio::test]
    async fn test_callbacks_applied_in_order() {
        let client = RecordingClient::responding(200, r#"{"id": 1}"#);
        let endpoint = Endpoint::post("/items")
            .base_url("https://api.example.com")
            .request_callback(request_to_json)
            .response_callback(response_to_json)
            .client(client.clone())
            .build();

        let reply = endpoint
            .dispatch(Call::new().with_body(json!({"name": "widget"})))
            .await
            .unwrap();

        assert_eq!(reply, Reply::Json(json!({"id": 1})));
        let sent = client.last();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.headers["Content-Type"], "application/json");
        assert_eq!(sent.body, Some(Body::from(r#"{"name":"widget"}"#)));
    }

    #[tokio::test]
    async fn test_callback_error_propagates_unchanged() {
        let client = RecordingClient::new();
        let endpoint = Endpoint::post("/items")
            .base_url("https://api.example.com")
            .request_callback(|_, _| Err(BindError::InvalidBody("rejected".to_string())))
            .client(client.clone())
            .build();

        let err = endpoint.dispatch(Call::new()).await.unwrap_err();
        assert!(matches!(err, BindError::InvalidBody(ref m) if m == "rejected"));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_surfaces() {
        let endpoint = Endpoint::get("/x")
            .base_url("https://api.example.com")
            .client(Arc::new(FailingClient))
            .build();

        let err = endpoint.request(Call::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "transport error: connection reset by peer");
    }

    #[tokio::test]
    async fn test_set_client_first_write_wins() {
        let explicit = RecordingClient::new();
        let shared = RecordingClient::new();
        let endpoint = Endpoint::get("/x")
            .base_url("https://api.example.com")
            .client(explicit.clone())
            .build();

        assert!(!endpoint.set_client(shared.clone()));
        endpoint.dispatch(Call::new()).await.unwrap();
        assert_eq!(explicit.requests().len(), 1);
        assert!(shared.requests().is_empty());
    }

    #[test]
    fn test_debug_hides_password() {
        let endpoint = Endpoint::get("/x").requires_auth(true).build();
        endpoint.authenticate("bob", "hunter2");
        let printed = format!("{:?}", endpoint);
        assert!(printed.contains("bob"));
        assert!(!printed.contains("hunter2"));
    }
}
