//! API definitions: named endpoints sharing configuration.
//!
//! An [`Api`] owns its endpoints. When it is built, the shared
//! [`ApiConfig`] is pushed into every endpoint exactly once:
//!
//! | Setting | Rule |
//! |---------|------|
//! | `base_url` | only if the endpoint has none |
//! | `client` | only if the endpoint has none |
//! | `request_callback` | always replaces the endpoint's |
//! | `response_callback` | always replaces the endpoint's |
//!
//! # Examples
//!
//! ```
//! use webbind::{Api, Endpoint};
//! use webbind::callbacks::{request_to_formdata, response_to_json};
//! use http::Method;
//!
//! let github = Api::builder("github")
//!     .base_url("https://github.com/api/v2/json")
//!     .response_callback(response_to_json)
//!     .endpoint("get_user_data", Endpoint::get("/user/show/:user"))
//!     .endpoint("get_user_data_extra", Endpoint::get("/user/show").requires_auth(true))
//!     .endpoint(
//!         "comment_on_issue",
//!         Endpoint::post("/issues/comment/:user/:repo/:id")
//!             .request_callback(request_to_formdata)
//!             .requires_auth(true),
//!     )
//!     .build()
//!     .unwrap();
//!
//! github.authenticate("bob", "secret");
//! assert!(github.endpoint("comment_on_issue").unwrap().is_authenticated());
//! assert!(!github.endpoint("get_user_data").unwrap().is_authenticated());
//! ```

use crate::callbacks::{self, RequestCallback, ResponseCallback};
use crate::client::HttpClient;
use crate::endpoint::Endpoint;
use crate::error::{BindError, Result};
use crate::types::{Body, Call, Headers, Reply, ResponseMeta};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Defaults shared by every endpoint of an [`Api`].
#[derive(Clone, Default)]
pub struct ApiConfig {
    /// Base URL for endpoints that do not declare their own.
    pub base_url: Option<String>,
    /// Request transform for every endpoint.
    pub request_callback: Option<RequestCallback>,
    /// Response transform for every endpoint.
    pub response_callback: Option<ResponseCallback>,
    /// HTTP client for endpoints that do not declare their own.
    pub client: Option<Arc<dyn HttpClient>>,
}

impl ApiConfig {
    fn apply(&self, endpoint: &Endpoint) {
        if let Some(base_url) = &self.base_url {
            endpoint.set_base_url(base_url.clone());
        }
        if let Some(callback) = &self.request_callback {
            endpoint.set_request_callback(callback.clone());
        }
        if let Some(callback) = &self.response_callback {
            endpoint.set_response_callback(callback.clone());
        }
        if let Some(client) = &self.client {
            endpoint.set_client(client.clone());
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("request_callback", &self.request_callback.is_some())
            .field("response_callback", &self.response_callback.is_some())
            .field("client", &self.client.is_some())
            .finish()
    }
}

/// A named collection of endpoints.
#[derive(Debug)]
pub struct Api {
    name: String,
    endpoints: Vec<(String, Endpoint)>,
    index: HashMap<String, usize>,
}

impl Api {
    /// Start building an API.
    pub fn builder(name: impl Into<String>) -> ApiBuilder {
        ApiBuilder::new(name)
    }

    /// Build an API from a config and a list of named endpoints.
    ///
    /// # Errors
    ///
    /// [`BindError::Configuration`] if two endpoints share a name.
    pub fn new<I, N>(name: impl Into<String>, config: ApiConfig, endpoints: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, Endpoint)>,
        N: Into<String>,
    {
        let name = name.into();
        let mut api = Api {
            name,
            endpoints: Vec::new(),
            index: HashMap::new(),
        };

        for (endpoint_name, endpoint) in endpoints {
            let endpoint_name = endpoint_name.into();
            if api.index.contains_key(&endpoint_name) {
                return Err(BindError::Configuration(format!(
                    "duplicate endpoint '{}' in API '{}'",
                    endpoint_name, api.name
                )));
            }
            config.apply(&endpoint);
            api.index.insert(endpoint_name.clone(), api.endpoints.len());
            api.endpoints.push((endpoint_name, endpoint));
        }

        tracing::debug!(
            api = %api.name,
            endpoints = api.endpoints.len(),
            config = ?config,
            "applied shared configuration"
        );

        Ok(api)
    }

    /// The API's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an endpoint by name.
    pub fn endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.index.get(name).map(|&i| &self.endpoints[i].1)
    }

    /// Endpoints in declaration order.
    pub fn endpoints(&self) -> impl Iterator<Item = (&str, &Endpoint)> {
        self.endpoints.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Number of endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether the API declares no endpoints.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Give the same Basic credentials to every endpoint that requires auth.
    ///
    /// Public endpoints are left untouched.
    pub fn authenticate(&self, username: &str, password: &str) {
        let mut count = 0;
        for (_, endpoint) in self.endpoints.iter().filter(|(_, e)| e.requires_auth()) {
            endpoint.authenticate(username, password);
            count += 1;
        }
        tracing::debug!(api = %self.name, endpoints = count, "credentials applied");
    }

    /// Dispatch the named endpoint.
    ///
    /// # Errors
    ///
    /// [`BindError::UnknownEndpoint`] if no endpoint has that name, otherwise
    /// whatever [`Endpoint::dispatch`] returns.
    pub async fn call(&self, name: &str, call: Call) -> Result<Reply> {
        let endpoint = self.endpoint(name).ok_or_else(|| BindError::UnknownEndpoint {
            name: name.to_string(),
        })?;
        endpoint.dispatch(call).await
    }
}

/// Builder for [`Api`].
#[derive(Debug)]
pub struct ApiBuilder {
    name: String,
    config: ApiConfig,
    endpoints: Vec<(String, Endpoint)>,
}

impl ApiBuilder {
    /// Start an API with no shared configuration.
    pub fn new(name: impl Into<String>) -> Self {
        ApiBuilder {
            name: name.into(),
            config: ApiConfig::default(),
            endpoints: Vec::new(),
        }
    }

    /// Replace the whole shared configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Shared base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Shared request transform.
    pub fn request_callback<F>(mut self, f: F) -> Self
    where
        F: Fn(Headers, Option<Body>) -> Result<(Headers, Option<Body>)> + Send + Sync + 'static,
    {
        self.config.request_callback = Some(callbacks::request_callback(f));
        self
    }

    /// Shared response transform.
    pub fn response_callback<F>(mut self, f: F) -> Self
    where
        F: Fn(ResponseMeta, Bytes) -> Result<Reply> + Send + Sync + 'static,
    {
        self.config.response_callback = Some(callbacks::response_callback(f));
        self
    }

    /// Shared HTTP client.
    pub fn client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.config.client = Some(client);
        self
    }

    /// Declare a named endpoint.
    pub fn endpoint(mut self, name: impl Into<String>, endpoint: impl Into<Endpoint>) -> Self {
        self.endpoints.push((name.into(), endpoint.into()));
        self
    }

    /// Build the API, applying the shared configuration to every endpoint.
    ///
    /// # Errors
    ///
    /// [`BindError::Configuration`] if two endpoints share a name.
    pub fn build(self) -> Result<Api> {
        Api::new(self.name, self.config, self.endpoints)
    }
}
