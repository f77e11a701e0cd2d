#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # webbind: declarative bindings for web APIs
//!
//! Declare the endpoints of an HTTP/JSON API as URL templates, and webbind
//! turns each one into an async call.
//!
//! ## Overview
//!
//! 1. **URL patterns** - `/issues/comment/:user/:repo/:id` compiled once, expanded per call
//! 2. **Endpoints** - pattern + method + optional Basic auth + request/response transforms
//! 3. **APIs** - named endpoints sharing a base URL, transforms and HTTP client
//! 4. **Transforms** - JSON and form encoding for requests, JSON parsing for responses
//!
//! ## Usage
//!
//! ```ignore
//! use webbind::{Api, Call, Endpoint};
//! use webbind::callbacks::{request_to_formdata, response_to_json};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> webbind::Result<()> {
//!     let github = Api::builder("github")
//!         .base_url("https://github.com/api/v2/json")
//!         .response_callback(response_to_json)
//!         .endpoint("get_user_data", Endpoint::get("/user/show/:user"))
//!         .endpoint(
//!             "comment_on_issue",
//!             Endpoint::post("/issues/comment/:user/:repo/:id")
//!                 .request_callback(request_to_formdata)
//!                 .requires_auth(true),
//!         )
//!         .build()?;
//!
//!     github.authenticate("bob", "secret");
//!
//!     let call = Call::new()
//!         .with_params([("user", "bob"), ("repo", "r1"), ("id", "42")])
//!         .with_body(json!({"comment": "hi"}));
//!     let reply = github.call("comment_on_issue", call).await?;
//!     println!("{:?}", reply.as_json());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[protocol]** - URL patterns, header formats and constants
//! - **[types]** - Call, Body, Reply and friends
//! - **[callbacks]** - Request/response transforms
//! - **[client]** - HTTP client capability and the reqwest implementation
//! - **[endpoint]** - Endpoint declaration and dispatch
//! - **[api]** - API definitions and shared configuration
//! - **[error]** - Error types and result handling

pub mod api;
pub mod callbacks;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod protocol;
pub mod types;

pub use api::{Api, ApiBuilder, ApiConfig};
pub use callbacks::{RequestCallback, ResponseCallback};
pub use client::{ClientConfig, HttpClient, ReqwestClient};
pub use endpoint::{Endpoint, EndpointBuilder};
pub use error::{BindError, Result};
pub use protocol::UrlPattern;
pub use types::{Body, Call, Credentials, Headers, HttpRequest, Reply, ResponseMeta};

#[cfg(test)]
mod test_support;
