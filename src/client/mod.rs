//! HTTP client capability and its reqwest implementation.
//!
//! Endpoints send every request through an [`HttpClient`]. The crate ships
//! [`ReqwestClient`]; tests and applications can supply their own.
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch  - HttpClient trait and ReqwestClient
//! ├── config - Client configuration
//! └── utils  - Header conversion and status helpers
//! ```
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```
//! use webbind::client::{ClientConfig, ReqwestClient};
//!
//! // Default configuration
//! let client = ReqwestClient::new();
//!
//! // Custom configuration
//! let config = ClientConfig {
//!     request_timeout_ms: 5_000,
//!     ..Default::default()
//! };
//! let client = ReqwestClient::with_config(config);
//! ```
//!
//! ## Utility Functions
//!
//! ```
//! use webbind::client::is_success_status;
//!
//! assert!(is_success_status(204));
//! assert!(!is_success_status(401));
//! ```

mod config;
mod fetch;
mod utils;

pub use config::ClientConfig;
pub use fetch::{HttpClient, ReqwestClient};
pub use utils::*;
