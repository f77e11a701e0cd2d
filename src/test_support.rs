//! Test doubles for the HTTP client capability.

use crate::client::HttpClient;
use crate::error::{BindError, Result};
use crate::types::{HttpRequest, ResponseMeta};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::sync::Arc;

/// Records every request and answers with a fixed response.
pub(crate) struct RecordingClient {
    requests: Mutex<Vec<HttpRequest>>,
    status: u16,
    content: Bytes,
}

impl RecordingClient {
    pub(crate) fn new() -> Arc<Self> {
        Self::responding(200, "")
    }

    pub(crate) fn responding(status: u16, content: &'static str) -> Arc<Self> {
        Arc::new(RecordingClient {
            requests: Mutex::new(Vec::new()),
            status,
            content: Bytes::from_static(content.as_bytes()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn last(&self) -> HttpRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("at least one request was sent")
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn request(&self, request: HttpRequest) -> Result<(ResponseMeta, Bytes)> {
        self.requests.lock().push(request);
        Ok((ResponseMeta::new(self.status), self.content.clone()))
    }
}

/// Fails every request with a transport error.
pub(crate) struct FailingClient;

#[async_trait]
impl HttpClient for FailingClient {
    async fn request(&self, _request: HttpRequest) -> Result<(ResponseMeta, Bytes)> {
        Err(BindError::transport("connection reset by peer"))
    }
}
