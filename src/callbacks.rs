//! Request and response transforms.
//!
//! A request callback rewrites the outgoing headers and body just before the
//! HTTP call; a response callback turns the response into the value returned
//! to the caller. Errors returned by a callback reach the caller unchanged.
//!
//! | Callback | Kind | Effect |
//! |----------|------|--------|
//! | [`identity_request`] | request | pass-through |
//! | [`identity_response`] | response | [`Reply::Raw`] |
//! | [`request_to_json`] | request | `Content-Type: application/json`, body as JSON text |
//! | [`request_to_formdata`] | request | `Content-Type: application/x-www-form-urlencoded`, body as form |
//! | [`response_to_json`] | response | [`Reply::Json`] |
//!
//! # Examples
//!
//! ```
//! use webbind::callbacks::request_to_formdata;
//! use webbind::{Body, Headers};
//! use serde_json::json;
//!
//! let (headers, body) =
//!     request_to_formdata(Headers::new(), Some(Body::from(json!({"comment": "hi"})))).unwrap();
//! assert_eq!(headers["Content-Type"], "application/x-www-form-urlencoded");
//! assert_eq!(body.unwrap().as_text(), Some("comment=hi"));
//! ```

use crate::error::{BindError, Result};
use crate::protocol::constants::{headers as header_names, media_types};
use crate::protocol::set_header;
use crate::types::{Body, Headers, Reply, ResponseMeta};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;

/// Transform applied to `(headers, body)` before sending.
pub type RequestCallback =
    Arc<dyn Fn(Headers, Option<Body>) -> Result<(Headers, Option<Body>)> + Send + Sync>;

/// Transform applied to `(response, content)` after receiving.
pub type ResponseCallback = Arc<dyn Fn(ResponseMeta, Bytes) -> Result<Reply> + Send + Sync>;

/// Wrap a function as a [`RequestCallback`].
pub fn request_callback<F>(f: F) -> RequestCallback
where
    F: Fn(Headers, Option<Body>) -> Result<(Headers, Option<Body>)> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a function as a [`ResponseCallback`].
pub fn response_callback<F>(f: F) -> ResponseCallback
where
    F: Fn(ResponseMeta, Bytes) -> Result<Reply> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Request pass-through.
pub fn identity_request(headers: Headers, body: Option<Body>) -> Result<(Headers, Option<Body>)> {
    Ok((headers, body))
}

/// Response pass-through.
pub fn identity_response(meta: ResponseMeta, content: Bytes) -> Result<Reply> {
    Ok(Reply::Raw { meta, content })
}

/// Encode the body as JSON text and set a JSON content type.
///
/// A missing body encodes as `null`.
pub fn request_to_json(mut headers: Headers, body: Option<Body>) -> Result<(Headers, Option<Body>)> {
    set_header(&mut headers, header_names::CONTENT_TYPE, media_types::JSON);

    let encoded = match body {
        None => Value::Null.to_string(),
        Some(Body::Json(value)) => serde_json::to_string(&value)?,
        Some(Body::Text(text)) => serde_json::to_string(&text)?,
        Some(Body::Bytes(_)) => {
            return Err(BindError::InvalidBody(
                "binary body cannot be encoded as JSON".to_string(),
            ))
        }
    };

    Ok((headers, Some(Body::Text(encoded))))
}

/// Parse the response content as JSON.
pub fn response_to_json(_meta: ResponseMeta, content: Bytes) -> Result<Reply> {
    let value: Value = serde_json::from_slice(&content)?;
    Ok(Reply::Json(value))
}

/// Encode an object body as `application/x-www-form-urlencoded`.
///
/// Strings are written as-is, `null` as an empty value, and anything else as
/// its JSON text. A missing body encodes as an empty form.
pub fn request_to_formdata(
    mut headers: Headers,
    body: Option<Body>,
) -> Result<(Headers, Option<Body>)> {
    set_header(
        &mut headers,
        header_names::CONTENT_TYPE,
        media_types::FORM_URLENCODED,
    );

    let fields = match body {
        None => serde_json::Map::new(),
        Some(Body::Json(Value::Object(fields))) => fields,
        Some(other) => {
            return Err(BindError::InvalidBody(format!(
                "form data requires a JSON object body, got {}",
                describe(&other)
            )))
        }
    };

    let mut form = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in &fields {
        match value {
            Value::String(s) => form.append_pair(key, s),
            Value::Null => form.append_pair(key, ""),
            other => form.append_pair(key, &other.to_string()),
        };
    }

    Ok((headers, Some(Body::Text(form.finish()))))
}

fn describe(body: &Body) -> &'static str {
    match body {
        Body::Json(Value::Array(_)) => "an array",
        Body::Json(_) => "a scalar",
        Body::Text(_) => "text",
        Body::Bytes(_) => "bytes",
    }
}
