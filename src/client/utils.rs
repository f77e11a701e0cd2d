//! Utility functions for HTTP clients.
//!
//! - Header map conversion
//! - Status code classification

use crate::types::Headers;

/// Convert an `http` header map into a [`Headers`] map.
///
/// Keys are lowercased; values that are not visible ASCII are skipped. When a
/// header repeats, the values are joined with `", "`.
pub fn convert_headers(headers: &http::HeaderMap) -> Headers {
    let mut converted = Headers::new();
    for (k, v) in headers {
        if let Ok(val) = v.to_str() {
            converted
                .entry(k.as_str().to_string())
                .and_modify(|existing: &mut String| {
                    existing.push_str(", ");
                    existing.push_str(val);
                })
                .or_insert_with(|| val.to_string());
        }
    }
    converted
}

/// Check if status code indicates success
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}
