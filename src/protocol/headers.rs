//! Header helpers shared by endpoints and transforms.
//!
//! # Header Formats
//!
//! | Header | Format | Example |
//! |--------|--------|---------|
//! | Authorization | `Basic <base64(user:pass)>` | `Basic Ym9iOnNlY3JldA==` |
//! | Content-Type | media type | `application/json` |
//!
//! # Examples
//!
//! ```
//! use webbind::protocol::{format_basic_auth, set_header};
//! use webbind::Headers;
//!
//! let header = format_basic_auth("bob", "secret");
//! assert_eq!(header, "Basic Ym9iOnNlY3JldA==");
//!
//! let mut headers = Headers::new();
//! headers.insert("content-type".to_string(), "text/plain".to_string());
//! set_header(&mut headers, "Content-Type", "application/json");
//! assert_eq!(headers.len(), 1);
//! assert_eq!(headers["Content-Type"], "application/json");
//! ```

use crate::types::Headers;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Format a Basic `Authorization` header value.
///
/// The encoded credentials carry no trailing newline.
pub fn format_basic_auth(username: &str, password: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", username, password));
    format!("Basic {}", encoded)
}

/// Set a header, replacing any existing entry whose name differs only in case.
pub fn set_header(headers: &mut Headers, name: &str, value: impl Into<String>) {
    headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value.into());
}

/// Find a header value by name, ignoring ASCII case.
pub fn find_header<'a, I>(headers: I, name: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    headers
        .into_iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_basic_auth() {
        assert_eq!(format_basic_auth("bob", "secret"), "Basic Ym9iOnNlY3JldA==");
    }

    #[test]
    fn test_format_basic_auth_no_newline() {
        let long = "x".repeat(100);
        assert!(!format_basic_auth(&long, &long).contains('\n'));
    }

    #[test]
    fn test_set_header_replaces_other_case() {
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "text/plain".to_string());
        headers.insert("Accept".to_string(), "*/*".to_string());

        set_header(&mut headers, "Content-Type", "application/json");

        assert_eq!(headers.len(), 2);
        assert_eq!(headers["Content-Type"], "application/json");
        assert!(!headers.contains_key("content-type"));
    }

    #[test]
    fn test_find_header_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "text/plain".to_string());
        assert_eq!(find_header(&headers, "Content-Type"), Some("text/plain"));
        assert_eq!(find_header(&headers, "Accept"), None);
    }
}
