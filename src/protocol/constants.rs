//! Header names and media types used by the dispatch pipeline.

/// Header names.
pub mod headers {
    /// `Authorization`
    pub const AUTHORIZATION: &str = "Authorization";
    /// `Content-Type`
    pub const CONTENT_TYPE: &str = "Content-Type";
}

/// Media types set by the built-in transforms.
pub mod media_types {
    /// JSON request bodies.
    pub const JSON: &str = "application/json";
    /// URL-encoded form bodies.
    pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
}
