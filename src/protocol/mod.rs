//! URL patterns, header formats, and protocol constants.
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`UrlPattern`] | Compiled `/path/:param` template |
//! | [`Segment`] | Literal or parameter piece of a pattern |

pub mod constants;
mod headers;
mod pattern;

pub use headers::{find_header, format_basic_auth, set_header};
pub use pattern::{Segment, UrlPattern};
