//! URL pattern compilation and expansion.
//!
//! Patterns are relative paths split on `/`. A segment that begins with
//! `:name` is a parameter; every other segment is kept verbatim.
//!
//! ```text
//! /issues/comment/:user/:repo/:id
//! ^ ^      ^       ^     ^     ^
//! | |      |       |     |     parameter "id"
//! | |      |       |     parameter "repo"
//! | |      |       parameter "user"
//! | |      literal "comment"
//! | literal "issues"
//! literal "" (leading slash)
//! ```
//!
//! Parameter detection is anchored at the start of the segment, so
//! `day:param2` is a literal. Text following the identifier in a parameter
//! segment (`:id.json`) is not part of the expansion.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//! use webbind::protocol::UrlPattern;
//!
//! let pattern = UrlPattern::compile("/user/show/:user");
//! let mut params = BTreeMap::new();
//! params.insert("user".to_string(), "alice".to_string());
//!
//! assert_eq!(pattern.expand(&params).unwrap(), "/user/show/alice");
//! ```

use crate::error::{BindError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static PARAMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([0-9A-Za-z_]+)").expect("parameter regex is valid"));

/// One `/`-delimited piece of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Emitted verbatim on expansion (may be empty).
    Literal(String),
    /// Replaced by the binding with this name.
    Parameter(String),
}

impl Segment {
    fn classify(text: &str) -> Self {
        match PARAMETER.captures(text).and_then(|c| c.get(1)) {
            Some(name) => Segment::Parameter(name.as_str().to_string()),
            None => Segment::Literal(text.to_string()),
        }
    }
}

/// A compiled URL template.
///
/// Immutable once compiled. Expansion is a pure function of the pattern and
/// the bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    template: String,
    segments: Vec<Segment>,
}

impl UrlPattern {
    /// Compile a `/`-joined template into literal and parameter segments.
    pub fn compile(template: &str) -> Self {
        let segments = template.split('/').map(Segment::classify).collect();
        UrlPattern {
            template: template.to_string(),
            segments,
        }
    }

    /// Expand the pattern into a concrete path.
    ///
    /// Each binding is consumed by the first parameter that uses it, so a name
    /// repeated in the pattern fails on its second occurrence. Unused bindings
    /// are ignored. Values are inserted without escaping.
    ///
    /// # Errors
    ///
    /// [`BindError::MissingParameter`] when a parameter has no binding left.
    pub fn expand(&self, bindings: &BTreeMap<String, String>) -> Result<String> {
        let mut remaining: BTreeMap<&str, &str> = bindings
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => parts.push(text.as_str()),
                Segment::Parameter(name) => {
                    let value = remaining
                        .remove(name.as_str())
                        .ok_or_else(|| BindError::missing_parameter(name.as_str()))?;
                    parts.push(value);
                }
            }
        }

        Ok(parts.join("/"))
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Compiled segments in template order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in the order they appear.
    pub fn parameters(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Parameter(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

impl FromStr for UrlPattern {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(UrlPattern::compile(s))
    }
}

impl From<&str> for UrlPattern {
    fn from(s: &str) -> Self {
        UrlPattern::compile(s)
    }
}
