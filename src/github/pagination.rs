//! Link header parsing for paginated endpoints
//!
//! The search API advertises further result pages through the HTTP `Link`
//! header, e.g.
//!
//! ```text
//! <https://api.github.com/search/issues?q=...&page=2>; rel="next",
//! <https://api.github.com/search/issues?q=...&page=5>; rel="last"
//! ```
//!
//! This module reduces that serialization detail to a relation-name → URL
//! mapping. Pagination logic only ever consumes the `next` entry and treats
//! its target as an opaque cursor.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static LINK_VALUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<([^<>]+)>\s*;\s*rel="([^"]+)""#).expect("Failed to compile link header regex")
});

/// Relation links extracted from a `Link` header value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationLinks {
    links: HashMap<String, String>,
}

impl RelationLinks {
    /// Parse a raw `Link` header value.
    ///
    /// Segments that do not carry both a `<URL>` target and a `rel`
    /// attribute are skipped; a duplicated relation keeps the last
    /// occurrence.
    pub fn parse(header_value: &str) -> Self {
        let links = LINK_VALUE_REGEX
            .captures_iter(header_value)
            .map(|captures| (captures[2].to_string(), captures[1].to_string()))
            .collect();
        Self { links }
    }

    /// URL of the relation, if the header advertised one
    pub fn get(&self, relation: &str) -> Option<&str> {
        self.links.get(relation).map(String::as_str)
    }

    /// URL of the next result page, if any
    pub fn next(&self) -> Option<&str> {
        self.get("next")
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
