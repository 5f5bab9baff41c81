//! Search parameter types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Group id of the public layer, used when no group is given
pub const PUBLIC_GROUP: &str = "__world__";

// ============================================================================
// Search Parameters
// ============================================================================

/// Filters for an annotation search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Pagination cursor (the `updated` timestamp of the last record seen)
    #[serde(default)]
    pub search_after: Option<String>,

    /// Explicit cap on the total number of records, overriding the caller's
    /// max results
    #[serde(default)]
    pub limit: Option<usize>,

    /// Free-text match against any field
    #[serde(default)]
    pub any: Option<String>,

    /// Author filter (`acct:name@authority` or bare username)
    #[serde(default)]
    pub user: Option<String>,

    /// Group id; the public group when unset
    #[serde(default)]
    pub group: Option<String>,

    /// Exact document URI
    #[serde(default)]
    pub uri: Option<String>,

    /// URI pattern with `*` / `_` wildcards; ignored when `uri` is set
    #[serde(default)]
    pub wildcard_uri: Option<String>,

    /// Tags; a record must carry all of them
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SearchParams {
    /// Create empty search parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text term
    #[must_use]
    pub fn any(mut self, any: impl Into<String>) -> Self {
        self.any = Some(any.into());
        self
    }

    /// Set the author filter
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the group
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Add a tag
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add several tags
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set the exact URI filter
    #[must_use]
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the wildcard URI filter
    #[must_use]
    pub fn wildcard_uri(mut self, pattern: impl Into<String>) -> Self {
        self.wildcard_uri = Some(pattern.into());
        self
    }

    /// Set the explicit limit override
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Start after the given cursor
    #[must_use]
    pub fn search_after(mut self, cursor: impl Into<String>) -> Self {
        self.search_after = Some(cursor.into());
        self
    }

    /// Current cursor, if any
    pub fn cursor(&self) -> Option<&str> {
        non_empty(self.search_after.as_ref())
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, cursor: impl Into<String>) {
        self.search_after = Some(cursor.into());
    }

    /// Group the search runs against
    pub fn effective_group(&self) -> &str {
        non_empty(self.group.as_ref()).unwrap_or(PUBLIC_GROUP)
    }

    /// Reject parameters the service cannot interpret
    pub fn validate(&self) -> Result<()> {
        if self.tags.iter().any(|t| t.trim().is_empty()) {
            return Err(Error::invalid_value("tags", "tags must not be blank"));
        }
        Ok(())
    }

    /// Render into request query pairs
    ///
    /// `limit` is always the per-request page size; the `limit` override on
    /// these params caps the whole session instead and is never sent.
    pub fn render(&self, page_size: u32) -> RenderedQuery {
        let mut pairs = vec![
            ("limit".to_string(), page_size.to_string()),
            (
                "search_after".to_string(),
                self.cursor().unwrap_or_default().to_string(),
            ),
            (
                "user".to_string(),
                non_empty(self.user.as_ref()).unwrap_or_default().to_string(),
            ),
            ("group".to_string(), self.effective_group().to_string()),
        ];

        for tag in &self.tags {
            pairs.push(("tag".to_string(), tag.clone()));
        }

        if let Some(any) = non_empty(self.any.as_ref()) {
            pairs.push(("any".to_string(), any.to_string()));
        }

        if let Some(uri) = non_empty(self.uri.as_ref()) {
            pairs.push(("uri".to_string(), uri.to_string()));
        } else if let Some(pattern) = non_empty(self.wildcard_uri.as_ref()) {
            pairs.push(("wildcard_uri".to_string(), pattern.to_string()));
        }

        RenderedQuery { pairs }
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

// ============================================================================
// Rendered Query
// ============================================================================

/// Ordered query pairs for one page request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedQuery {
    pairs: Vec<(String, String)>,
}

impl RenderedQuery {
    /// All pairs, in request order
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Consume into the pair list
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }

    /// First value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for a key, in order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Cursor carried by this request (empty on the first page)
    pub fn cursor(&self) -> &str {
        self.get("search_after").unwrap_or_default()
    }
}

impl fmt::Display for RenderedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        f.write_str(&encoded)
    }
}
