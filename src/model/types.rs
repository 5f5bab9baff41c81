//! Record and page types

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Anchoring
// ============================================================================

/// One way of locating an annotated segment in a document
///
/// A target usually carries several alternative selectors describing the same
/// segment. Selector types this crate does not model decode as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Selector {
    /// The quoted text with surrounding context
    #[serde(rename = "TextQuoteSelector")]
    TextQuote {
        /// Quoted text
        #[serde(default)]
        exact: String,
        /// Text just before the quote
        #[serde(default)]
        prefix: String,
        /// Text just after the quote
        #[serde(default)]
        suffix: String,
    },

    /// Character offsets into the document text
    #[serde(rename = "TextPositionSelector")]
    TextPosition {
        /// Offset of the first character
        #[serde(default)]
        start: u64,
        /// Offset one past the last character
        #[serde(default)]
        end: u64,
    },

    /// DOM range (XPath containers plus offsets)
    #[serde(rename = "RangeSelector")]
    Range {
        /// XPath of the start node
        #[serde(default, rename = "startContainer")]
        start_container: String,
        /// XPath of the end node
        #[serde(default, rename = "endContainer")]
        end_container: String,
        /// Offset within the start node
        #[serde(default, rename = "startOffset")]
        start_offset: u64,
        /// Offset within the end node
        #[serde(default, rename = "endOffset")]
        end_offset: u64,
    },

    /// Any other selector type
    #[serde(other)]
    Other,
}

impl Selector {
    /// Check if this selector carries quoted text
    pub fn is_quote(&self) -> bool {
        matches!(self, Self::TextQuote { .. })
    }
}

/// Anchoring target of an annotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Document the target points into
    #[serde(default)]
    pub source: String,

    /// Alternative selectors for the same segment; empty for page notes
    #[serde(default, deserialize_with = "null_as_default")]
    pub selector: Vec<Selector>,
}

// ============================================================================
// Records
// ============================================================================

/// Document metadata attached to an annotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Titles in the order the page declared them
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: Vec<String>,
}

/// Display metadata for an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Name shown instead of the account id
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A single annotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable annotation id; never empty on a record handed to callers
    #[serde(default)]
    pub id: String,
    /// Creation timestamp (RFC 3339)
    #[serde(default)]
    pub created: String,
    /// Last update timestamp, also the pagination cursor
    #[serde(default)]
    pub updated: String,
    /// Author account (`acct:name@authority`)
    #[serde(default)]
    pub user: String,
    /// Annotated document
    #[serde(default)]
    pub uri: String,
    /// Annotation body
    #[serde(default)]
    pub text: String,
    /// Tags in the order the author gave them
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Group id the annotation was posted to
    #[serde(default)]
    pub group: String,
    /// Anchoring targets; empty for page notes and replies
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: Vec<Target>,
    /// Metadata of the annotated document
    #[serde(default, deserialize_with = "null_as_default")]
    pub document: Document,
    /// Ancestors in the reply thread, root first
    #[serde(default, deserialize_with = "null_as_default")]
    pub references: Vec<String>,
    /// Author display metadata
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_info: UserInfo,
}

impl Record {
    /// Parsed creation time
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created).ok()
    }

    /// Parsed update time
    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.updated).ok()
    }

    /// First document title
    pub fn title(&self) -> Option<&str> {
        self.document.title.first().map(String::as_str)
    }

    /// Quoted text of the first target, or an empty string
    pub fn exact_quote(&self) -> String {
        self.target
            .first()
            .map(|t| super::selectors_to_exact(&t.selector))
            .unwrap_or_default()
    }

    /// Check if this annotation replies to another one
    pub fn is_reply(&self) -> bool {
        !self.references.is_empty()
    }

    /// Id of the annotation this one directly replies to
    pub fn parent_id(&self) -> Option<&str> {
        self.references.last().map(String::as_str)
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Search response body as sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Records matching the filter, independent of page size
    pub total: u64,
    /// One page of records, newest update first
    pub rows: Vec<Record>,
}

/// One validated page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Records in server order
    pub records: Vec<Record>,
    /// Server-reported match count
    pub total: u64,
}

impl Page {
    /// Create a page
    pub fn new(records: Vec<Record>, total: u64) -> Self {
        Self { records, total }
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ordering key of the last record
    pub fn last_cursor(&self) -> Option<&str> {
        self.records.last().map(|r| r.updated.as_str())
    }
}

impl TryFrom<SearchResult> for Page {
    type Error = Error;

    fn try_from(result: SearchResult) -> Result<Self> {
        if let Some(position) = result.rows.iter().position(|r| r.id.is_empty()) {
            return Err(Error::malformed_record(position, "record has no id"));
        }
        Ok(Self::new(result.rows, result.total))
    }
}

/// Treat an explicit `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
