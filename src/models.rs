//! Wire models for Elsevier search responses.
//!
//! Field names follow the API's opensearch/dc/prism vocabulary via serde
//! renames. Entry fields not modeled explicitly are preserved in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level search response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "search-results")]
    pub results: SearchResults,
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    /// Index-wide result count; the wire value is a string
    #[serde(rename = "opensearch:totalResults")]
    pub total_results: String,
    #[serde(rename = "opensearch:startIndex", default)]
    pub start_index: Option<String>,
    #[serde(rename = "opensearch:itemsPerPage", default)]
    pub items_per_page: Option<String>,
    #[serde(default)]
    pub entry: Vec<SearchEntry>,
    #[serde(default)]
    pub link: Vec<ResultLink>,
}

impl SearchResults {
    /// Index-wide result count, zero on a malformed wire value.
    pub fn total(&self) -> u64 {
        self.total_results.parse().unwrap_or(0)
    }

    /// Href of the next-page link, if any.
    pub fn next_link(&self) -> Option<&str> {
        self.link
            .iter()
            .find(|l| l.ref_type == "next")
            .map(|l| l.href.as_str())
    }
}

/// Pagination link attached to a result page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultLink {
    #[serde(rename = "@ref")]
    pub ref_type: String,
    #[serde(rename = "@href")]
    pub href: String,
}

/// A single search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEntry {
    #[serde(rename = "dc:identifier", default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub eid: Option<String>,
    #[serde(rename = "dc:title", default)]
    pub title: Option<String>,
    #[serde(rename = "dc:creator", default)]
    pub creator: Option<String>,
    #[serde(rename = "prism:publicationName", default)]
    pub publication_name: Option<String>,
    #[serde(rename = "prism:coverDate", default)]
    pub cover_date: Option<String>,
    #[serde(rename = "prism:doi", default)]
    pub doi: Option<String>,
    /// Set on the sentinel entry returned for an empty result set
    #[serde(default)]
    pub error: Option<String>,
    /// Remaining wire fields not modeled above
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl SearchEntry {
    /// True for the sentinel entry the API returns when a result set is
    /// empty.
    pub fn is_error_entry(&self) -> bool {
        self.error.is_some()
    }
}
