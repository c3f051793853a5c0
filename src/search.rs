//! Paginated search against the Elsevier search indexes.
//!
//! Builds search requests, follows server-provided pagination links, and
//! accumulates typed entries up to the index retrieval ceiling.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};
use urlencoding::encode;

use crate::client::ElsevierClient;
use crate::error::{Error, Result};
use crate::models::{SearchEntry, SearchResponse};

/// Retrieval ceiling for indexes without cursor-based pagination.
const MAX_UNCURSORED_RESULTS: usize = 5000;

/// Default page size.
const DEFAULT_COUNT: u32 = 25;

/// Search index targeted by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchIndex {
    Scopus,
    ScienceDirect,
    Author,
    Affiliation,
}

impl SearchIndex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scopus => "scopus",
            Self::ScienceDirect => "sciencedirect",
            Self::Author => "author",
            Self::Affiliation => "affiliation",
        }
    }

    /// Whether the index supports cursor-based pagination.
    ///
    /// Cursored retrieval is not subject to the 5000-result ceiling.
    pub fn supports_cursor(&self) -> bool {
        matches!(self, Self::Scopus)
    }
}

impl FromStr for SearchIndex {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scopus" => Ok(Self::Scopus),
            "sciencedirect" => Ok(Self::ScienceDirect),
            "author" => Ok(Self::Author),
            "affiliation" => Ok(Self::Affiliation),
            _ => Err(format!("Unknown search index: {}", s)),
        }
    }
}

impl fmt::Display for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options controlling search execution.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Follow pagination links until the full result set is retrieved
    pub get_all: bool,
    /// Use cursor-based pagination (Scopus only)
    pub use_cursor: bool,
    /// Response view, e.g. "COMPLETE"
    pub view: Option<String>,
    /// Page size
    pub count: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            get_all: false,
            use_cursor: false,
            view: None,
            count: DEFAULT_COUNT,
        }
    }
}

/// A search against one of the Elsevier indexes.
///
/// Holds the query and, after execution, the retrieved entries and the
/// index-wide result count.
#[derive(Debug, Clone)]
pub struct Search {
    query: String,
    index: SearchIndex,
    results: Vec<SearchEntry>,
    total_results: Option<u64>,
}

impl Search {
    pub fn new(index: SearchIndex, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            index,
            results: Vec::new(),
            total_results: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn index(&self) -> SearchIndex {
        self.index
    }

    /// Request uri for the first page, relative to the API base URL.
    pub fn uri(&self) -> String {
        format!(
            "content/search/{}?query={}",
            self.index.as_str(),
            encode(&self.query)
        )
    }

    /// Total number of results that exist in the index for this query.
    ///
    /// May exceed what a single search can retrieve.
    pub fn total_results(&self) -> Option<u64> {
        self.total_results
    }

    pub fn results(&self) -> &[SearchEntry] {
        &self.results
    }

    pub fn into_results(self) -> Vec<SearchEntry> {
        self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True when every result in the index has been retrieved.
    pub fn has_all_results(&self) -> bool {
        self.total_results
            .map(|total| self.results.len() as u64 >= total)
            .unwrap_or(false)
    }

    fn upper_limit_reached(&self, options: &SearchOptions) -> bool {
        !options.use_cursor && self.results.len() >= MAX_UNCURSORED_RESULTS
    }

    /// Execute the search, replacing any previously retrieved results.
    ///
    /// Retrieves the first page; with `get_all`, follows the `next` links
    /// until the full result set is fetched, the ceiling is reached, or a
    /// page arrives without a continuation link.
    pub async fn execute(
        &mut self,
        client: &ElsevierClient,
        options: &SearchOptions,
    ) -> Result<()> {
        if options.use_cursor && !self.index.supports_cursor() {
            return Err(Error::Config(format!(
                "Index {} does not support cursor pagination",
                self.index
            )));
        }

        let mut url = self.uri();
        if options.use_cursor {
            url.push_str("&cursor=*");
        }
        if let Some(view) = &options.view {
            url.push_str(&format!("&view={}", view));
        }
        url.push_str(&format!("&count={}", options.count));

        self.results.clear();
        self.total_results = None;

        let mut page = 0u32;
        let mut next = Some(url);

        while let Some(page_url) = next {
            let value = client.get_json(&page_url).await?;
            let response: SearchResponse = serde_json::from_value(value)
                .map_err(|e| Error::Parse(format!("Failed to parse search response: {}", e)))?;
            let results = response.results;

            self.total_results = Some(results.total());
            let next_href = results.next_link().map(String::from);

            // Empty result sets come back as a single sentinel entry.
            self.results
                .extend(results.entry.into_iter().filter(|e| !e.is_error_entry()));

            debug!(
                index = %self.index,
                page,
                retrieved = self.results.len(),
                total = self.total_results.unwrap_or(0),
                "Retrieved search page"
            );
            page += 1;

            if !options.get_all || self.has_all_results() || self.upper_limit_reached(options) {
                break;
            }
            next = next_href;
        }

        info!(
            index = %self.index,
            query = %self.query,
            retrieved = self.results.len(),
            total = self.total_results.unwrap_or(0),
            "Search complete"
        );
        Ok(())
    }
}
