//! Async client for the Elsevier Scopus and ScienceDirect APIs.
//!
//! Covers the interactive surface of the Elsevier developer APIs:
//! author and affiliation profiles, abstract and full-text document
//! retrieval, and paginated search across the search indexes.
//!
//! # Example
//!
//! ```no_run
//! use elsar::{Config, ElsevierClient, Search, SearchIndex, SearchOptions};
//!
//! # async fn run() -> elsar::Result<()> {
//! let config = Config::from_env()?;
//! let client = ElsevierClient::new(config)?;
//!
//! let mut search = Search::new(SearchIndex::Scopus, "TITLE(graphene)");
//! search.execute(&client, &SearchOptions::default()).await?;
//! println!("{} of {:?} results", search.len(), search.total_results());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod profile;
pub mod resource;
pub mod search;

pub use client::ElsevierClient;
pub use config::Config;
pub use document::{AbstractDocument, FullTextDocument};
pub use error::{Error, Result};
pub use models::{ResultLink, SearchEntry, SearchResponse, SearchResults};
pub use profile::{AffiliationProfile, AuthorProfile};
pub use resource::ApiResource;
pub use search::{Search, SearchIndex, SearchOptions};
