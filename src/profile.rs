//! Author and affiliation profile resources.
//!
//! Profiles are retrieved from the content API and carry an optional
//! document list populated by a cursored Scopus search.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::client::ElsevierClient;
use crate::error::{Error, Result};
use crate::models::SearchEntry;
use crate::resource::{uri_digest, ApiResource};
use crate::search::{Search, SearchIndex, SearchOptions};

/// Scopus author profile.
#[derive(Debug, Clone)]
pub struct AuthorProfile {
    author_id: u64,
    uri: String,
    data: Option<Value>,
    docs: Option<Vec<SearchEntry>>,
}

impl AuthorProfile {
    pub fn new(author_id: u64) -> Self {
        Self {
            author_id,
            uri: format!("content/author/author_id/{}", author_id),
            data: None,
            docs: None,
        }
    }

    pub fn author_id(&self) -> u64 {
        self.author_id
    }

    /// Preferred name as "given-name surname".
    pub fn full_name(&self) -> Option<String> {
        let preferred = self
            .data
            .as_ref()?
            .get("author-profile")?
            .get("preferred-name")?;
        let given = preferred.get("given-name")?.as_str()?;
        let surname = preferred.get("surname")?.as_str()?;
        Some(format!("{} {}", given, surname))
    }

    /// Retrieve the author's document list via a cursored Scopus search.
    pub async fn read_docs(&mut self, client: &ElsevierClient) -> Result<()> {
        let docs = read_profile_docs(client, &format!("AU-ID({})", self.author_id)).await?;
        info!(
            author_id = self.author_id,
            docs = docs.len(),
            "Retrieved author documents"
        );
        self.docs = Some(docs);
        Ok(())
    }

    /// Documents retrieved by `read_docs`.
    pub fn docs(&self) -> Option<&[SearchEntry]> {
        self.docs.as_deref()
    }

    /// Dump the document list next to the profile dump.
    pub fn write_docs_to(&self, dir: &Path) -> Result<PathBuf> {
        write_docs(&self.uri, self.docs.as_deref(), dir)
    }
}

#[async_trait]
impl ApiResource for AuthorProfile {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    fn set_data(&mut self, data: Value) {
        self.data = Some(data);
    }
}

/// Scopus affiliation profile.
#[derive(Debug, Clone)]
pub struct AffiliationProfile {
    affiliation_id: u64,
    uri: String,
    data: Option<Value>,
    docs: Option<Vec<SearchEntry>>,
}

impl AffiliationProfile {
    pub fn new(affiliation_id: u64) -> Self {
        Self {
            affiliation_id,
            uri: format!("content/affiliation/affiliation_id/{}", affiliation_id),
            data: None,
            docs: None,
        }
    }

    pub fn affiliation_id(&self) -> u64 {
        self.affiliation_id
    }

    /// Institution name from the payload.
    pub fn name(&self) -> Option<&str> {
        self.data.as_ref()?.get("affiliation-name")?.as_str()
    }

    /// Retrieve documents published under this affiliation.
    pub async fn read_docs(&mut self, client: &ElsevierClient) -> Result<()> {
        let docs = read_profile_docs(client, &format!("AF-ID({})", self.affiliation_id)).await?;
        info!(
            affiliation_id = self.affiliation_id,
            docs = docs.len(),
            "Retrieved affiliation documents"
        );
        self.docs = Some(docs);
        Ok(())
    }

    /// Documents retrieved by `read_docs`.
    pub fn docs(&self) -> Option<&[SearchEntry]> {
        self.docs.as_deref()
    }

    /// Dump the document list next to the profile dump.
    pub fn write_docs_to(&self, dir: &Path) -> Result<PathBuf> {
        write_docs(&self.uri, self.docs.as_deref(), dir)
    }
}

#[async_trait]
impl ApiResource for AffiliationProfile {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    fn set_data(&mut self, data: Value) {
        self.data = Some(data);
    }
}

async fn read_profile_docs(
    client: &ElsevierClient,
    query: &str,
) -> Result<Vec<SearchEntry>> {
    let mut search = Search::new(SearchIndex::Scopus, query);
    let options = SearchOptions {
        get_all: true,
        use_cursor: true,
        ..Default::default()
    };
    search.execute(client, &options).await?;
    Ok(search.into_results())
}

fn write_docs(uri: &str, docs: Option<&[SearchEntry]>, dir: &Path) -> Result<PathBuf> {
    let docs = docs.ok_or_else(|| {
        Error::MissingData(format!("Documents for {} have not been read", uri))
    })?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}-docs.json", uri_digest(uri)));
    std::fs::write(&path, serde_json::to_string_pretty(docs)?)?;
    Ok(path)
}
