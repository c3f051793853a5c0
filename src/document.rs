//! Abstract and full-text document resources.
//!
//! Abstracts come from the Scopus abstract retrieval API; full-text
//! articles come from ScienceDirect, addressed by PII or DOI.

use async_trait::async_trait;
use serde_json::Value;

use crate::resource::ApiResource;

/// Scopus abstract, addressed by Scopus id.
#[derive(Debug, Clone)]
pub struct AbstractDocument {
    scopus_id: u64,
    uri: String,
    data: Option<Value>,
}

impl AbstractDocument {
    pub fn new(scopus_id: u64) -> Self {
        Self {
            scopus_id,
            uri: format!("content/abstract/scopus_id/{}", scopus_id),
            data: None,
        }
    }

    pub fn scopus_id(&self) -> u64 {
        self.scopus_id
    }

    /// Document title from the payload.
    pub fn title(&self) -> Option<&str> {
        coredata_title(self.data.as_ref())
    }
}

#[async_trait]
impl ApiResource for AbstractDocument {
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

/// ScienceDirect full-text article, addressed by PII or DOI.
#[derive(Debug, Clone)]
pub struct FullTextDocument {
    uri: String,
    data: Option<Value>,
}

impl FullTextDocument {
    pub fn from_pii(pii: impl AsRef<str>) -> Self {
        Self {
            uri: format!("content/article/pii/{}", pii.as_ref()),
            data: None,
        }
    }

    pub fn from_doi(doi: impl AsRef<str>) -> Self {
        Self {
            uri: format!("content/article/doi/{}", doi.as_ref()),
            data: None,
        }
    }

    /// Document title from the payload.
    pub fn title(&self) -> Option<&str> {
        coredata_title(self.data.as_ref())
    }
}

#[async_trait]
impl ApiResource for FullTextDocument {
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

fn coredata_title(data: Option<&Value>) -> Option<&str> {
    data?.get("coredata")?.get("dc:title")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_abstract_uri() {
        let doc = AbstractDocument::new(85000000001);
        assert_eq!(doc.uri(), "content/abstract/scopus_id/85000000001");
        assert_eq!(doc.scopus_id(), 85000000001);
    }

    #[test]
    fn test_full_text_uris() {
        let by_pii = FullTextDocument::from_pii("S0008622323000015");
        assert_eq!(by_pii.uri(), "content/article/pii/S0008622323000015");

        let by_doi = FullTextDocument::from_doi("10.1016/j.carbon.2023.01.001");
        assert_eq!(
            by_doi.uri(),
            "content/article/doi/10.1016/j.carbon.2023.01.001"
        );
    }

    #[test]
    fn test_title_extraction() {
        let mut doc = AbstractDocument::new(1);
        assert!(doc.title().is_none());

        doc.set_data(json!({
            "coredata": {
                "dc:identifier": "SCOPUS_ID:1",
                "dc:title": "Graphene oxide membranes"
            }
        }));
        assert_eq!(doc.title(), Some("Graphene oxide membranes"));
        assert_eq!(doc.id().as_deref(), Some("1"));
    }
}
