//! Retrievable API resources.
//!
//! Profiles and documents share one retrieval seam: fetch the resource
//! uri, normalize the response envelope, and keep the payload around for
//! field accessors and dumps.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::client::ElsevierClient;
use crate::error::{Error, Result};

/// A resource addressable by a content API path.
#[async_trait]
pub trait ApiResource {
    /// Resource path relative to the API base URL.
    fn uri(&self) -> &str;

    /// Retrieved payload, if `read` has run.
    fn data(&self) -> Option<&Value>;

    /// Store a retrieved payload.
    fn set_data(&mut self, data: Value);

    /// Fetch the resource and store its normalized payload.
    async fn read(&mut self, client: &ElsevierClient) -> Result<()> {
        let response = client.get_json(self.uri()).await?;
        let payload = unwrap_envelope(response)?;
        debug!(uri = %self.uri(), "Retrieved resource");
        self.set_data(payload);
        Ok(())
    }

    /// Trailing segment of the payload's `coredata.dc:identifier`.
    fn id(&self) -> Option<String> {
        self.data()
            .and_then(|d| d.get("coredata"))
            .and_then(|c| c.get("dc:identifier"))
            .and_then(Value::as_str)
            .and_then(|id| id.rsplit(':').next())
            .map(String::from)
    }

    /// Dump the payload to `<dir>/<digest>.json`, returning the path.
    ///
    /// The dump wraps the payload with the source uri and a retrieval
    /// timestamp.
    fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let data = self.data().ok_or_else(|| {
            Error::MissingData(format!("Resource {} has not been read", self.uri()))
        })?;

        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json", uri_digest(self.uri())));
        let dump = json!({
            "uri": self.uri(),
            "retrieved_at": Utc::now().to_rfc3339(),
            "data": data,
        });
        fs::write(&path, serde_json::to_string_pretty(&dump)?)?;
        Ok(path)
    }
}

/// Unwrap the single-key envelope the API places around retrieval
/// payloads (e.g. `abstracts-retrieval-response`). Array payloads
/// (author, affiliation) reduce to their first element.
pub(crate) fn unwrap_envelope(response: Value) -> Result<Value> {
    let Value::Object(map) = response else {
        return Err(Error::Parse(
            "Expected a JSON object response".to_string(),
        ));
    };

    let Some((key, payload)) = map.into_iter().next() else {
        return Err(Error::Parse("Empty response envelope".to_string()));
    };

    match payload {
        Value::Array(mut items) => {
            if items.is_empty() {
                Err(Error::Parse(format!("Empty {} payload", key)))
            } else {
                Ok(items.remove(0))
            }
        }
        other => Ok(other),
    }
}

/// Stable file name for a resource uri.
pub(crate) fn uri_digest(uri: &str) -> String {
    let digest = Sha256::digest(uri.as_bytes());
    hex::encode(&digest[..8])
}
