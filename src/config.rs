//! Configuration for the Elsevier API client.
//!
//! Loads configuration from environment variables or from a JSON
//! credential file, with defaults for everything except the API key.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.elsevier.com";

/// Default minimum interval between requests (fair-use spacing).
const DEFAULT_MIN_INTERVAL_MS: u64 = 250;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default directory for resource dumps.
const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone)]
pub struct Config {
    /// API key sent as `X-ELS-APIKey` on every request
    pub api_key: String,
    /// Institutional token sent as `X-ELS-Insttoken` when present
    pub inst_token: Option<String>,
    pub base_url: String,
    /// Minimum spacing between consecutive requests
    pub min_request_interval: Duration,
    pub request_timeout: Duration,
    /// Directory resource dumps are written to
    pub data_dir: PathBuf,
}

/// On-disk credential file: `apikey` required, `insttoken` optional.
#[derive(Debug, Deserialize)]
struct CredentialFile {
    apikey: String,
    insttoken: Option<String>,
}

impl Config {
    /// Create a configuration with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            inst_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            min_request_interval: Duration::from_millis(DEFAULT_MIN_INTERVAL_MS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }

    /// Load configuration from the environment.
    ///
    /// Reads ELSEVIER_API_KEY (required), ELSEVIER_INST_TOKEN,
    /// ELSEVIER_BASE_URL, ELSEVIER_MIN_INTERVAL_MS, ELSEVIER_TIMEOUT_SECS,
    /// and ELSEVIER_DATA_DIR. Malformed numeric values fall back to the
    /// defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("ELSEVIER_API_KEY")
            .map_err(|_| Error::Config("ELSEVIER_API_KEY is not set".to_string()))?;

        let mut config = Self::new(api_key);
        config.inst_token = env::var("ELSEVIER_INST_TOKEN").ok();
        config.base_url = env_or("ELSEVIER_BASE_URL", DEFAULT_BASE_URL);
        config.min_request_interval = Duration::from_millis(
            env_or("ELSEVIER_MIN_INTERVAL_MS", "250")
                .parse()
                .unwrap_or(DEFAULT_MIN_INTERVAL_MS),
        );
        config.request_timeout = Duration::from_secs(
            env_or("ELSEVIER_TIMEOUT_SECS", "30")
                .parse()
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        );
        config.data_dir = PathBuf::from(env_or("ELSEVIER_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(config)
    }

    /// Load credentials from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let creds: CredentialFile = serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("Invalid credential file: {}", e)))?;

        let mut config = Self::new(creds.apikey);
        config.inst_token = creds.insttoken;
        Ok(config)
    }

    pub fn with_inst_token(mut self, token: impl Into<String>) -> Self {
        self.inst_token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = interval;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
