// brewfinder-config: bootstrap configuration for Brewery Finder clients
//
// Fetches the static JSON descriptor once at startup and yields the API
// base URL the transport session is constructed with. The fetch must
// complete before the first domain call — that ordering is a
// program-structure precondition, not something this crate enforces.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors from loading the bootstrap descriptor.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Network-level failure fetching the descriptor.
    #[error("failed to fetch config descriptor: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The config endpoint answered with a non-success status.
    #[error("config endpoint answered HTTP {status}")]
    Http { status: u16 },

    /// The descriptor was not valid JSON, or lacked required fields.
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The bootstrap descriptor.
///
/// `api_base` is the only field the client core consumes; anything else
/// the deployment adds rides along in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    /// Base URL every relative API path resolves against.
    pub api_base: Url,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BootstrapConfig {
    /// Fetch and parse the descriptor from `descriptor_url`.
    pub async fn fetch(descriptor_url: &str) -> Result<Self, ConfigError> {
        debug!(url = descriptor_url, "fetching bootstrap config");

        let resp = reqwest::get(descriptor_url).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ConfigError::Http {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        Self::from_json_str(&body)
    }

    /// Parse a descriptor from raw JSON (tests, locally bundled files).
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}
