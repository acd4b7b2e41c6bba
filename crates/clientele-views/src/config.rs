//! View configuration.

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};

/// API base URL used when `CLIENTELE_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Base URL of the customer endpoints, including the `/api` prefix.
    pub api_url: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

impl ViewConfig {
    /// Defaults, overridden by `CLIENTELE_API_URL`.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(ViewConfig::default()))
            .merge(Env::prefixed("CLIENTELE_").only(&["api_url"]))
            .extract()
            .map_err(Box::new)
    }
}
