//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `STACK_SEARCH_*` environment variables or a
//! configuration file; every field is optional and falls back to the public
//! API's conventions.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::QueryDefaults;
use crate::outbound::stackexchange::ApiIdentity;

const DEFAULT_API_ROOT: &str = "https://api.stackexchange.com";
const DEFAULT_SITE: &str = "stackoverflow";
const DEFAULT_PAGE_SIZE: u32 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration values controlling API access and query defaults.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STACK_SEARCH")]
pub struct ClientSettings {
    /// Root URL request paths are joined onto.
    pub api_root: Option<String>,
    /// Site queried when a search names none.
    pub default_site: Option<String>,
    /// Page size used when a search leaves it at zero.
    pub default_page_size: Option<u32>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Optional user-agent override.
    pub user_agent: Option<String>,
}

impl ClientSettings {
    /// Parse the configured API root, falling back to the public API.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] when the configured root is not a URL.
    pub fn api_root(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_root.as_deref().unwrap_or(DEFAULT_API_ROOT))
    }

    /// Return the configured site, falling back to `stackoverflow`.
    pub fn default_site(&self) -> &str {
        self.default_site
            .as_deref()
            .map(str::trim)
            .filter(|site| !site.is_empty())
            .unwrap_or(DEFAULT_SITE)
    }

    /// Return the configured page size; zero counts as unset.
    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Return the request timeout; zero counts as unset.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Outbound identity for the transport adapter.
    pub fn identity(&self) -> ApiIdentity {
        self.user_agent
            .clone()
            .map(|user_agent| ApiIdentity { user_agent })
            .unwrap_or_default()
    }

    /// Query defaults derived from these settings.
    pub fn query_defaults(&self) -> QueryDefaults {
        QueryDefaults::new(self.default_site(), self.default_page_size())
    }
}
