use std::time::Duration;

use url::Url;

use crate::search::AllowList;

/// Default timeout for a search request (30 seconds).
const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 30;

/// Keyless HTML results page.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://lite.duckduckgo.com/lite/";

/// The lite endpoint blocks obviously scripted clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SEARCH_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
    #[error("SEARCH_ENDPOINT must be an absolute http(s) URL, got {0:?}")]
    InvalidEndpoint(String),
}

/// Default allow-list and search client settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub allowed_domains: AllowList,
    pub search: SearchSettings,
}

/// HTTP settings for the search client.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub endpoint: Url,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_SEARCH_ENDPOINT).expect("default endpoint is a valid URL"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    pub fn new(allowed_domains: AllowList, search: SearchSettings) -> Self {
        Self {
            allowed_domains,
            search,
        }
    }

    /// Read settings from process environment variables.
    ///
    /// - `ALLOWED_DOMAINS` (optional): comma-separated default allow-list; empty means unrestricted
    /// - `SEARCH_ENDPOINT` (optional): results page URL
    /// - `SEARCH_USER_AGENT` (optional): user-agent header sent with each search
    /// - `SEARCH_TIMEOUT_SECS` (optional, default 30): max seconds per search request
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_domains = lookup("ALLOWED_DOMAINS")
            .map(|raw| AllowList::from_csv(&raw))
            .unwrap_or_default();

        let mut search = SearchSettings::default();

        if let Some(raw) = lookup("SEARCH_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            let endpoint = Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidEndpoint(raw.clone()))?;
            if !matches!(endpoint.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidEndpoint(raw));
            }
            search.endpoint = endpoint;
        }

        if let Some(ua) = lookup("SEARCH_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            search.user_agent = ua.trim().to_string();
        }

        if let Some(raw) = lookup("SEARCH_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            search.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            allowed_domains,
            search,
        })
    }
}
