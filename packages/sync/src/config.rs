use locations_common::SiteId;
use std::time::Duration;

/// Fallback host for local development
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

pub const API_URL_ENV: &str = "LOCATIONS_API_URL";
pub const TIMEOUT_ENV: &str = "LOCATIONS_API_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the resource collection under the base URL
pub const COLLECTION_PATH: &str = "locations";

/// Where the collection lives and how long a single call may take
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    base_url: String,
    pub timeout: Duration,
}

impl SyncConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `LOCATIONS_API_URL` and `LOCATIONS_API_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SyncConfig::from_env`] with an injectable variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(API_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match lookup(TIMEOUT_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!("Ignoring invalid {}={:?}", TIMEOUT_ENV, raw);
                    DEFAULT_TIMEOUT
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Self::new(base_url).with_timeout(timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, COLLECTION_PATH)
    }

    pub fn item_url(&self, id: &SiteId) -> String {
        format!("{}/{}/{}", self.base_url, COLLECTION_PATH, id)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = SyncConfig::from_lookup(lookup(&[]));
        assert_eq!(config.base_url(), DEFAULT_API_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.collection_url(), "http://localhost:3000/locations");
    }

    #[test]
    fn test_env_overrides_and_trailing_slash() {
        let config = SyncConfig::from_lookup(lookup(&[
            (API_URL_ENV, "https://api.example.org/prod/"),
            (TIMEOUT_ENV, "3"),
        ]));
        assert_eq!(config.base_url(), "https://api.example.org/prod");
        assert_eq!(config.timeout, Duration::from_secs(3));

        let id = SiteId::new("abc").unwrap();
        assert_eq!(
            config.item_url(&id),
            "https://api.example.org/prod/locations/abc"
        );
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = SyncConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        let config = SyncConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "0")]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_blank_url_uses_fallback() {
        let config = SyncConfig::from_lookup(lookup(&[(API_URL_ENV, "  ")]));
        assert_eq!(config.base_url(), DEFAULT_API_URL);
    }
}
