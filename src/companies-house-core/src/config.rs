use serde::{Deserialize, Serialize};
use url::Url;

/// The public Companies House API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.companieshouse.gov.uk";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid 'base_url' set ({url}). This must be a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent as the Basic auth username. Requests are unauthenticated when unset or empty.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Whole-request timeout, 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub insecure_skip_verify: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("companies-house-rs/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            insecure_skip_verify: false,
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// The API key, if one is set and non-empty.
    pub fn credentials(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Parse and check the base URL.
    ///
    /// Only absolute `http`/`https` URLs with a host are accepted.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let url = Url::parse(self.base_url.trim()).map_err(|e| invalid(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.credentials().is_none());
        assert!(config.user_agent.starts_with("companies-house-rs/"));
    }

    #[test]
    fn test_validate_accepts_https_and_http() {
        let url = ClientConfig::new("key").validate().unwrap();
        assert_eq!(url.host_str(), Some("api.companieshouse.gov.uk"));

        let local = ClientConfig::new("key").with_base_url("http://127.0.0.1:8080/api");
        assert_eq!(local.validate().unwrap().path(), "/api");
    }

    #[test]
    fn test_validate_rejects_malformed_urls() {
        for bad in ["not a url", "", "/company", "ftp://example.com", "mailto:someone@example.com"] {
            let config = ClientConfig::new("key").with_base_url(bad);
            let err = config.validate().unwrap_err();
            assert!(
                err.to_string().contains("Invalid 'base_url'"),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn test_empty_api_key_is_no_credentials() {
        assert!(ClientConfig::new("").credentials().is_none());
        assert_eq!(ClientConfig::new("abc").credentials(), Some("abc"));
    }

    #[test]
    fn test_load_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_key": "secret", "timeout_secs": 5}}"#).unwrap();

        let config = ClientConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!config.insecure_skip_verify);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(ClientConfig::load("/nonexistent/companies-house.json").is_err());
    }
}
