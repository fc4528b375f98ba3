//! Client configuration

use std::time::Duration;

use suft_domain::{Result, SuftError};
use url::Url;

/// Production base URL of the SUFT HTTP API.
pub const DEFAULT_BASE_URL: &str = "https://dev.gnivc.ru/tools/suft/api/v1/";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration shared by the auth session and the gateway.
///
/// The timeout applies uniformly to authentication, refresh, and resource
/// requests. Each configured component owns its `reqwest::Client`; there is
/// no process-global HTTP state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) }
    }
}

impl ClientConfig {
    /// Create a configuration for the given API root.
    ///
    /// A trailing slash is appended when missing so endpoint paths can be
    /// joined by concatenation.
    ///
    /// # Errors
    /// Returns [`SuftError::Config`] if `base_url` is not an absolute URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut base_url = base_url.into();
        Url::parse(&base_url)
            .map_err(|err| SuftError::Config(format!("invalid base URL {base_url:?}: {err}")))?;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { base_url, timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) })
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API root, always slash-terminated.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the HTTP client used by a component of this configuration.
    pub(crate) fn build_http(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| SuftError::Config(format!("failed to build HTTP client: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn missing_trailing_slash_is_appended() {
        let config = ClientConfig::new("http://localhost:8080/api/v1").unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080/api/v1/");
    }

    #[test]
    fn relative_urls_are_rejected() {
        let err = ClientConfig::new("api/v1/").unwrap_err();
        assert!(matches!(err, SuftError::Config(_)));
    }
}
