use reqwest::Url;

use crate::ValidationError;

/// Address the forecast server listens on when run locally.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";

/// Where and how forecast requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout_ms: Option<u64>,
}

impl ClientConfig {
    /// Validate an absolute `http`/`https` base url. A trailing slash is dropped.
    ///
    /// Query strings and fragments are rejected: the endpoint path is appended
    /// to the base url, so either would swallow it.
    pub fn new(base_url: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidBaseUrl {
            value: base_url.to_owned(),
        };

        let parsed = Url::parse(base_url.trim()).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https")
            || parsed.cannot_be_a_base()
            || parsed.query().is_some()
            || parsed.fragment().is_some()
        {
            return Err(invalid());
        }

        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_owned(),
            timeout_ms: None,
        })
    }

    /// Per-request timeout. `None` keeps the transport default.
    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Result<Self, ValidationError> {
        if timeout_ms == Some(0) {
            return Err(ValidationError::ZeroTimeout);
        }
        self.timeout_ms = timeout_ms;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: None,
        }
    }
}
