//! Client configuration.

use std::fmt;

use crate::error::ClientError;

/// Default service root.
pub const DEFAULT_BASE_URL: &str = "https://ssl.hot.co.zw";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Agent credentials, sent as `x-access-code` / `x-access-password`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_code: String,
    access_password: String,
}

impl Credentials {
    /// Create credentials from an access code (the agent email) and password.
    #[must_use]
    pub fn new(access_code: impl Into<String>, access_password: impl Into<String>) -> Self {
        Self {
            access_code: access_code.into(),
            access_password: access_password.into(),
        }
    }

    /// Load credentials from `HOTRECHARGE_ACCESS_CODE` and
    /// `HOTRECHARGE_ACCESS_PASSWORD`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if either variable is missing or empty.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let required = |key: &str| {
            var(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ClientError::Configuration(format!("{key} is not set")))
        };

        Ok(Self::new(
            required("HOTRECHARGE_ACCESS_CODE")?,
            required("HOTRECHARGE_ACCESS_PASSWORD")?,
        ))
    }

    /// The access code.
    #[must_use]
    pub fn access_code(&self) -> &str {
        &self.access_code
    }

    pub(crate) fn access_password(&self) -> &str {
        &self.access_password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_code", &self.access_code)
            .field("access_password", &"<redacted>")
            .finish()
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Service root (default: `https://ssl.hot.co.zw`).
    pub base_url: String,
    /// Request timeout in seconds (default: 60).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ClientOptions {
    /// Options pointing at a different service root.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load options from `HOTRECHARGE_BASE_URL` and `HOTRECHARGE_TIMEOUT_SECONDS`,
    /// falling back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: var("HOTRECHARGE_BASE_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout_seconds: var("HOTRECHARGE_TIMEOUT_SECONDS")
                .and_then(|s| s.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.timeout_seconds),
        }
    }
}
