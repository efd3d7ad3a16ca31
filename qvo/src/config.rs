//! Client configuration.
//!
//! A [`ClientConfig`] carries the API token, the target [`Environment`] and
//! transport settings. It is immutable once a [`Client`](crate::Client) has
//! been built from it; there is no process-wide state.
//!
//! Configuration can be written by hand, parsed from TOML or read from the
//! process environment:
//!
//! ```toml
//! token = "qvo_test_..."
//! environment = "sandbox"
//!
//! [http]
//! timeout_secs = 15
//! ```

use std::{fmt, path::Path, str::FromStr};

use serde::Deserialize;
use url::Url;

use crate::{
    error::{QvoError, Result},
    transport::HttpConfig,
};

/// Base URL of the QVO sandbox ("playground").
pub const SANDBOX_BASE_URL: &str = "https://playground.qvo.cl";

/// Base URL of the QVO production API.
pub const PRODUCTION_BASE_URL: &str = "https://api.qvo.cl";

/// Environment variable holding the API token.
pub const ENV_TOKEN: &str = "QVO_TOKEN";
/// Environment variable selecting `sandbox` or `production`.
pub const ENV_ENVIRONMENT: &str = "QVO_ENVIRONMENT";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "QVO_BASE_URL";
/// Environment variable overriding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "QVO_TIMEOUT_SECS";

/// Target QVO environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Test environment; no real money moves.
    #[default]
    Sandbox,
    /// Live environment.
    Production,
}

impl Environment {
    /// Base URL for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
        }
    }

    /// Maps the legacy "is sandbox" flag to an environment.
    #[must_use]
    pub const fn from_sandbox_flag(is_sandbox: bool) -> Self {
        if is_sandbox { Self::Sandbox } else { Self::Production }
    }
}

impl FromStr for Environment {
    type Err = QvoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "playground" | "test" => Ok(Self::Sandbox),
            "production" | "live" => Ok(Self::Production),
            other => Err(QvoError::Config(format!("unknown environment: {other}"))),
        }
    }
}

/// Client configuration.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// API token sent as `Authorization: Bearer <token>`.
    pub token: String,

    /// Target environment.
    #[serde(default)]
    pub environment: Environment,

    /// Overrides the environment's base URL (proxies, local mock servers).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("http", &self.http)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration with default transport settings.
    #[must_use]
    pub fn new(token: impl Into<String>, environment: Environment) -> Self {
        Self { token: token.into(), environment, base_url: None, http: HttpConfig::default() }
    }

    /// Replaces the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Replaces the transport settings.
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Config`] if the TOML is malformed or the resulting
    /// configuration fails [`validate`](Self::validate).
    ///
    /// # Examples
    ///
    /// ```
    /// use qvo::config::{ClientConfig, Environment};
    ///
    /// let config = ClientConfig::from_toml(r#"
    ///     token = "secret"
    ///     environment = "production"
    /// "#).unwrap();
    ///
    /// assert_eq!(config.environment, Environment::Production);
    /// assert_eq!(config.http.timeout_secs, 15);
    /// ```
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)
            .map_err(|e| QvoError::Config(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QvoError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&contents)
    }

    /// Builds a configuration from `QVO_*` environment variables.
    ///
    /// - `QVO_TOKEN` (required)
    /// - `QVO_ENVIRONMENT`: `sandbox` (default) or `production`
    /// - `QVO_BASE_URL`: optional base URL override
    /// - `QVO_TIMEOUT_SECS`: optional request timeout
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Config`] if the token is missing or a value is invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup(ENV_TOKEN)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| QvoError::Config(format!("{ENV_TOKEN} is not set")))?;

        let environment = match lookup(ENV_ENVIRONMENT).filter(|e| !e.trim().is_empty()) {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        let mut config = Self::new(token, environment);
        config.base_url = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty());

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            config.http.timeout_secs = timeout.trim().parse().map_err(|e| {
                QvoError::Config(format!("{ENV_TIMEOUT_SECS} must be an integer: {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Config`] when:
    /// - the token is empty or contains control characters
    /// - the base URL override does not parse or is not http(s)
    /// - the HTTP settings are out of bounds
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(QvoError::Config("API token cannot be empty".to_owned()));
        }
        if self.token.chars().any(char::is_control) {
            return Err(QvoError::Config(
                "API token contains control characters".to_owned(),
            ));
        }

        self.resolved_base_url()?;
        self.http.validate()
    }

    /// The base URL requests are sent to: the override if set, otherwise the
    /// environment's URL.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Config`] if the URL is invalid.
    pub fn resolved_base_url(&self) -> Result<Url> {
        let raw = self.base_url.as_deref().unwrap_or_else(|| self.environment.base_url());
        let url = Url::parse(raw)
            .map_err(|e| QvoError::Config(format!("invalid base_url '{raw}': {e}")))?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(QvoError::Config(format!(
                "base_url must use http or https, got: {}",
                url.scheme()
            )));
        }
        if url.cannot_be_a_base() {
            return Err(QvoError::Config(format!("base_url cannot be a base: {raw}")));
        }

        Ok(url)
    }
}
