//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ORDERDESK_API_URL` - Backend admin API base URL (default: `http://localhost:5000/admin/api`)
//! - `ORDERDESK_HTTP_TIMEOUT_SECS` - Transport timeout in seconds (default: none)
//! - `ORDERDESK_CURRENCY` - Display currency code (default: AED)
//! - `ORDERDESK_EMAIL` - Operator login email (for non-interactive use)
//! - `ORDERDESK_PASSWORD` - Operator login password (must be set with `ORDERDESK_EMAIL`)
//! - `ORDERDESK_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::time::Duration;

use orderdesk_core::CurrencyCode;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default backend admin API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/admin/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Console configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend admin API base URL (always ends with `/`)
    pub api_url: Url,
    /// Transport timeout for each HTTP call; `None` disables it
    pub http_timeout: Option<Duration>,
    /// Currency used when formatting amounts
    pub currency: CurrencyCode,
    /// Operator credentials for non-interactive login
    pub credentials: Option<Credentials>,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

/// Operator login credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct Credentials {
    /// Operator email
    pub email: String,
    /// Operator password
    pub password: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from an email and password.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    fn from_env() -> Result<Option<Self>, ConfigError> {
        let email = get_optional_env("ORDERDESK_EMAIL");
        let password = get_optional_env("ORDERDESK_PASSWORD");

        match (email, password) {
            (Some(email), Some(password)) => Ok(Some(Self::new(email, password))),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "ORDERDESK_*".to_string(),
                "Both ORDERDESK_EMAIL and ORDERDESK_PASSWORD must be set together".to_string(),
            )),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("ORDERDESK_API_URL", DEFAULT_API_URL))?;
        let http_timeout = get_optional_env("ORDERDESK_HTTP_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "ORDERDESK_HTTP_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;
        let currency = get_env_or_default("ORDERDESK_CURRENCY", "AED")
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("ORDERDESK_CURRENCY".to_string(), e))?;
        let credentials = Credentials::from_env()?;
        let log_json = get_optional_env("ORDERDESK_LOG_JSON").is_some();
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            api_url,
            http_timeout,
            currency,
            credentials,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }

    /// Configuration pointing at the given base URL with defaults elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse.
    pub fn for_api_url(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            http_timeout: None,
            currency: CurrencyCode::default(),
            credentials: None,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        })
    }

    /// Returns the operator credentials, if configured.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the API base URL, normalizing it to end with `/` so relative
/// resource paths join beneath it instead of replacing its last segment.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("ORDERDESK_API_URL".to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            "ORDERDESK_API_URL".to_string(),
            format!("{raw} cannot be used as a base URL"),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_adds_trailing_slash() {
        let url = parse_api_url("http://localhost:5000/admin/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/admin/api/");
        assert_eq!(
            url.join("orders/7/status").unwrap().as_str(),
            "http://localhost:5000/admin/api/orders/7/status"
        );
    }

    #[test]
    fn test_parse_api_url_keeps_existing_slash() {
        let url = parse_api_url("https://ops.example.com/admin/api/").unwrap();
        assert_eq!(url.as_str(), "https://ops.example.com/admin/api/");
    }

    #[test]
    fn test_parse_api_url_rejects_garbage() {
        assert!(matches!(
            parse_api_url("not a url"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(parse_api_url("mailto:ops@example.com").is_err());
    }

    #[test]
    fn test_for_api_url_defaults() {
        let config = ConsoleConfig::for_api_url(DEFAULT_API_URL).unwrap();
        assert_eq!(config.currency, CurrencyCode::AED);
        assert!(config.http_timeout.is_none());
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("ops@example.com", "super_secret_password");
        let debug_output = format!("{credentials:?}");

        assert!(debug_output.contains("ops@example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_password"));
    }
}
