//! Gateway configuration
//!
//! Credentials are collected once, usually from the environment at startup, and
//! resolved into the pair of keys the client sends on every request. Nothing in
//! the client reads the environment after construction.

use crate::{PixError, Result};
use std::env;
use std::fmt;
use std::time::Duration;

/// Environment variable holding the gateway base URL (e.g. `https://host/api`)
pub const BASE_URL_ENV: &str = "PIX_GATEWAY_BASE_URL";
/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_SECS_ENV: &str = "PIX_GATEWAY_TIMEOUT_SECS";

/// Environment variables consulted for the API key, in precedence order
pub const SECRET_KEY_ENV: &str = "PIX_SECRET_KEY";
pub const API_SECRET_KEY_ENV: &str = "PIX_API_SECRET_KEY";
pub const PUBLIC_SECRET_KEY_ENV: &str = "NEXT_PUBLIC_PIX_SECRET_KEY";
pub const PUBLIC_API_SECRET_KEY_ENV: &str = "NEXT_PUBLIC_PIX_API_SECRET_KEY";

/// Environment variables consulted for the public key, in precedence order
pub const PUBLIC_KEY_ENV: &str = "PIX_PUBLIC_KEY";
pub const PUBLIC_PUBLIC_KEY_ENV: &str = "NEXT_PUBLIC_PIX_PUBLIC_KEY";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Every recognized credential slot, before precedence is applied
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSources {
    /// Primary secret key
    pub secret_key: Option<String>,
    /// Alternate name for the secret key
    pub api_secret_key: Option<String>,
    /// Publicly exposed alias of `secret_key`
    pub public_secret_key: Option<String>,
    /// Publicly exposed alias of `api_secret_key`
    pub public_api_secret_key: Option<String>,
    /// Primary public key
    pub public_key: Option<String>,
    /// Publicly exposed alias of `public_key`
    pub public_public_key: Option<String>,
}

impl CredentialSources {
    /// Read every slot from the process environment
    pub fn from_env() -> Self {
        Self {
            secret_key: env::var(SECRET_KEY_ENV).ok(),
            api_secret_key: env::var(API_SECRET_KEY_ENV).ok(),
            public_secret_key: env::var(PUBLIC_SECRET_KEY_ENV).ok(),
            public_api_secret_key: env::var(PUBLIC_API_SECRET_KEY_ENV).ok(),
            public_key: env::var(PUBLIC_KEY_ENV).ok(),
            public_public_key: env::var(PUBLIC_PUBLIC_KEY_ENV).ok(),
        }
    }

    /// Apply slot precedence.
    ///
    /// Never fails: when no slot is populated both keys are empty strings and the
    /// gateway reports the problem as an authorization failure.
    pub fn resolve(&self) -> Credentials {
        let api_key = first_non_empty([
            &self.secret_key,
            &self.api_secret_key,
            &self.public_secret_key,
            &self.public_api_secret_key,
        ])
        .unwrap_or_default();

        let public_key = first_non_empty([&self.public_key, &self.public_public_key])
            .unwrap_or_else(|| api_key.clone());

        Credentials {
            api_key,
            public_key,
        }
    }
}

impl fmt::Debug for CredentialSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = |value: &Option<String>| if value.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("CredentialSources")
            .field("secret_key", &slot(&self.secret_key))
            .field("api_secret_key", &slot(&self.api_secret_key))
            .field("public_secret_key", &slot(&self.public_secret_key))
            .field("public_api_secret_key", &slot(&self.public_api_secret_key))
            .field("public_key", &slot(&self.public_key))
            .field("public_public_key", &slot(&self.public_public_key))
            .finish()
    }
}

fn first_non_empty<const N: usize>(slots: [&Option<String>; N]) -> Option<String> {
    slots
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .cloned()
}

/// Resolved keys sent with every request
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Secret API key, also sent as `x-secret-key` and as the bearer token
    pub api_key: String,
    /// Public key, equal to `api_key` when none was configured
    pub public_key: String,
}

impl Credentials {
    /// Create credentials from explicit keys
    pub fn new(api_key: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            public_key: public_key.into(),
        }
    }

    /// Whether no API key was found
    pub fn is_empty(&self) -> bool {
        self.api_key.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &redact(&self.api_key))
            .field("public_key", &redact(&self.public_key))
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

/// Gateway client configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway API, including the `/api` prefix
    pub base_url: String,
    /// Keys sent on every request
    pub credentials: Credentials,
    /// Request timeout, `None` leaves the transport default in place
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    /// Create a new config with empty credentials and the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: Credentials::default(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Build a config from `PIX_GATEWAY_BASE_URL`, `PIX_GATEWAY_TIMEOUT_SECS` and
    /// the credential variables
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(BASE_URL_ENV)
            .map_err(|_| PixError::config(format!("{} must be set", BASE_URL_ENV)))?;

        let mut config =
            Self::new(base_url).with_credentials(CredentialSources::from_env().resolve());

        if let Ok(raw) = env::var(TIMEOUT_SECS_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                PixError::config(format!("{} must be a whole number of seconds", TIMEOUT_SECS_ENV))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(PixError::config("Gateway base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(PixError::config(
                "Gateway base URL must start with http:// or https://",
            ));
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| PixError::config(format!("Invalid gateway base URL: {}", e)))?;

        Ok(())
    }

    /// Set the credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable the request timeout
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }
}
