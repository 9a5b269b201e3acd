use std::time::Duration;

use crate::constants::{DEFAULT_TIMEOUT_SECS, GATEWAY_PRODUCTION, GATEWAY_TEST, LOGIN_PATH};
use crate::credential::Credential;
use crate::error::B2BinPayError;

/// Gateway location, API credentials and transport timeout.
#[derive(Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub auth_key: String,
    pub auth_secret: String,
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(
        base_url: impl Into<String>,
        auth_key: impl Into<String>,
        auth_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            auth_key: auth_key.into(),
            auth_secret: auth_secret.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read configuration from `B2BINPAY_*` environment variables.
    ///
    /// `B2BINPAY_AUTH_KEY` and `B2BINPAY_AUTH_SECRET` are required.
    /// `B2BINPAY_BASE_URL` wins over `B2BINPAY_TEST_MODE`.
    pub fn from_env() -> Result<Self, B2BinPayError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, B2BinPayError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| B2BinPayError::Config(format!("{name} is required")))
        };
        let auth_key = required("B2BINPAY_AUTH_KEY")?;
        let auth_secret = required("B2BINPAY_AUTH_SECRET")?;

        let test_mode = lookup("B2BINPAY_TEST_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let base_url = lookup("B2BINPAY_BASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| {
                if test_mode {
                    GATEWAY_TEST.to_string()
                } else {
                    GATEWAY_PRODUCTION.to_string()
                }
            });

        let timeout_secs = match lookup("B2BINPAY_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                B2BinPayError::Config(format!("invalid B2BINPAY_TIMEOUT_SECS {raw:?}: {e}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            auth_key,
            auth_secret,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Join the base URL and an API path with exactly one `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn login_url(&self) -> String {
        self.endpoint(LOGIN_PATH)
    }

    pub fn credential(&self) -> Credential {
        Credential::basic_from_key(&self.auth_key, &self.auth_secret)
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("auth_key", &self.auth_key)
            .field("auth_secret", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}
