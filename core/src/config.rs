//! Controller configuration.
//!
//! The only setting is the Todo Store base URL, read from `TODOS_URL`. The
//! startup delay is fixed.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const TODOS_URL_VAR: &str = "TODOS_URL";

/// Wait before the first list fetch after `initialize`.
pub const INITIAL_FETCH_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub base_url: String,
}

impl SyncConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        validate_url(TODOS_URL_VAR, &base_url)?;
        Ok(Self { base_url })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(TODOS_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(TODOS_URL_VAR))?;
        Self::new(base_url)
    }
}

/// Accept only absolute http(s) URLs with a host.
fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let valid = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        })
    }
}
