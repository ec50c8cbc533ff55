use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use reqwest::Url;

/// Shared secret sent to the upstream API. `Debug` never prints the value.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([redacted])")
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub upstream_url: Url,
    pub shared_secret: Secret,
    /// Fixed tenant shortcode. When set, it replaces the inbound tenant header.
    pub tenant_override: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Public assets served as-is.
    pub static_dir: PathBuf,
    /// Handlebars page sources. Kept apart from `static_dir` so they are never served raw.
    pub template_dir: PathBuf,
    pub upstream_timeout: Duration,
    /// Status used for the error page when an upstream call fails on a page load.
    pub error_status: StatusCode,
    pub template_dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let raw_url = require("IO_TAZZY_URL")?;
        let upstream_url = Url::parse(&raw_url)
            .with_context(|| format!("IO_TAZZY_URL must be a valid URL, got '{raw_url}'"))?;
        if upstream_url.cannot_be_a_base() {
            anyhow::bail!("IO_TAZZY_URL must be a base URL, got '{raw_url}'");
        }

        let error_status = optional("UPSTREAM_ERROR_STATUS", "404")
            .parse::<u16>()
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .context("UPSTREAM_ERROR_STATUS must be a valid HTTP status code")?;

        Ok(Config {
            upstream_url,
            shared_secret: Secret::new(require("IO_TAZZY_SECRET")?),
            tenant_override: lookup("IO_TAZZY_TENANT").filter(|t| !t.is_empty()),
            port: optional("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG", "info"),
            static_dir: PathBuf::from(optional("STATIC_DIR", "static")),
            template_dir: PathBuf::from(optional("TEMPLATE_DIR", "templates")),
            upstream_timeout: Duration::from_secs(
                optional("UPSTREAM_TIMEOUT_SECS", "10")
                    .parse::<u64>()
                    .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            error_status,
            template_dev_mode: optional("TEMPLATE_DEV_MODE", "false")
                .parse::<bool>()
                .context("TEMPLATE_DEV_MODE must be 'true' or 'false'")?,
        })
    }
}
