//! Service configuration from the environment.

use dealwatch_core::DEFAULT_KEYWORDS;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Everything the service needs at startup. Credentials and the storage
/// path are required; the rest has defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Woot affiliate API key.
    pub woot_api_key: String,
    /// Feed category to watch.
    pub feed_category: String,
    /// Keywords a deal must match to be notified.
    pub keywords: Vec<String>,
    /// SMTP relay hostname.
    pub smtp_host: String,
    /// SMTP relay port.
    pub smtp_port: u16,
    /// SMTP login username.
    pub smtp_username: String,
    /// SMTP login password.
    pub smtp_password: String,
    /// Sender address; defaults to the SMTP username.
    pub email_from: String,
    /// Notification recipient address.
    pub email_recipient: String,
    /// Path of the seen-deals blob.
    pub seen_path: PathBuf,
}

impl Config {
    const DEFAULT_CATEGORY: &'static str = "Electronics";
    const DEFAULT_SMTP_HOST: &'static str = "smtp.gmail.com";
    const DEFAULT_SMTP_PORT: u16 = 465;

    /// Load from process environment variables, failing fast on any
    /// missing required value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::MissingVar(name));

        let smtp_username = required("SMTP_USERNAME")?;
        let smtp_port = match lookup("SMTP_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: "SMTP_PORT",
                value: raw,
            })?,
            None => Self::DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            woot_api_key: required("WOOT_API_KEY")?,
            feed_category: lookup("FEED_CATEGORY")
                .unwrap_or_else(|| Self::DEFAULT_CATEGORY.to_string()),
            keywords: match lookup("DEAL_KEYWORDS") {
                Some(raw) => parse_keywords(&raw),
                None => DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            },
            smtp_host: lookup("SMTP_HOST").unwrap_or_else(|| Self::DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
            smtp_password: required("SMTP_PASSWORD")?,
            email_from: lookup("EMAIL_FROM").unwrap_or_else(|| smtp_username.clone()),
            email_recipient: required("EMAIL_RECIPIENT")?,
            seen_path: required("SEEN_DEALS_PATH")?.into(),
            smtp_username,
        })
    }
}

/// Split a comma-separated keyword list, dropping blanks.
fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}
