use std::net::IpAddr;
use std::time::Duration;

use crate::error::RelayError;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub log_level: String,
    pub notion: NotionConfig,
}

#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub token: Option<String>,
    pub database_id: Option<String>,
    pub api_base: String,
    pub version: String,
    pub timeout: Duration,
}

/// Credentials needed for a single page-creation call.
#[derive(Debug, Clone)]
pub struct NotionCredentials {
    pub token: String,
    pub database_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("REWARDLOG_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid REWARDLOG_HOST: {e}"))?;

        let port: u16 = env_or("REWARDLOG_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid REWARDLOG_PORT: {e}"))?;

        let max_body_size: usize = env_or("REWARDLOG_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid REWARDLOG_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("REWARDLOG_LOG_LEVEL", "info");

        let timeout_secs: u64 = env_or("NOTION_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid NOTION_TIMEOUT_SECS: {e}"))?;

        // Credentials stay optional here: a missing one is reported per request.
        let notion = NotionConfig {
            token: env_optional("NOTION_TOKEN"),
            database_id: env_optional("NOTION_DATABASE_ID"),
            api_base: env_or("NOTION_API_BASE", NotionConfig::DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            version: env_or("NOTION_VERSION", NotionConfig::DEFAULT_VERSION),
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Config {
            host,
            port,
            max_body_size,
            log_level,
            notion,
        })
    }
}

impl NotionConfig {
    pub const DEFAULT_API_BASE: &'static str = "https://api.notion.com";
    pub const DEFAULT_VERSION: &'static str = "2022-06-28";

    /// Settings pointing at the public API with the given credentials.
    pub fn new(token: Option<String>, database_id: Option<String>) -> Self {
        Self {
            token,
            database_id,
            api_base: Self::DEFAULT_API_BASE.to_string(),
            version: Self::DEFAULT_VERSION.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Both credentials, or `NotConfigured` if either is absent or blank.
    pub fn credentials(&self) -> Result<NotionCredentials, RelayError> {
        match (non_blank(&self.token), non_blank(&self.database_id)) {
            (Some(token), Some(database_id)) => Ok(NotionCredentials {
                token: token.to_string(),
                database_id: database_id.to_string(),
            }),
            _ => Err(RelayError::NotConfigured),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
