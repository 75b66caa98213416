//! Environment-driven configuration for the gateway binary.

pub mod helpers;

use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::ConfigError;
use helpers::{optional_env, parse_string_env, parse_u32_env, parse_u64_env, required_env};

pub const DEFAULT_DAILY_MESSAGE_LIMIT: u32 = 5;
pub const DEFAULT_QUOTA_CAPACITY: u32 = 10_000;
const DEFAULT_PROVIDER_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BIND: &str = "127.0.0.1:8090";

/// LLM provider connection settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of an OpenAI-compatible API (no trailing `/chat/completions`).
    pub base_url: Url,
    pub api_key: SecretString,
    pub model: String,
    /// Bound on the single network call the pipeline makes.
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = parse_string_env("PANTRYCHEF_PROVIDER_URL", DEFAULT_PROVIDER_URL);
        let base_url = Url::parse(&raw_url).map_err(|e| ConfigError::InvalidValue {
            key: "PANTRYCHEF_PROVIDER_URL".to_string(),
            message: e.to_string(),
        })?;

        let timeout_secs = parse_u64_env(
            "PANTRYCHEF_PROVIDER_TIMEOUT_SECS",
            DEFAULT_PROVIDER_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PANTRYCHEF_PROVIDER_TIMEOUT_SECS".to_string(),
                message: "timeout must be at least 1 second".to_string(),
            });
        }

        Ok(Self {
            base_url,
            api_key: SecretString::from(required_env("PANTRYCHEF_API_KEY")?),
            model: parse_string_env("PANTRYCHEF_MODEL", DEFAULT_MODEL),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Chat pipeline policy settings.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Daily message ceiling per user identity.
    pub daily_message_limit: u32,
    /// Capacity of the bounded quota map (number of live (user, day) keys).
    pub quota_capacity: u32,
}

impl ChatConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let daily_message_limit =
            parse_u32_env("PANTRYCHEF_DAILY_LIMIT", DEFAULT_DAILY_MESSAGE_LIMIT)?;
        if daily_message_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PANTRYCHEF_DAILY_LIMIT".to_string(),
                message: "daily limit must be at least 1".to_string(),
            });
        }

        let quota_capacity = parse_u32_env("PANTRYCHEF_QUOTA_CAPACITY", DEFAULT_QUOTA_CAPACITY)?;
        if quota_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PANTRYCHEF_QUOTA_CAPACITY".to_string(),
                message: "quota capacity must be at least 1".to_string(),
            });
        }

        Ok(Self {
            daily_message_limit,
            quota_capacity,
        })
    }
}

/// Top-level gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind: SocketAddr,
    /// Session token for the single local user; `None` disables sessions
    /// (all requests run as quota-only guests and cannot dispatch actions).
    pub auth_token: Option<SecretString>,
    /// User identity bound to `auth_token` when sessions are enabled.
    pub user_id: String,
    pub provider: ProviderConfig,
    pub chat: ChatConfig,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_bind = parse_string_env("PANTRYCHEF_BIND", DEFAULT_BIND);
        let bind = raw_bind.parse().map_err(|_| ConfigError::InvalidValue {
            key: "PANTRYCHEF_BIND".to_string(),
            message: format!("expected host:port, got '{raw_bind}'"),
        })?;

        Ok(Self {
            bind,
            auth_token: optional_env("PANTRYCHEF_AUTH_TOKEN").map(SecretString::from),
            user_id: parse_string_env("PANTRYCHEF_USER", "local-user"),
            provider: ProviderConfig::from_env()?,
            chat: ChatConfig::from_env()?,
        })
    }
}
