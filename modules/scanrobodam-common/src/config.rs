use std::env;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 150;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required env vars: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("{key} must be a number, got '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Service configuration loaded once from the environment at startup.
///
/// Immutable after construction; handlers receive it through shared state.
#[derive(Clone)]
pub struct Config {
    // Assistant service
    pub openai_api_key: String,
    pub assistant_id: String,
    pub openai_base_url: Option<String>,

    // Bearer secret callers must present
    pub api_secret: String,

    // Web server
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables (and a local `.env`).
    /// Fails if any of `OPENAI_API_KEY`, `ASSISTANT_ID` or `VALID_API_KEY`
    /// is absent or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let required = ["OPENAI_API_KEY", "ASSISTANT_ID", "VALID_API_KEY"];
        let missing: Vec<&'static str> = required
            .into_iter()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let port = match get("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };
        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                value,
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY").unwrap_or_default(),
            assistant_id: get("ASSISTANT_ID").unwrap_or_default(),
            openai_base_url: get("OPENAI_BASE_URL"),
            api_secret: get("VALID_API_KEY").unwrap_or_default(),
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let n = ai_client::util::truncate_to_char_boundary(val, 5);
            format!("{}...({} chars)", n, val.len())
        }

        tracing::info!("Config loaded:");
        tracing::info!("  OPENAI_API_KEY: {}", preview(&self.openai_api_key));
        tracing::info!("  ASSISTANT_ID: {}", self.assistant_id);
        tracing::info!("  VALID_API_KEY: {}", preview(&self.api_secret));
        tracing::info!(
            "  OPENAI_BASE_URL: {}",
            self.openai_base_url.as_deref().unwrap_or("<default>")
        );
    }
}
