use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub redis_url: String,
    /// API key for the hosted multimodal inference service.
    pub openai_api_key: String,
    /// Admitted transcription requests per identity per window.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: i64,
    /// Quota window in milliseconds.
    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window: u64,
    /// Admit requests when the quota store is unreachable. Default is to deny,
    /// bounding cost exposure from the paid inference calls.
    #[serde(default)]
    pub rate_limit_fail_open: bool,
    /// Remote session verification endpoint. When unset, callers are
    /// identified by forwarded address only.
    #[serde(default)]
    pub auth_verify_url: Option<String>,
    /// Set to "production" for JSON logging, anything else for human-readable.
    #[serde(default)]
    pub env: String,
    /// Sentry DSN for error tracking.
    #[serde(default)]
    pub sentry_dsn: Option<String>,
}

fn default_rate_limit() -> i64 {
    25
}

fn default_rate_limit_window() -> u64 {
    86_400_000
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }

    /// Quota window as a duration.
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.rate_limit_window)
    }
}
