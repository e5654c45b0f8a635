use std::env;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_COMPLETION_URL: &str = "https://api.perplexity.ai/chat/completions";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub api_key: Option<String>,
    pub completion: CompletionConfig,
    pub request_timeout_secs: u64,
    pub task_store_capacity: usize,
    pub otel_enabled: bool,
    pub otel_service_name: String,
    pub otel_exporter_endpoint: String,
}

/// Settings for the outbound chat-completion calls.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl CompletionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_COMPLETION_URL.to_string(),
            model: "sonar".to_string(),
            temperature: 0.2,
            max_tokens: 2000,
            timeout_secs: 300,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            port: var("PORT", "8000")
                .parse()
                .context("PORT must be a number")?,
            environment: var("ENVIRONMENT", "development"),
            api_key: lookup("PERPLEXITY_API_KEY").filter(|key| !key.trim().is_empty()),
            completion: CompletionConfig {
                url: var("COMPLETION_API_URL", DEFAULT_COMPLETION_URL),
                model: var("COMPLETION_MODEL", "sonar"),
                temperature: var("COMPLETION_TEMPERATURE", "0.2")
                    .parse()
                    .context("COMPLETION_TEMPERATURE must be a number")?,
                max_tokens: var("COMPLETION_MAX_TOKENS", "2000")
                    .parse()
                    .context("COMPLETION_MAX_TOKENS must be a number")?,
                timeout_secs: var("COMPLETION_TIMEOUT_SECS", "300")
                    .parse()
                    .context("COMPLETION_TIMEOUT_SECS must be a number")?,
            },
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS", "660")
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a number")?,
            task_store_capacity: var("TASK_STORE_CAPACITY", "100")
                .parse()
                .context("TASK_STORE_CAPACITY must be a number")?,
            otel_enabled: var("OTEL_ENABLED", "true")
                .parse()
                .context("OTEL_ENABLED must be true or false")?,
            otel_service_name: var("OTEL_SERVICE_NAME", "fund-analysis-service"),
            otel_exporter_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
