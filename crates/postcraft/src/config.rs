//! Generation service configuration.
//!
//! [`GeminiConfig`] holds the endpoint, model, key, and timeout used by
//! [`GeminiClient`](crate::GeminiClient). The key comes from the host
//! environment and is never hardcoded.

use std::time::Duration;

use tracing::warn;

use crate::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable overriding the endpoint base URL.
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
/// Environment variable overriding the model.
pub const MODEL_ENV: &str = "GEMINI_MODEL";

/// Settings for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Sent as the `X-goog-api-key` header. May be empty.
    pub api_key: String,
    /// Scheme and host, without a trailing slash. Default: the public Gemini API.
    pub base_url: String,
    /// Model identifier. Default: `"gemini-2.0-flash"`.
    pub model: String,
    /// Whole-request timeout. Default: 120 s.
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl GeminiConfig {
    /// Read the key and optional overrides from the environment.
    ///
    /// A missing key is not an error here: calls will fail with an auth
    /// error, which the session turns into the fallback message.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        if api_key.is_empty() {
            warn!("{API_KEY_ENV} is not set; generation requests will be rejected");
        }
        let mut config = Self {
            api_key,
            ..Default::default()
        };
        if let Ok(base_url) = std::env::var(BASE_URL_ENV)
            && !base_url.is_empty()
        {
            config = config.with_base_url(base_url);
        }
        if let Ok(model) = std::env::var(MODEL_ENV)
            && !model.is_empty()
        {
            config.model = model;
        }
        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the endpoint base. A trailing slash is stripped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}
