//! Runtime configuration.
//!
//! Built once at process start (usually via [`GameConfig::from_env`] and then
//! overridden by CLI flags) and passed down explicitly. Nothing below this
//! module reads the environment.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{GameError, GameResult};

/// Which model provider backs the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Generative Language API.
    #[default]
    Gemini,
    /// Deterministic offline provider (dev/tests).
    Fake,
}

impl ProviderKind {
    pub fn parse(raw: &str) -> GameResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "fake" => Ok(Self::Fake),
            other => Err(GameError::config(format!(
                "unknown provider '{}' (expected 'gemini' or 'fake')",
                other
            ))),
        }
    }
}

/// Model provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    /// API key. Required for [`ProviderKind::Gemini`].
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Provider base URL (overridable for tests and proxies).
    #[serde(default = "default_model_url")]
    pub base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Per-invocation timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_model_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout() -> u64 {
    60
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key: None,
            model: default_model(),
            base_url: default_model_url(),
            temperature: default_temperature(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub model: ModelConfig,

    /// SQLite database holding confirmed guesses.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Directory generated documents are written to.
    #[serde(default = "default_pages_dir")]
    pub pages_dir: PathBuf,

    /// Base URL the server is reachable at; page links are built from it.
    #[serde(default = "default_public_url")]
    pub public_url: String,

    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("minddrift.db")
}

fn default_pages_dir() -> PathBuf {
    PathBuf::from("generated_pages")
}

fn default_public_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            db_path: default_db_path(),
            pages_dir: default_pages_dir(),
            public_url: default_public_url(),
            bind: default_bind(),
        }
    }
}

impl GameConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `MINDDRIFT_PROVIDER` | `gemini` or `fake` |
    /// | `GEMINI_API_KEY` | Gemini API key |
    /// | `MINDDRIFT_MODEL` | Model id |
    /// | `MINDDRIFT_MODEL_URL` | Provider base URL |
    /// | `MINDDRIFT_TEMPERATURE` | Sampling temperature |
    /// | `MINDDRIFT_TIMEOUT_SECS` | Per-call timeout |
    /// | `MINDDRIFT_DB` | SQLite path |
    /// | `MINDDRIFT_PAGES_DIR` | Generated pages directory |
    /// | `MINDDRIFT_PUBLIC_URL` | Public base URL |
    /// | `MINDDRIFT_BIND` | Listen address |
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let model = ModelConfig {
            provider: std::env::var("MINDDRIFT_PROVIDER")
                .ok()
                .and_then(|v| ProviderKind::parse(&v).ok())
                .unwrap_or_default(),
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            model: std::env::var("MINDDRIFT_MODEL").unwrap_or_else(|_| default_model()),
            base_url: std::env::var("MINDDRIFT_MODEL_URL").unwrap_or_else(|_| default_model_url()),
            temperature: std::env::var("MINDDRIFT_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_temperature),
            timeout_secs: std::env::var("MINDDRIFT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        };

        Self {
            model,
            db_path: std::env::var("MINDDRIFT_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_db_path()),
            pages_dir: std::env::var("MINDDRIFT_PAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_pages_dir()),
            public_url: std::env::var("MINDDRIFT_PUBLIC_URL")
                .unwrap_or_else(|_| default_public_url()),
            bind: std::env::var("MINDDRIFT_BIND").unwrap_or_else(|_| default_bind()),
        }
    }

    /// Reject configurations that cannot serve a game.
    pub fn validate(&self) -> GameResult<()> {
        if self.model.provider == ProviderKind::Gemini && self.model.api_key.is_none() {
            return Err(GameError::config(
                "GEMINI_API_KEY is not set (use --provider fake for offline play)",
            ));
        }
        if self.model.timeout_secs == 0 {
            return Err(GameError::config("model timeout must be at least 1 second"));
        }
        if self.public_url.trim().is_empty() {
            return Err(GameError::config("public url must not be empty"));
        }
        Ok(())
    }

    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    pub fn with_pages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pages_dir = dir.into();
        self
    }

    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = url.into();
        self
    }
}
