use std::path::PathBuf;

use clap::{Parser, Subcommand};
use minddrift_core::{GameConfig, ProviderKind};

#[derive(Parser, Debug)]
#[command(
    name = "minddrift",
    version,
    about = "MindDrift guessing-game backend: fixed questions, model guesses, cached confirmations"
)]
pub struct Cli {
    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Inspect the durable answer cache
    Cache(CacheArgs),
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderArg {
    /// Google Gemini (needs GEMINI_API_KEY)
    Gemini,
    /// Deterministic offline replies (dev/tests)
    Fake,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Gemini => ProviderKind::Gemini,
            ProviderArg::Fake => ProviderKind::Fake,
        }
    }
}

/// Flags (or their environment variables) override the config defaults.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen address, e.g. 127.0.0.1:8000
    #[arg(long, env = "MINDDRIFT_BIND")]
    pub bind: Option<String>,

    /// Model provider
    #[arg(long, value_enum, env = "MINDDRIFT_PROVIDER")]
    pub provider: Option<ProviderArg>,

    /// Model identifier
    /// Example: gemini-2.5-flash
    #[arg(long, env = "MINDDRIFT_MODEL")]
    pub model: Option<String>,

    /// Provider base URL (proxies, local mocks)
    #[arg(long, env = "MINDDRIFT_MODEL_URL")]
    pub model_url: Option<String>,

    /// Sampling temperature
    #[arg(long, env = "MINDDRIFT_TEMPERATURE")]
    pub temperature: Option<f32>,

    /// Per model call timeout in seconds
    #[arg(long, env = "MINDDRIFT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// SQLite database holding confirmed guesses
    #[arg(long, env = "MINDDRIFT_DB")]
    pub db: Option<PathBuf>,

    /// Directory generated pages are written to and served from
    #[arg(long, env = "MINDDRIFT_PAGES_DIR")]
    pub pages_dir: Option<PathBuf>,

    /// Base URL clients reach this server at (used in page links)
    #[arg(long, env = "MINDDRIFT_PUBLIC_URL")]
    pub public_url: Option<String>,

    /// Gemini API key (prefer the environment variable)
    #[arg(long, hide = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl ServeArgs {
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(provider) = self.provider {
            config.model.provider = provider.into();
        }
        if let Some(model) = &self.model {
            config.model.model = model.clone();
        }
        if let Some(url) = &self.model_url {
            config.model.base_url = url.clone();
        }
        if let Some(temperature) = self.temperature {
            config.model.temperature = temperature;
        }
        if let Some(secs) = self.timeout_secs {
            config.model.timeout_secs = secs;
        }
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(dir) = &self.pages_dir {
            config.pages_dir = dir.clone();
        }
        if let Some(url) = &self.public_url {
            config.public_url = url.clone();
        }
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            config.model.api_key = Some(key.to_string());
        }
        config
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct CacheArgs {
    /// SQLite database (default: minddrift.db)
    #[arg(long, global = true, env = "MINDDRIFT_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: CacheCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheCommand {
    /// Show the confirmed guess for an exact answer sequence
    Lookup {
        /// One answer, in order; repeat for each answer
        #[arg(long = "answer", required = true)]
        answers: Vec<String>,
    },
    /// Number of confirmed answer sequences
    Count,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_flags_override_config() {
        let cli = Cli::try_parse_from([
            "minddrift",
            "serve",
            "--provider",
            "fake",
            "--bind",
            "127.0.0.1:9001",
            "--timeout-secs",
            "5",
            "--public-url",
            "http://game.local",
        ])
        .unwrap();
        let Command::Serve(args) = cli.cmd else {
            panic!("expected serve");
        };

        let config = args.apply(GameConfig::default());
        assert_eq!(config.model.provider, ProviderKind::Fake);
        assert_eq!(config.bind, "127.0.0.1:9001");
        assert_eq!(config.model.timeout_secs, 5);
        assert_eq!(config.public_url, "http://game.local");
        assert_eq!(config.db_path, PathBuf::from("minddrift.db"));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(Cli::try_parse_from(["minddrift", "serve", "--provider", "openai"]).is_err());
    }

    #[test]
    fn environment_backs_serve_flags() {
        std::env::set_var("MINDDRIFT_PAGES_DIR", "/srv/minddrift/pages");
        let cli = Cli::try_parse_from(["minddrift", "serve"]).unwrap();
        std::env::remove_var("MINDDRIFT_PAGES_DIR");

        let Command::Serve(args) = cli.cmd else {
            panic!("expected serve");
        };
        assert_eq!(args.pages_dir, Some(PathBuf::from("/srv/minddrift/pages")));
        let config = args.apply(GameConfig::default());
        assert_eq!(config.pages_dir, PathBuf::from("/srv/minddrift/pages"));
    }

    #[test]
    fn api_key_flag_fills_model_config() {
        let args = ServeArgs {
            api_key: Some("k-123".into()),
            provider: Some(ProviderArg::Gemini),
            ..Default::default()
        };
        let config = args.apply(GameConfig::default());
        assert_eq!(config.model.api_key.as_deref(), Some("k-123"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn cache_lookup_collects_answers_in_order() {
        let cli = Cli::try_parse_from([
            "minddrift",
            "--log-json",
            "cache",
            "lookup",
            "--answer",
            "Is it alive?: No",
            "--answer",
            "Is it metal?: Yes",
            "--db",
            "game.db",
        ])
        .unwrap();
        assert!(cli.log_json);
        let Command::Cache(args) = cli.cmd else {
            panic!("expected cache");
        };
        assert_eq!(args.db, Some(PathBuf::from("game.db")));
        match args.cmd {
            CacheCommand::Lookup { answers } => {
                assert_eq!(answers, vec!["Is it alive?: No", "Is it metal?: Yes"]);
            }
            CacheCommand::Count => panic!("expected lookup"),
        }
    }

    #[test]
    fn lookup_requires_an_answer() {
        assert!(Cli::try_parse_from(["minddrift", "cache", "lookup"]).is_err());
    }
}
