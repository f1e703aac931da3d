use anyhow::Context;
use minddrift_core::{AnswerCache, GameConfig, GameService};
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::args::{CacheArgs, CacheCommand, Cli, Command, ServeArgs};

pub async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    // Flags, or the MINDDRIFT_* variables backing them, layer over defaults.
    let config = GameConfig::default();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args, config).await,
        Command::Cache(args) => cmd_cache(args, config),
    }
}

async fn cmd_serve(args: ServeArgs, config: GameConfig) -> anyhow::Result<()> {
    let config = args.apply(config);
    let game = GameService::from_config(&config).context("failed to start game service")?;
    info!(
        provider = ?config.model.provider,
        model = %config.model.model,
        db = %config.db_path.display(),
        "game service ready"
    );

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    minddrift_server::serve(listener, game, shutdown_signal()).await
}

fn cmd_cache(args: CacheArgs, config: GameConfig) -> anyhow::Result<()> {
    let db = args.db.unwrap_or(config.db_path);
    if !db.exists() {
        anyhow::bail!("cache database not found: {}", db.display());
    }
    let cache = AnswerCache::open(&db)?;

    match args.cmd {
        CacheCommand::Lookup { answers } => match cache.lookup(&answers)? {
            Some(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
            None => println!("no confirmed guess for these {} answers", answers.len()),
        },
        CacheCommand::Count => println!("{}", cache.count()?),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
