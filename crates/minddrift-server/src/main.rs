use clap::Parser;

mod cli;

use cli::args::Cli;
use cli::commands::dispatch;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before config is read from the environment.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    minddrift_server::telemetry::init(cli.log_json);
    dispatch(cli).await
}
