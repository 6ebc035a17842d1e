//! Sinta CLI
//!
//! Command-line front end for the SINTA scraper web app: manage the lecturer
//! list, start scraping runs and follow their progress.

mod commands;
mod terminal;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use sinta_monitor::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sinta")]
#[command(about = "SINTA scraper CLI", long_about = None)]
struct Cli {
    /// Scraper web app URL
    #[arg(long, env = "SINTA_WEB_URL", default_value = "http://localhost:5000")]
    url: String,

    /// Report progress as log lines instead of colored terminal output
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.plain);

    let config = Config::from_env()?.with_base_url(cli.url);
    config.validate()?;

    handle_command(cli.command, &config, cli.plain).await
}

fn init_tracing(plain: bool) {
    // Terminal output already shows progress; keep the monitor quiet unless asked
    let default_filter = if plain {
        "sinta_cli=info,sinta_monitor=info"
    } else {
        "sinta_cli=info,sinta_monitor=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
