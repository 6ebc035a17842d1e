//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod lecturers;
mod outputs;
mod scrape;

pub use lecturers::LecturerCommands;
pub use outputs::OutputCommands;
pub use scrape::ScrapeCommands;

use anyhow::Result;
use clap::Subcommand;
use sinta_monitor::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Lecturer list management
    Lecturers {
        #[command(subcommand)]
        command: LecturerCommands,
    },
    /// Scraping job control
    Scrape {
        #[command(subcommand)]
        command: ScrapeCommands,
    },
    /// Browse the output of finished runs (lists directories by default)
    Outputs {
        #[command(subcommand)]
        command: Option<OutputCommands>,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The monitor configuration
/// * `plain` - Report progress through the log instead of the terminal sink
pub async fn handle_command(command: Commands, config: &Config, plain: bool) -> Result<()> {
    match command {
        Commands::Lecturers { command } => {
            lecturers::handle_lecturer_command(command, config).await
        }
        Commands::Scrape { command } => scrape::handle_scrape_command(command, config, plain).await,
        Commands::Outputs { command } => outputs::handle_outputs_command(command, config).await,
    }
}
