//! Scrape command handlers
//!
//! Starts scraping runs and follows their progress through the job
//! controller until the backend reports a terminal status.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::Subcommand;
use colored::*;
use sinta_client::ScraperClient;
use sinta_core::domain::category::Category;
use sinta_core::domain::job::{JobStatus, Outcome};
use sinta_monitor::{Config, JobController, PresentationSink, TracingSink};
use tracing::info;

use super::lecturers::read_lecturer_file;
use crate::terminal::{TerminalSink, progress_bar};

/// Scrape subcommands
#[derive(Subcommand)]
pub enum ScrapeCommands {
    /// Save the lecturer list and start a scraping run
    Start {
        /// File with one SINTA lecturer ID per line
        #[arg(short, long)]
        file: PathBuf,

        /// Category to scrape (repeatable, default: all)
        #[arg(short, long = "category")]
        categories: Vec<Category>,

        /// Return as soon as the backend accepted the run
        #[arg(short, long)]
        detach: bool,

        /// Poll at the slower background cadence
        #[arg(long)]
        background: bool,
    },
    /// Show the current job status once
    Status {
        /// Print the raw status as JSON
        #[arg(long)]
        json: bool,
    },
    /// Follow a job that is already running
    Watch {
        /// Poll at the slower background cadence
        #[arg(long)]
        background: bool,
    },
}

/// Handle scrape commands
///
/// # Arguments
/// * `command` - The scrape command to execute
/// * `config` - The monitor configuration
/// * `plain` - Report progress through the log instead of the terminal
pub async fn handle_scrape_command(
    command: ScrapeCommands,
    config: &Config,
    plain: bool,
) -> Result<()> {
    let client = Arc::new(ScraperClient::with_timeout(
        &config.base_url,
        config.request_timeout,
    )?);

    match command {
        ScrapeCommands::Start {
            file,
            categories,
            detach,
            background,
        } => {
            let controller = build_controller(&client, config, plain);
            controller.on_visibility_change(background);
            start(&controller, &file, &categories, detach).await
        }
        ScrapeCommands::Status { json } => show_status(&client, json).await,
        ScrapeCommands::Watch { background } => {
            let controller = build_controller(&client, config, plain);
            controller.on_visibility_change(background);
            watch(&controller).await
        }
    }
}

fn build_controller(client: &Arc<ScraperClient>, config: &Config, plain: bool) -> JobController {
    let sink: Arc<dyn PresentationSink> = if plain {
        Arc::new(TracingSink)
    } else {
        Arc::new(TerminalSink::new())
    };

    JobController::new(
        client.clone(),
        client.clone(),
        sink,
        config.cadence_settings(),
    )
}

async fn start(
    controller: &JobController,
    file: &Path,
    categories: &[Category],
    detach: bool,
) -> Result<()> {
    let lecturer_ids = read_lecturer_file(file)?;
    let categories: BTreeSet<String> = categories
        .iter()
        .map(|category| category.as_str().to_string())
        .collect();

    controller.submit(&lecturer_ids, &categories).await?;

    if detach {
        controller.detach();
        println!(
            "{}",
            "Run `sinta scrape watch` to follow its progress.".dimmed()
        );
        return Ok(());
    }

    await_outcome(controller).await
}

async fn watch(controller: &JobController) -> Result<()> {
    if !controller.resume_if_active().await? {
        println!("{}", "No scraping job is running.".yellow());
        return Ok(());
    }

    await_outcome(controller).await
}

/// Waits for the tracked job to finish or for Ctrl-C
///
/// Ctrl-C only stops monitoring; the backend keeps scraping.
async fn await_outcome(controller: &JobController) -> Result<()> {
    let mut outcomes = controller.outcomes();

    let outcome = tokio::select! {
        changed = outcomes.wait_for(Option::is_some) => {
            changed.ok().and_then(|outcome| (*outcome).clone())
        }
        _ = tokio::signal::ctrl_c() => {
            controller.stop();
            info!("Monitoring interrupted");
            println!();
            println!(
                "{}",
                "Stopped watching. The job keeps running on the server.".yellow()
            );
            return Ok(());
        }
    };

    match outcome {
        Some(Outcome::Completed) => {
            println!(
                "{}",
                "Run `sinta outputs` to list the generated files.".dimmed()
            );
            Ok(())
        }
        Some(Outcome::Failed { reason }) => Err(anyhow!("Scraping gagal: {}", reason)),
        None => Err(anyhow!("Job monitor closed before the job finished")),
    }
}

async fn show_status(client: &ScraperClient, json: bool) -> Result<()> {
    let status = client.get_scraping_status().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print_status(&status);
    }

    Ok(())
}

fn print_status(status: &JobStatus) {
    let state = if status.running {
        "Running".yellow().bold()
    } else {
        "Ready".green().bold()
    };

    println!("{}", "Scraping status".bold());
    println!("  State:    {}", state);
    println!(
        "  Progress: {} {}%",
        progress_bar(status.progress),
        status.progress
    );
    if let Some(message) = status.message.as_deref().filter(|m| !m.is_empty()) {
        println!("  Message:  {}", message);
    }
    if let Some(elapsed) = status.elapsed_time.as_deref() {
        println!("  Waktu:    {}", elapsed);
    }
    if let Some(dir) = status.output_dir.as_deref() {
        println!("  Output:   {}", dir.dimmed());
    }

    if status.running {
        return;
    }
    if let Some(result) = &status.result {
        let verdict = match Outcome::classify(status) {
            Outcome::Completed => "success".green(),
            // `results: {}` from a backend that has not run anything yet
            Outcome::Failed { .. } if result.error.is_none() && !result.success => {
                "none".dimmed()
            }
            Outcome::Failed { reason } => reason.red(),
        };
        println!("  Result:   {}", verdict);
    }
}
