//! Output command handlers
//!
//! Lists the dated output directories of finished runs and retrieves the CSV
//! files inside them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use sinta_client::ScraperClient;
use sinta_core::dto::output::CsvPreview;
use sinta_monitor::Config;

const CELL_WIDTH: usize = 24;

/// Output subcommands
#[derive(Subcommand)]
pub enum OutputCommands {
    /// List output directories
    List,
    /// Download a CSV file
    Download {
        /// Output directory name (e.g. output-06012025)
        dir: String,

        /// CSV file inside the directory
        file: String,

        /// Where to write the file (default: the file name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the contents and statistics of a CSV file
    Show {
        /// Output directory name (e.g. output-06012025)
        dir: String,

        /// CSV file inside the directory
        file: String,

        /// Maximum number of rows to print
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
}

/// Handle output commands
///
/// Without a subcommand the output directories are listed.
pub async fn handle_outputs_command(
    command: Option<OutputCommands>,
    config: &Config,
) -> Result<()> {
    let client = ScraperClient::with_timeout(&config.base_url, config.request_timeout)?;

    match command.unwrap_or(OutputCommands::List) {
        OutputCommands::List => list_outputs(&client).await,
        OutputCommands::Download { dir, file, output } => {
            download_file(&client, &dir, &file, output).await
        }
        OutputCommands::Show { dir, file, limit } => show_file(&client, &dir, &file, limit).await,
    }
}

async fn list_outputs(client: &ScraperClient) -> Result<()> {
    let outputs = client.list_outputs().await?;

    if outputs.is_empty() {
        println!("{}", "No output directories found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} output directory(ies):", outputs.len()).bold()
    );
    println!();

    for output in outputs {
        println!("  {} {}", "▸".cyan(), output.name.bold());
        println!("    Date:  {}", output.date);
        println!("    Path:  {}", output.path.dimmed());
        println!("    Files: {}", output.files_count);
        for file in &output.files {
            println!("      {}", file.dimmed());
        }
        println!();
    }

    println!(
        "{}",
        "Use `sinta outputs download <dir> <file>` to fetch a file.".dimmed()
    );

    Ok(())
}

async fn download_file(
    client: &ScraperClient,
    dir: &str,
    file: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let contents = client
        .download_file(dir, file)
        .await
        .with_context(|| format!("Failed to download {}/{}", dir, file))?;

    let target = output.unwrap_or_else(|| PathBuf::from(file));
    tokio::fs::write(&target, &contents)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;

    println!(
        "{} Saved {} ({} bytes)",
        "✓".green(),
        target.display().to_string().bold(),
        contents.len()
    );

    Ok(())
}

async fn show_file(client: &ScraperClient, dir: &str, file: &str, limit: usize) -> Result<()> {
    let preview = client
        .get_csv_data(dir, file)
        .await
        .with_context(|| format!("Failed to load {}/{}", dir, file))?;

    print_stats(&preview);
    println!();

    if preview.data.is_empty() {
        println!("{}", "File has no rows.".yellow());
        return Ok(());
    }

    let header: Vec<String> = preview.columns.iter().map(|c| cell(c)).collect();
    println!("{}", header.join(" │ ").bold());
    println!("{}", "─".repeat(header.len() * (CELL_WIDTH + 3)).dimmed());

    for row in preview.data.iter().take(limit) {
        let cells: Vec<String> = preview.row_cells(row).into_iter().map(cell).collect();
        println!("{}", cells.join(" │ "));
    }

    if preview.data.len() > limit {
        println!(
            "{}",
            format!("... {} more row(s)", preview.data.len() - limit).dimmed()
        );
    }

    Ok(())
}

fn print_stats(preview: &CsvPreview) {
    let stats = &preview.stats;

    println!("{}", preview.filename.bold());
    println!("  Rows:    {}", stats.total_rows);
    println!("  Columns: {}", stats.total_columns);
    println!("  Size:    {}", stats.file_size);
    for (name, value) in &stats.extra {
        println!("  {}: {}", name.replace('_', " "), value);
    }
}

/// Pads or truncates a cell to the table width
fn cell(value: &str) -> String {
    let count = value.chars().count();
    if count > CELL_WIDTH {
        let truncated: String = value.chars().take(CELL_WIDTH - 1).collect();
        format!("{}…", truncated)
    } else {
        format!("{}{}", value, " ".repeat(CELL_WIDTH - count))
    }
}
