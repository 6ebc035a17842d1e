//! Lecturer command handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use sinta_client::ScraperClient;
use sinta_core::lecturer::parse_lecturer_ids;
use sinta_monitor::Config;

/// Lecturer subcommands
#[derive(Subcommand)]
pub enum LecturerCommands {
    /// Show the lecturer IDs stored on the backend
    List,
    /// Replace the stored lecturer IDs with the ones in a file
    Save {
        /// File with one SINTA lecturer ID per line
        file: PathBuf,
    },
}

pub async fn handle_lecturer_command(command: LecturerCommands, config: &Config) -> Result<()> {
    let client = ScraperClient::with_timeout(&config.base_url, config.request_timeout)?;

    match command {
        LecturerCommands::List => list_lecturers(&client).await,
        LecturerCommands::Save { file } => save_lecturers(&client, &file).await,
    }
}

async fn list_lecturers(client: &ScraperClient) -> Result<()> {
    let lecturer_ids = client.get_lecturers().await?;

    if lecturer_ids.is_empty() {
        println!("{}", "No lecturer IDs stored.".yellow());
    } else {
        println!(
            "{}",
            format!("{} lecturer ID(s):", lecturer_ids.len()).bold()
        );
        for id in lecturer_ids {
            println!("  {} {}", "▸".cyan(), id);
        }
    }

    Ok(())
}

async fn save_lecturers(client: &ScraperClient, file: &Path) -> Result<()> {
    let lecturer_ids = read_lecturer_file(file)?;
    if lecturer_ids.is_empty() {
        anyhow::bail!("{} contains no lecturer IDs", file.display());
    }

    let ack = client.post_lecturers(lecturer_ids.clone()).await?;
    if let Some(reason) = ack.rejection() {
        anyhow::bail!("Gagal menyimpan daftar dosen: {}", reason);
    }

    println!("{} Daftar dosen berhasil disimpan!", "✓".green());
    println!("  {} ID(s) saved", lecturer_ids.len().to_string().bold());

    Ok(())
}

/// Reads lecturer IDs from a file, one per line
pub(crate) fn read_lecturer_file(file: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read lecturer file {}", file.display()))?;

    Ok(parse_lecturer_ids(&text))
}
