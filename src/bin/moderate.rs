//! Command-line moderation tool.
//!
//! Runs the same censor engine and upload validator as the HTTP service,
//! configured from the same environment variables.
//!
//! # Usage
//!
//! ```bash
//! # Censor text from arguments or stdin
//! cargo run --bin moderate -- censor "Dasar ANNJING!"
//! echo "review text" | cargo run --bin moderate -- censor
//!
//! # Exit with status 1 if the text contains banned words
//! cargo run --bin moderate -- check "some comment"
//!
//! # Show the content type detected for files
//! cargo run --bin moderate -- sniff photo.jpg upload.png
//!
//! # Validate and store files as one batch
//! cargo run --bin moderate -- ingest a.jpg b.png --dir static/uploads
//! ```

use lelana_moderation::application::services::UploadValidator;
use lelana_moderation::config::{self, Config};
use lelana_moderation::domain::censor::CensorEngine;
use lelana_moderation::domain::upload::SeekableUpload;
use lelana_moderation::utils::mime_sniffer::sniff_mime;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

/// Moderation tool for Lelana.id content.
#[derive(Parser)]
#[command(name = "moderate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Censor text (reads stdin when no text is given)
    Censor {
        /// Text to censor; multiple arguments are joined with spaces
        text: Vec<String>,
    },

    /// Check text for banned words, exiting with status 1 on a match
    Check {
        text: String,
    },

    /// Detect the content type of files from their leading bytes
    Sniff {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Validate files and store them under generated names
    Ingest {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Target directory (defaults to UPLOAD_FOLDER)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Censor { text } => handle_censor(&config, text),
        Commands::Check { text } => handle_check(&config, &text),
        Commands::Sniff { files } => handle_sniff(&config, &files),
        Commands::Ingest { files, dir } => handle_ingest(&config, &files, dir),
    }
}

fn handle_censor(config: &Config, text: Vec<String>) -> Result<ExitCode> {
    let input = if text.is_empty() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        text.join(" ")
    };

    let engine = CensorEngine::new(config.banned_words());
    print!("{}", engine.censor(&input));
    if !input.ends_with('\n') {
        println!();
    }

    Ok(ExitCode::SUCCESS)
}

fn handle_check(config: &Config, text: &str) -> Result<ExitCode> {
    let engine = CensorEngine::new(config.banned_words());

    if engine.contains_match(text) {
        println!("{} {}", "✗".red().bold(), "Banned words found".red());
        println!("  {}", engine.censor(text).as_ref().dimmed());
        Ok(ExitCode::FAILURE)
    } else {
        println!("{} {}", "✓".green().bold(), "Clean".green());
        Ok(ExitCode::SUCCESS)
    }
}

fn handle_sniff(config: &Config, files: &[PathBuf]) -> Result<ExitCode> {
    let policy = config.upload_policy();
    let mut all_allowed = true;

    for path in files {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

        let mut head = Vec::with_capacity(policy.sniff_len());
        file.take(policy.sniff_len() as u64)
            .read_to_end(&mut head)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mime = sniff_mime(&head);
        if policy.allows_mime(mime) {
            println!("{:<40} {}", path.display(), mime.green());
        } else {
            all_allowed = false;
            println!("{:<40} {} {}", path.display(), mime.red(), "(rejected)".dimmed());
        }
    }

    if all_allowed {
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} {}",
            "Allowed types:".dimmed(),
            policy.allowed_mimes().join(", ")
        );
        Ok(ExitCode::FAILURE)
    }
}

fn handle_ingest(config: &Config, files: &[PathBuf], dir: Option<PathBuf>) -> Result<ExitCode> {
    let dir = dir.unwrap_or_else(|| config.upload_folder.clone());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut batch = files
        .iter()
        .map(|path| {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(SeekableUpload::new(path.display().to_string(), file))
        })
        .collect::<Result<Vec<_>>>()?;

    let validator = UploadValidator::new(&dir, config.upload_policy());

    match validator.save_all(&mut batch) {
        Ok(accepted) => {
            println!(
                "{} Stored {} file(s) in {}",
                "✓".green().bold(),
                accepted.len(),
                dir.display()
            );
            for file in accepted {
                println!(
                    "  {} → {} ({}, {} bytes)",
                    file.original_name,
                    file.filename.as_str().cyan(),
                    file.content_type,
                    file.size
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_validation() => {
            println!("{} {}", "✗".red().bold(), e.to_string().as_str().red());
            println!(
                "  {} {}",
                "Allowed types:".dimmed(),
                validator.policy().allowed_mimes().join(", ")
            );
            println!("  {}", "Nothing was stored.".dimmed());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).context("Failed to store files"),
    }
}
