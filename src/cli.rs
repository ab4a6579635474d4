//! CLI interface for the job finder

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "job-finder")]
#[command(about = "Resume-driven job posting matcher and ranker")]
#[command(
    long_about = "Extracts skills and experience from a resume with retrieval-augmented generation, then filters, scores, and ranks scraped job postings against them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank scraped job postings against a resume
    Match {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to a JSON dump of raw postings from the scraper or search client
        #[arg(short, long)]
        postings: PathBuf,

        /// Target location postings must mention; defaults to the config value
        #[arg(short, long)]
        location: Option<String>,

        /// Accepted source domain (repeatable); overrides the config list
        #[arg(short, long)]
        domain: Vec<String>,

        /// Export the ranked results to a CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Hide postings scoring below this value
        #[arg(long, default_value_t = 0.0)]
        min_score: f64,

        /// Show descriptions and links for each posting
        #[arg(long)]
        detailed: bool,
    },

    /// Extract and print the structured resume profile
    Profile {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Validate file extension against an allowed list.
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
