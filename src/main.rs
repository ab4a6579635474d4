//! Job finder: resume-driven job posting matching and ranking

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use job_finder::cli::{self, Cli, Commands, ConfigAction};
use job_finder::config::Config;
use job_finder::error::{JobFinderError, Result};
use job_finder::matching::scorer::ScoredPosting;
use job_finder::output::{export, formatter};
use job_finder::profile::ResumeProfile;
use job_finder::{input, sources, JobFinderSession};
use log::{error, info};
use std::path::Path;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    if let Err(e) = run_command(cli.command, config).await {
        if let JobFinderError::ProfileParse { raw, .. } = &e {
            error!("Failed to parse AI response: {}", raw);
        }
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            postings,
            location,
            domain,
            export: export_path,
            min_score,
            detailed,
        } => {
            let location = location.unwrap_or_else(|| config.search.default_location.clone());
            let domains = if domain.is_empty() {
                config.search.accepted_domains.clone()
            } else {
                domain
            };

            let raw_postings = sources::load_postings(&postings)?;
            info!("loaded {} raw postings from {}", raw_postings.len(), postings.display());

            let (session, profile) = build_profile(&resume, &config).await?;
            formatter::print_profile(&profile);

            let (ranked, diagnostics) =
                session.rank_postings(&raw_postings, &profile, &location, &domains);
            let visible: Vec<ScoredPosting> = ranked
                .iter()
                .filter(|s| s.match_score >= min_score)
                .cloned()
                .collect();

            formatter::print_diagnostics(&diagnostics);
            formatter::print_rankings(&visible, detailed || config.output.detailed);

            if let Some(path) = export_path {
                export::export_csv(&visible, &path)?;
                println!("\nExported {} postings to {}", visible.len(), path.display());
            }

            Ok(())
        }

        Commands::Profile { resume } => {
            let (_session, profile) = build_profile(&resume, &config).await?;
            formatter::print_profile(&profile);
            Ok(())
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    JobFinderError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
                Ok(())
            }
            ConfigAction::Reset => {
                Config::default().save()?;
                println!("Configuration reset to defaults");
                Ok(())
            }
        },
    }
}

/// Extract resume text, index it, and run the profile extraction cycle.
async fn build_profile(
    resume: &Path,
    config: &Config,
) -> Result<(JobFinderSession, ResumeProfile)> {
    cli::validate_file_extension(resume, &["pdf", "txt", "md"])
        .map_err(JobFinderError::InvalidInput)?;

    let resume_text = input::extract_text(resume).await?;
    info!("extracted {} characters from {}", resume_text.len(), resume.display());

    let mut session = JobFinderSession::new(config)?;

    let spinner = progress_spinner("Indexing resume...");
    let chunk_count = session
        .ingest(&resume_text, &resume.to_string_lossy())
        .await?;
    spinner.set_message("Analyzing resume...");
    let profile = session.profile().await?;
    spinner.finish_and_clear();

    info!("indexed {} chunks", chunk_count);
    Ok((session, profile))
}

fn progress_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("spinner template"),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
