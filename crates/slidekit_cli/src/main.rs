//! SlideKit CLI
//!
//! Replays headless slide scenarios and validates configuration files.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use slidekit_app::{run_loaded_scenario, HeadlessScenario};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::SlideKitConfig;

#[derive(Parser)]
#[command(name = "slidekit")]
#[command(author, version, about = "Slide-to-confirm gesture engine tooling")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON scenario against a headless host
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// slidekit.toml with slide, theme and run settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Logical milliseconds per frame
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Write the JSON report here (relative path) instead of stdout
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Validate a slidekit.toml
    CheckConfig {
        /// Config file
        path: PathBuf,
    },

    /// Write a default slidekit.toml
    Init {
        /// Destination file
        #[arg(default_value = "slidekit.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            config,
            tick_ms,
            report,
        } => cmd_run(&scenario, config.as_deref(), tick_ms, report.as_deref()),
        Commands::CheckConfig { path } => cmd_check_config(&path),
        Commands::Init { path, force } => cmd_init(&path, force),
    }
}

fn cmd_run(
    scenario_path: &Path,
    config_path: Option<&Path>,
    tick_ms: Option<u64>,
    report_path: Option<&Path>,
) -> Result<ExitCode> {
    let scenario = HeadlessScenario::from_path(scenario_path)?;
    let file_config = match config_path {
        Some(path) => Some(SlideKitConfig::load(path)?),
        None => None,
    };
    let run_config = file_config
        .as_ref()
        .map(|c| c.run_config(tick_ms))
        .unwrap_or_else(|| SlideKitConfig::default().run_config(tick_ms));
    let slide_config = file_config.as_ref().map(|c| &c.slide);

    info!(
        scenario = %scenario_path.display(),
        steps = scenario.steps.len(),
        tick_ms = run_config.tick_ms,
        "running scenario"
    );
    let outcome = run_loaded_scenario(&scenario, run_config, slide_config)?;
    let report = outcome.report();

    match report_path {
        Some(path) => {
            report
                .write_to_path(path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!(report = %path.display(), "report written");
        }
        None => report.write_to_writer(&mut std::io::stdout().lock())?,
    }

    if outcome.is_failed() {
        warn!(
            step = ?report.failed_step_index,
            assertion = report.assertion.as_deref().unwrap_or_default(),
            message = report.message.as_deref().unwrap_or_default(),
            "scenario failed"
        );
        return Ok(ExitCode::FAILURE);
    }
    info!(
        frames = report.elapsed_frames,
        ms = report.elapsed_ms,
        "scenario passed"
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_check_config(path: &Path) -> Result<ExitCode> {
    let config = SlideKitConfig::load(path)?;
    info!(
        path = %path.display(),
        fractional_threshold = config.slide.fractional_threshold,
        velocity_threshold = config.slide.velocity_threshold,
        theme = %config.theme.preset,
        "config is valid"
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_init(path: &Path, force: bool) -> Result<ExitCode> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let content = SlideKitConfig::default().to_toml()?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "created config");
    Ok(ExitCode::SUCCESS)
}
