//! AlloCAT CLI
//!
//! Asks for an application's expected load, data size, network traffic and
//! importance, decides compute/network/storage sizing and writes a
//! Kubernetes Deployment for it.

mod config;
mod output;
mod spinner;
mod wizard;

use allocat_lib::manifest::DEFAULT_IMAGE;
use allocat_lib::{generate, Aggregator, AggregatorConfig, ManifestConfig, StructuredLogger};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use output::{print_error, print_info, print_success, print_warning, OutputFormat};
use spinner::Spinner;
use wizard::{Wizard, WizardOutcome};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// AlloCAT - application resource sizing wizard
#[derive(Parser)]
#[command(name = "allocat")]
#[command(author, version, about = "AlloCAT - interactive resource sizing for Kubernetes deployments", long_about = None)]
pub struct Cli {
    /// Directory the deployment descriptor is written to [default: k8s]
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Container image used in the generated descriptor
    #[arg(long)]
    pub image: Option<String>,

    /// Summary output format
    #[arg(long, short, value_enum)]
    pub format: Option<OutputFormat>,

    /// Skip the simulated computation delay of each decision
    #[arg(long)]
    pub no_delay: bool,

    /// Path to a JSON configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

/// Settings after merging configuration and command-line flags
struct Settings {
    manifest: ManifestConfig,
    aggregator: AggregatorConfig,
    format: OutputFormat,
    log_json: bool,
}

impl Settings {
    fn resolve(cli: &Cli, file: config::CliConfig) -> Self {
        Self {
            manifest: ManifestConfig {
                output_dir: cli.output_dir.clone().unwrap_or(file.output_dir),
                image: cli.image.clone().unwrap_or(file.image),
                ..Default::default()
            },
            aggregator: AggregatorConfig {
                simulate_latency: file.simulate_latency && !cli.no_delay,
            },
            format: cli.format.unwrap_or(file.format),
            log_json: cli.log_json || file.log_json,
        }
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let file_config = config::CliConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, file_config);

    init_tracing(cli.verbose, settings.log_json);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    // Prompts go to stderr so stdout carries only the summary
    let outcome = tokio::task::spawn_blocking(|| {
        let stdin = std::io::stdin();
        Wizard::new(stdin.lock(), std::io::stderr()).run()
    })
    .await
    .context("Wizard task failed")?
    .context("Failed to read application specifications")?;

    let spec = match outcome {
        WizardOutcome::Completed(spec) => spec,
        WizardOutcome::Cancelled => {
            println!("Exiting...");
            return Ok(ExitCode::SUCCESS);
        }
    };

    let logger = StructuredLogger::new(&spec.app_name);
    logger.log_session_start(VERSION, &spec);

    let spinner = Spinner::start(
        format!("Processing resource allocation for {}...", spec.app_name),
        std::io::stderr().is_terminal(),
    );
    let result = Aggregator::standard(settings.aggregator.clone())
        .run(&spec)
        .await;
    spinner.stop().await;

    let decisions = match result {
        Ok(decisions) => decisions,
        Err(e) => {
            print_error(&e.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };

    let report = generate(&spec, &decisions, &settings.manifest);
    info!(app = %spec.app_name, written = report.descriptor_path.is_some(), "Run complete");

    match settings.format {
        OutputFormat::Json => {
            let json = report
                .summary
                .to_json()
                .context("Failed to serialize summary")?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            print_success("Resource allocation decided");
            println!();
            print!("{}", report.summary.render_text());
            if let Some(warning) = &report.summary.warning {
                println!();
                print_warning(warning);
            } else if settings.manifest.image == DEFAULT_IMAGE {
                print_info("Replace the placeholder image before applying the deployment");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
