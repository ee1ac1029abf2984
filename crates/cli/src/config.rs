//! Configuration management for the CLI

use allocat_lib::manifest::{DEFAULT_IMAGE, DEFAULT_OUTPUT_DIR};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Directory deployment descriptors are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Container image placed in generated descriptors
    #[serde(default = "default_image")]
    pub image: String,

    /// Apply each rule's artificial delay
    #[serde(default = "default_simulate_latency")]
    pub simulate_latency: bool,

    /// Summary output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Emit logs as JSON
    #[serde(default)]
    pub log_json: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

fn default_simulate_latency() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            image: default_image(),
            simulate_latency: default_simulate_latency(),
            format: OutputFormat::default(),
            log_json: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from a JSON file and `ALLOCAT_*` environment variables.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        match explicit {
            Some(path) => {
                builder = builder.add_source(
                    config::File::from(path)
                        .format(config::FileFormat::Json)
                        .required(true),
                );
            }
            None => {
                if let Some(path) = Self::config_path() {
                    builder = builder.add_source(
                        config::File::from(path)
                            .format(config::FileFormat::Json)
                            .required(false),
                    );
                }
            }
        }

        let config = builder
            .add_source(config::Environment::with_prefix("ALLOCAT"))
            .build()
            .context("Failed to load configuration")?;

        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Default configuration file path
    fn config_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|home| home.join(".config").join("allocat").join("config.json"))
    }
}
