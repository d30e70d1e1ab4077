//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use week1_lab::CalculatorConfig;

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub calculator: CalculatorConfig,
    #[serde(default)]
    pub stress: StressConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StressConfig {
    #[serde(default = "default_threads")]
    pub threads: usize,
    #[serde(default = "default_rounds")]
    pub rounds: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            rounds: default_rounds(),
        }
    }
}

fn default_threads() -> usize {
    8
}

fn default_rounds() -> usize {
    1000
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if config.stress.threads == 0 {
        anyhow::bail!("stress.threads must be at least 1");
    }

    Ok(config)
}
