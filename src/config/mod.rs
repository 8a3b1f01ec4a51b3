//! Configuration module for the analyzer.
//!
//! Structured configuration loaded from environment variables, organized by
//! concern: analysis parameters, risk parameters and the data collaborator.

mod analysis_env_config;
mod risk_env_config;

pub use analysis_env_config::AnalysisEnvConfig;
pub use risk_env_config::RiskEnvConfig;

use crate::domain::config::{AnalysisConfig, RiskConfig};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub risk: RiskConfig,

    /// Store analyses without trade levels too
    pub persist_all_analyses: bool,
    /// Directory read by the CSV market-data provider
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Both domain value objects are validated before they are returned.
    pub fn from_env() -> Result<Self> {
        let analysis = AnalysisEnvConfig::from_env().context("Failed to load analysis config")?;
        analysis
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid analysis config: {}", e))?;

        let risk = RiskEnvConfig::from_env().context("Failed to load risk config")?;
        risk.validate()
            .map_err(|e| anyhow::anyhow!("Invalid risk config: {}", e))?;

        Ok(Self {
            analysis,
            risk,
            persist_all_analyses: parse_bool("PERSIST_ALL_ANALYSES", false)?,
            data_dir: PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string())),
        })
    }
}

fn parse_bool(key: &str, default: bool) -> Result<bool> {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<bool>()
        .context(format!("Failed to parse {}", key))
}
