//! Configuration domain module
//!
//! Domain value objects for analysis and risk parameters. They are built from
//! the environment by `crate::config` and passed explicitly to the components
//! that need them.

pub mod analysis_config;
pub mod risk_config;

pub use analysis_config::{AnalysisConfig, AnalysisConfigError};
pub use risk_config::{RiskConfig, RiskConfigError};
