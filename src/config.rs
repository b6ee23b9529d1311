//! Planner settings and binary configuration.
//!
//! Settings are plain values handed to the planner; nothing here is global.

use std::env;
use thiserror::Error;

/// AWS refuses subnets smaller than /28.
pub const DEFAULT_SMALLEST_SUBNET_PREFIX: u8 = 28;

pub const ENV_INSTALL_CONFIG: &str = "INSTALL_CONFIG";
pub const ENV_CLUSTER_METADATA: &str = "CLUSTER_METADATA";
pub const ENV_METADATA_SNAPSHOT: &str = "AWS_METADATA_SNAPSHOT";
pub const ENV_PLAN_OUTPUT: &str = "PLAN_OUTPUT";
pub const ENV_SMALLEST_SUBNET_PREFIX: &str = "SMALLEST_SUBNET_PREFIX";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}={value}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Tunables of the CIDR layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerSettings {
    /// Longest prefix a planned subnet may have.
    pub smallest_subnet_prefix: u8,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        PlannerSettings {
            smallest_subnet_prefix: DEFAULT_SMALLEST_SUBNET_PREFIX,
        }
    }
}

impl PlannerSettings {
    /// Settings with an optional prefix override, e.g. from the environment.
    pub fn with_prefix_override(value: Option<&str>) -> Result<PlannerSettings, ConfigError> {
        let Some(value) = value else {
            return Ok(PlannerSettings::default());
        };
        let invalid = |reason: String| ConfigError::InvalidValue {
            name: ENV_SMALLEST_SUBNET_PREFIX,
            value: value.to_string(),
            reason,
        };
        let prefix: u8 = value
            .trim()
            .trim_start_matches('/')
            .parse()
            .map_err(|e| invalid(format!("{e}")))?;
        if prefix > 32 {
            return Err(invalid("prefix must be between 0 and 32".to_string()));
        }
        Ok(PlannerSettings {
            smallest_subnet_prefix: prefix,
        })
    }
}

/// Paths and settings of one run of the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub install_config: String,
    pub cluster_metadata: String,
    pub metadata_snapshot: String,
    /// Where to write the plan JSON, stdout when `None`.
    pub plan_output: Option<String>,
    pub settings: PlannerSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        let var = |name: &str, default: &str| env::var(name).unwrap_or_else(|_| default.to_string());
        let prefix = env::var(ENV_SMALLEST_SUBNET_PREFIX).ok();
        Ok(AppConfig {
            install_config: var(ENV_INSTALL_CONFIG, "install-config.json"),
            cluster_metadata: var(ENV_CLUSTER_METADATA, "metadata.json"),
            metadata_snapshot: var(ENV_METADATA_SNAPSHOT, "aws-metadata.json"),
            plan_output: env::var(ENV_PLAN_OUTPUT).ok().filter(|p| !p.is_empty()),
            settings: PlannerSettings::with_prefix_override(prefix.as_deref())?,
        })
    }
}
