//! Zone and subnet planning for AWS cluster VPCs.
//!
//! Derives a deterministic, non-overlapping subnet layout from the zones a
//! cluster declares, or relays the pre-existing subnets of a BYO VPC after
//! classifying them as public or private.

pub mod config;
pub mod error;
pub mod input;
pub mod metadata;
pub mod models;
pub mod output;
pub mod processing;

pub use config::{AppConfig, PlannerSettings};
pub use error::{PlanError, PlanStage};
pub use models::NetworkPlan;
pub use processing::plan;

use metadata::read_metadata_snapshot;
use std::error::Error;

/// Load the three input files named by `app` and compute the plan.
pub fn plan_from_files(app: &AppConfig) -> Result<NetworkPlan, Box<dyn Error>> {
    let install_config = input::read_install_config(&app.install_config)?;
    let cluster_id = input::read_cluster_id(&app.cluster_metadata)?;
    let snapshot = read_metadata_snapshot(&app.metadata_snapshot)?;
    let plan = plan(
        Some(&install_config),
        Some(&cluster_id),
        &snapshot,
        &app.settings,
    )?;
    Ok(plan)
}
