//! Metadata provider backed by a snapshot file.
//!
//! The snapshot holds the already-drained results of the zone, subnet and
//! route table queries for one region.

use super::provider::{MetadataError, MetadataProvider};
use crate::input::read_json_file;
use crate::models::{RouteTable, SubnetFacts, Zone};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSnapshot {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub subnets: Vec<SubnetFacts>,
    #[serde(default)]
    pub route_tables: Vec<RouteTable>,
}

/// Read a metadata snapshot written by an earlier discovery run.
pub fn read_metadata_snapshot(path: impl AsRef<Path>) -> Result<MetadataSnapshot, MetadataError> {
    let path = path.as_ref();
    let snapshot: MetadataSnapshot = read_json_file(path)?;
    log::info!(
        "Reading metadata snapshot {}: region={} zones={} subnets={} route_tables={}",
        path.display(),
        snapshot.region,
        snapshot.zones.len(),
        snapshot.subnets.len(),
        snapshot.route_tables.len()
    );
    Ok(snapshot)
}

impl MetadataProvider for MetadataSnapshot {
    fn zones(&self) -> Result<Vec<Zone>, MetadataError> {
        Ok(self.zones.clone())
    }

    fn subnets(&self, ids: &[String]) -> Result<Vec<SubnetFacts>, MetadataError> {
        Ok(self
            .subnets
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    fn route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>, MetadataError> {
        // tables without a VPC ID are assumed to belong to the queried VPC
        Ok(self
            .route_tables
            .iter()
            .filter(|rt| rt.vpc_id.as_deref().map_or(true, |id| id == vpc_id))
            .cloned()
            .collect())
    }
}
