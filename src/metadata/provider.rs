//! Source of zone, subnet and route table facts.

use crate::input::LoadError;
use crate::models::{RouteTable, SubnetFacts, Zone};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Discovery of cloud facts for one planning run.
///
/// Implementations drain any pagination before returning; the planner never
/// sees a partial result and calls the provider sequentially.
pub trait MetadataProvider {
    /// All zones of the region, regular and edge.
    fn zones(&self) -> Result<Vec<Zone>, MetadataError>;

    /// Facts for the given subnet IDs. Unknown IDs are simply absent.
    fn subnets(&self, ids: &[String]) -> Result<Vec<SubnetFacts>, MetadataError>;

    /// Route tables of a VPC.
    fn route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>, MetadataError>;

    /// Names of the regular availability zones, sorted.
    fn availability_zones(&self) -> Result<Vec<String>, MetadataError> {
        let mut names: Vec<String> = self
            .zones()?
            .into_iter()
            .filter(|z| !z.is_edge())
            .map(|z| z.name)
            .collect();
        names.sort();
        Ok(names)
    }
}
