//! Error types for the subnet planner.

use crate::metadata::MetadataError;
use crate::models::{CidrError, Ipv4};
use std::fmt;
use thiserror::Error;

/// A result type using [`PlanError`].
pub type Result<T> = std::result::Result<T, PlanError>;

/// Step of the managed VPC layout a CIDR split belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStage {
    PrivateSubnets,
    PublicSubnets,
    EdgeSubnets,
}

impl fmt::Display for PlanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStage::PrivateSubnets => write!(f, "computing private subnets"),
            PlanStage::PublicSubnets => write!(f, "computing public subnets"),
            PlanStage::EdgeSubnets => write!(f, "computing edge subnets"),
        }
    }
}

/// Every failure is fatal to the planning run; no partial plan is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlanError {
    /// A required install config field is absent.
    #[error("missing install config: {0}")]
    MissingInstallConfig(&'static str),

    /// The cluster identity is absent or incomplete.
    #[error("missing cluster metadata: {0}")]
    MissingClusterMetadata(&'static str),

    #[error(
        "all subnets must belong to the same VPC: {subnet} is from {vpc}, but {baseline_subnet} is from {baseline_vpc}"
    )]
    MultipleVpcsDetected {
        subnet: String,
        vpc: String,
        baseline_subnet: String,
        baseline_vpc: String,
    },

    #[error("subnets belong to VPC {found}, but the install config names VPC {configured}")]
    VpcMismatch { configured: String, found: String },

    #[error("failed to find subnet {0}")]
    SubnetNotFound(String),

    #[error("subnet {subnet} is in zone {zone} which is unknown to the region metadata")]
    UnknownZone { subnet: String, zone: String },

    #[error("could not locate routing table for {0}")]
    RoutingTableNotFound(String),

    #[error("zone {0} is declared in both the edge pool and a regular pool")]
    ConflictingZoneRoles(String),

    #[error("no availability zones found for the cluster")]
    NoAvailabilityZones,

    #[error("{stage}: {source}")]
    InsufficientCidrSpace {
        stage: PlanStage,
        #[source]
        source: CidrError,
    },

    #[error("subnets {first} ({first_cidr}) and {second} ({second_cidr}) overlap")]
    OverlappingSubnets {
        first: String,
        first_cidr: Ipv4,
        second: String,
        second_cidr: Ipv4,
    },

    #[error("subnet {subnet} ({cidr}) is outside of the machine network {network}")]
    SubnetOutsideNetwork {
        subnet: String,
        cidr: Ipv4,
        network: Ipv4,
    },

    #[error("zone {zone} used by the {pool} pool has no {visibility} subnet")]
    MissingZoneCoverage {
        zone: String,
        pool: String,
        visibility: &'static str,
    },

    #[error("{stage}: {source}")]
    Metadata {
        stage: &'static str,
        #[source]
        source: MetadataError,
    },
}

impl PlanError {
    pub(crate) fn metadata(stage: &'static str) -> impl FnOnce(MetadataError) -> PlanError {
        move |source| PlanError::Metadata { stage, source }
    }

    /// Capacity errors are raised when the base CIDR is too small for the layout.
    pub fn is_capacity_error(&self) -> bool {
        matches!(self, PlanError::InsufficientCidrSpace { .. })
    }
}
