//! Subnet planning logic.
//!
//! - [`classifier`] - public/private inference from route tables
//! - [`zones`] - zone sets per machine pool role
//! - [`overlap`] - overlapping and out-of-network subnet detection
//! - [`planner`] - BYO relay and managed CIDR layout

pub mod classifier;
pub mod overlap;
pub mod planner;
pub mod zones;

// Re-export public functions
pub use classifier::{
    classify, classify_subnets, is_subnet_public, Classification, RouteTableSource, SubnetGroups,
};
pub use overlap::{check_non_overlapping, find_overlapping_subnets, OverlapConflict};
pub use planner::{gather_subnets, plan, plan_byo_vpc, plan_managed_vpc};
pub use zones::{PoolRole, ZoneSet};
