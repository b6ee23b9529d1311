//! Domain models for the subnet planner.
//!
//! - [`Ipv4`] - IPv4 prefix with CIDR block arithmetic
//! - [`Zone`] - zone metadata (regular or edge)
//! - [`Subnet`], [`SubnetFacts`] - existing subnets, classified and raw
//! - [`RouteTable`] - route tables used for publicness inference
//! - [`InstallConfig`] - the install configuration read by the planner
//! - [`NetworkPlan`] - the planner's output

mod install_config;
mod ipv4;
mod plan;
mod route_table;
mod subnet;
mod zone;

// Re-export public types
pub use install_config::{
    AwsMachinePool, AwsPlatform, ClusterId, InstallConfig, MachineNetworkEntry, MachinePool,
    MachinePoolPlatform, Networking, Platform, PublishStrategy, COMPUTE_POOL,
    CONTROL_PLANE_POOL, EDGE_POOL,
};
pub use ipv4::{
    broadcast_addr, get_cidr_mask, ip_after_subnet, next_subnet_ipv4, split_bits,
    CidrError, Ipv4, MAX_LENGTH,
};
pub use plan::{NetworkPlan, SubnetSpec, VpcSpec};
pub use route_table::{Route, RouteTable, RouteTableAssociation};
pub use subnet::{Subnet, SubnetFacts};
pub use zone::{Zone, ZoneKind};
