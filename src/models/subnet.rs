//! Existing (bring-your-own) subnet records.

use super::{Ipv4, Zone};
use serde::{Deserialize, Serialize};

/// Raw subnet facts as reported by the metadata provider, before classification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetFacts {
    #[serde(rename = "subnetId")]
    pub id: String,
    pub vpc_id: String,
    pub cidr_block: Ipv4,
    pub availability_zone: String,
}

/// A classified subnet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    /// Subnet identifier.
    pub id: String,
    /// Owning VPC identifier.
    pub vpc_id: String,
    /// CIDR block of the subnet.
    pub cidr: Ipv4,
    /// Zone the subnet lives in.
    pub zone: Zone,
    /// Routable to an internet gateway.
    pub public: bool,
}
