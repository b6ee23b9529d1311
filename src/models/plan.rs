//! The computed network plan handed to manifest generation.

use super::Ipv4;
use serde::{Deserialize, Serialize};
use std::fmt;

/// VPC descriptor: an existing VPC or the CIDR of a VPC to be created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum VpcSpec {
    Existing {
        id: String,
    },
    Managed {
        #[serde(rename = "cidrBlock")]
        cidr_block: Ipv4,
    },
}

impl VpcSpec {
    /// Base CIDR of a managed VPC.
    pub fn cidr_block(&self) -> Option<Ipv4> {
        match self {
            VpcSpec::Managed { cidr_block } => Some(*cidr_block),
            VpcSpec::Existing { .. } => None,
        }
    }
}

impl fmt::Display for VpcSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VpcSpec::Existing { id } => write!(f, "existing VPC {id}"),
            VpcSpec::Managed { cidr_block } => write!(f, "managed VPC {cidr_block}"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetSpec {
    pub id: String,
    pub availability_zone: String,
    pub cidr_block: Ipv4,
    pub is_public: bool,
}

impl SubnetSpec {
    /// ID of a subnet created by the installer in `zone`.
    pub fn synthesized_id(infra_id: &str, public: bool, zone: &str) -> String {
        let visibility = if public { "public" } else { "private" };
        format!("{infra_id}-subnet-{visibility}-{zone}")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkPlan {
    pub vpc: VpcSpec,
    pub subnets: Vec<SubnetSpec>,
}

impl NetworkPlan {
    /// Copy of the plan with subnets ordered by ID, for comparisons.
    pub fn sorted_by_id(&self) -> NetworkPlan {
        let mut subnets = self.subnets.clone();
        subnets.sort_by(|a, b| a.id.cmp(&b.id));
        NetworkPlan {
            vpc: self.vpc.clone(),
            subnets,
        }
    }

    pub fn private_subnets(&self) -> impl Iterator<Item = &SubnetSpec> {
        self.subnets.iter().filter(|s| !s.is_public)
    }

    pub fn public_subnets(&self) -> impl Iterator<Item = &SubnetSpec> {
        self.subnets.iter().filter(|s| s.is_public)
    }

    /// True when `zone` has a subnet of the requested visibility.
    pub fn has_subnet(&self, zone: &str, public: bool) -> bool {
        self.subnets
            .iter()
            .any(|s| s.availability_zone == zone && s.is_public == public)
    }

    /// True when `zone` has any subnet.
    pub fn covers_zone(&self, zone: &str) -> bool {
        self.subnets.iter().any(|s| s.availability_zone == zone)
    }
}
