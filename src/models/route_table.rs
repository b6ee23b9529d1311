//! Route table facts used to infer subnet publicness.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteTableAssociation {
    #[serde(default)]
    pub subnet_id: Option<String>,
    /// Set on the association of the VPC's main (implicit) route table.
    #[serde(default)]
    pub main: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default)]
    pub destination_cidr_block: Option<String>,
    /// Target gateway: `local`, `igw-...`, `vgw-...`.
    #[serde(default)]
    pub gateway_id: Option<String>,
    #[serde(default)]
    pub vpc_peering_connection_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteTable {
    pub route_table_id: String,
    #[serde(default)]
    pub vpc_id: Option<String>,
    #[serde(default)]
    pub associations: Vec<RouteTableAssociation>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl RouteTable {
    /// True when the table is explicitly associated with `subnet_id`.
    pub fn is_associated_with(&self, subnet_id: &str) -> bool {
        self.associations
            .iter()
            .any(|a| a.subnet_id.as_deref() == Some(subnet_id))
    }

    pub fn is_main(&self) -> bool {
        self.associations.iter().any(|a| a.main)
    }
}
