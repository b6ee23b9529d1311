//! JSON rendering of a plan for the manifest generators.

use crate::models::NetworkPlan;
use std::io;
use std::path::Path;

pub fn plan_to_json(plan: &NetworkPlan) -> serde_json::Result<String> {
    serde_json::to_string_pretty(plan)
}

/// Write the plan JSON to `path`, or stdout when `None`.
pub fn write_plan(plan: &NetworkPlan, path: Option<&Path>) -> io::Result<()> {
    let json = plan_to_json(plan)?;
    match path {
        Some(path) => {
            log::info!("Writing plan to {}", path.display());
            std::fs::write(path, json + "\n")
        }
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ipv4, SubnetSpec, VpcSpec};

    #[test]
    fn test_plan_json_field_names() {
        let plan = NetworkPlan {
            vpc: VpcSpec::Managed {
                cidr_block: Ipv4::new("10.0.0.0/16").unwrap(),
            },
            subnets: vec![SubnetSpec {
                id: "infra-id-subnet-private-a".to_string(),
                availability_zone: "a".to_string(),
                cidr_block: Ipv4::new("10.0.0.0/19").unwrap(),
                is_public: false,
            }],
        };
        let value: serde_json::Value =
            serde_json::from_str(&plan_to_json(&plan).unwrap()).unwrap();
        assert_eq!(value["vpc"]["cidrBlock"], "10.0.0.0/16");
        assert_eq!(value["subnets"][0]["availabilityZone"], "a");
        assert_eq!(value["subnets"][0]["cidrBlock"], "10.0.0.0/19");
        assert_eq!(value["subnets"][0]["isPublic"], false);
    }
}
