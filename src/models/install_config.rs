//! The subset of the cluster install configuration read by the planner.

use super::Ipv4;
use serde::{Deserialize, Serialize};

/// Machine pool name of the control plane.
pub const CONTROL_PLANE_POOL: &str = "master";
/// Machine pool name of the default compute pool.
pub const COMPUTE_POOL: &str = "worker";
/// Machine pool name of the compute pool placed in Local/Wavelength zones.
pub const EDGE_POOL: &str = "edge";

/// How the cluster endpoints are published.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishStrategy {
    /// Public subnets and load balancers are created.
    #[default]
    External,
    Internal,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfig {
    #[serde(default)]
    pub publish: PublishStrategy,
    #[serde(default)]
    pub networking: Option<Networking>,
    #[serde(default)]
    pub control_plane: Option<MachinePool>,
    #[serde(default)]
    pub compute: Vec<MachinePool>,
    #[serde(default)]
    pub platform: Platform,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Networking {
    #[serde(default)]
    pub machine_network: Vec<MachineNetworkEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MachineNetworkEntry {
    pub cidr: Ipv4,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Platform {
    #[serde(default)]
    pub aws: Option<AwsPlatform>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AwsPlatform {
    #[serde(default)]
    pub region: String,
    /// Pre-existing subnet IDs. A non-empty list selects the BYO VPC mode.
    #[serde(default)]
    pub subnets: Vec<String>,
    /// Pre-existing VPC, checked against the VPC of the listed subnets.
    #[serde(default)]
    pub vpc: Option<String>,
    #[serde(default)]
    pub default_machine_platform: Option<AwsMachinePool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsMachinePool {
    #[serde(default)]
    pub zones: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MachinePool {
    pub name: String,
    #[serde(default)]
    pub platform: MachinePoolPlatform,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MachinePoolPlatform {
    #[serde(default)]
    pub aws: Option<AwsMachinePool>,
}

impl MachinePool {
    /// Pool with an AWS platform section listing `zones`.
    pub fn with_zones(name: &str, zones: &[&str]) -> MachinePool {
        MachinePool {
            name: name.to_string(),
            platform: MachinePoolPlatform {
                aws: Some(AwsMachinePool {
                    zones: zones.iter().map(|z| z.to_string()).collect(),
                }),
            },
        }
    }

    /// Zones declared for the pool, `None` when the pool has no AWS section.
    pub fn aws_zones(&self) -> Option<&[String]> {
        self.platform.aws.as_ref().map(|p| p.zones.as_slice())
    }
}

/// Identity of the cluster being installed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterId {
    #[serde(rename = "clusterName", default)]
    pub cluster_name: String,
    /// Prefix of every synthesized resource name.
    #[serde(rename = "infraID")]
    pub infra_id: String,
}

impl InstallConfig {
    pub fn is_external(&self) -> bool {
        self.publish == PublishStrategy::External
    }

    /// First machine network entry, the base CIDR of a managed VPC.
    pub fn machine_cidr(&self) -> Option<Ipv4> {
        self.networking
            .as_ref()
            .and_then(|n| n.machine_network.first())
            .map(|entry| entry.cidr)
    }

    /// BYO subnet IDs, empty for a managed VPC.
    pub fn subnet_ids(&self) -> &[String] {
        self.platform
            .aws
            .as_ref()
            .map(|aws| aws.subnets.as_slice())
            .unwrap_or(&[])
    }

    pub fn default_zones(&self) -> &[String] {
        self.platform
            .aws
            .as_ref()
            .and_then(|aws| aws.default_machine_platform.as_ref())
            .map(|pool| pool.zones.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_config_from_json() {
        let cfg: InstallConfig = serde_json::from_str(
            r#"{
                "publish": "Internal",
                "networking": {"machineNetwork": [{"cidr": "10.0.0.0/16"}]},
                "controlPlane": {"name": "master", "platform": {"aws": {"zones": ["a", "b"]}}},
                "compute": [{"name": "worker", "platform": {}}],
                "platform": {"aws": {"region": "us-east-1", "defaultMachinePlatform": {"zones": ["c"]}}}
            }"#,
        )
        .unwrap();
        assert!(!cfg.is_external());
        assert_eq!(cfg.machine_cidr(), Some(Ipv4::new("10.0.0.0/16").unwrap()));
        assert_eq!(cfg.default_zones(), ["c".to_string()]);
        assert!(cfg.subnet_ids().is_empty());
        assert_eq!(cfg.compute[0].aws_zones(), None);
        assert_eq!(
            cfg.control_plane.as_ref().and_then(|p| p.aws_zones()),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn test_install_config_defaults() {
        let cfg: InstallConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.is_external());
        assert_eq!(cfg.machine_cidr(), None);
        assert!(cfg.default_zones().is_empty());
    }
}
