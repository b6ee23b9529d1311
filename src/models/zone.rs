//! AWS zone metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zone type attribute as reported by the cloud.
///
/// Local Zones and Wavelength Zones are both treated as edge zones.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    #[serde(rename = "availability-zone")]
    Regular,
    #[serde(rename = "local-zone", alias = "wavelength-zone")]
    Edge,
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneKind::Regular => write!(f, "availability-zone"),
            ZoneKind::Edge => write!(f, "edge-zone"),
        }
    }
}

/// A zone discovered in the region.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Zone {
    /// Zone name, e.g. `us-east-1a` or `us-east-1-nyc-1a`.
    #[serde(rename = "zoneName")]
    pub name: String,
    #[serde(rename = "zoneType")]
    pub kind: ZoneKind,
    /// Region name for regular zones, the local zone group for edge zones.
    #[serde(rename = "groupName", default)]
    pub group: String,
}

impl Zone {
    pub fn is_edge(&self) -> bool {
        self.kind == ZoneKind::Edge
    }
}
