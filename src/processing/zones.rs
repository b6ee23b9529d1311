//! Zone set bookkeeping per machine pool role.
//!
//! Zones are collected from the install config pools, falling back to the
//! platform default zones and then to every zone of the region. Sets are
//! unordered; every consumer goes through the sorted accessors so the CIDR
//! assignment is reproducible.

use crate::error::{PlanError, Result};
use crate::models::{InstallConfig, COMPUTE_POOL, CONTROL_PLANE_POOL, EDGE_POOL};
use itertools::Itertools;
use std::collections::HashSet;

/// Role of a machine pool for zone placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolRole {
    ControlPlane,
    Compute,
    Edge,
}

impl PoolRole {
    pub fn from_pool_name(name: &str) -> PoolRole {
        match name {
            CONTROL_PLANE_POOL => PoolRole::ControlPlane,
            EDGE_POOL => PoolRole::Edge,
            _ => PoolRole::Compute,
        }
    }

    pub fn pool_name(&self) -> &'static str {
        match self {
            PoolRole::ControlPlane => CONTROL_PLANE_POOL,
            PoolRole::Compute => COMPUTE_POOL,
            PoolRole::Edge => EDGE_POOL,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneSet {
    control_plane: HashSet<String>,
    compute: HashSet<String>,
    edge: HashSet<String>,
}

impl ZoneSet {
    pub fn new() -> ZoneSet {
        ZoneSet::default()
    }

    fn role_mut(&mut self, role: PoolRole) -> &mut HashSet<String> {
        match role {
            PoolRole::ControlPlane => &mut self.control_plane,
            PoolRole::Compute => &mut self.compute,
            PoolRole::Edge => &mut self.edge,
        }
    }

    /// Add zones declared by a pool of the given role.
    pub fn set_availability_zones(&mut self, role: PoolRole, zones: &[String]) {
        self.role_mut(role).extend(zones.iter().cloned());
    }

    /// Fill an empty regular role from the platform default, else from the region.
    ///
    /// The edge role has no defaults.
    pub fn set_default_config_zones(
        &mut self,
        role: PoolRole,
        default_config: &[String],
        default_region: &[String],
    ) {
        if role == PoolRole::Edge {
            return;
        }
        let set = self.role_mut(role);
        if !set.is_empty() {
            return;
        }
        let zones = if default_config.is_empty() {
            default_region
        } else {
            default_config
        };
        set.extend(zones.iter().cloned());
    }

    /// Sorted zones of one role.
    pub fn zones(&self, role: PoolRole) -> Vec<String> {
        let set = match role {
            PoolRole::ControlPlane => &self.control_plane,
            PoolRole::Compute => &self.compute,
            PoolRole::Edge => &self.edge,
        };
        set.iter().sorted().cloned().collect()
    }

    /// Sorted union of the control plane and compute zones.
    pub fn availability_zones(&self) -> Vec<String> {
        self.control_plane
            .union(&self.compute)
            .sorted()
            .cloned()
            .collect()
    }

    /// Sorted Local Zones / Wavelength Zones of the edge pool.
    pub fn edge_zones(&self) -> Vec<String> {
        self.zones(PoolRole::Edge)
    }

    /// Edge zones must not be used by regular pools, and vice versa.
    pub fn validate(&self) -> Result<()> {
        let conflict = self
            .edge
            .iter()
            .filter(|z| self.control_plane.contains(*z) || self.compute.contains(*z))
            .sorted()
            .next();
        match conflict {
            Some(zone) => Err(PlanError::ConflictingZoneRoles(zone.clone())),
            None => Ok(()),
        }
    }

    /// Zones named explicitly by the install config pools, without defaults.
    ///
    /// Used with existing subnets, where every declared zone must be covered.
    pub fn from_declared_pools(cfg: &InstallConfig) -> Result<ZoneSet> {
        let mut out = ZoneSet::new();
        if let Some(zones) = cfg.control_plane.as_ref().and_then(|p| p.aws_zones()) {
            out.set_availability_zones(PoolRole::ControlPlane, zones);
        }
        for pool in &cfg.compute {
            if let Some(zones) = pool.aws_zones() {
                out.set_availability_zones(PoolRole::from_pool_name(&pool.name), zones);
            }
        }
        out.validate()?;
        Ok(out)
    }

    /// Build the zone sets from the install config pools.
    ///
    /// `zones_in_region` are the regular zones discovered in the region.
    pub fn from_install_config(cfg: &InstallConfig, zones_in_region: &[String]) -> Result<ZoneSet> {
        let mut out = ZoneSet::new();
        let default_zones = cfg.default_zones();

        if let Some(zones) = cfg.control_plane.as_ref().and_then(|p| p.aws_zones()) {
            out.set_availability_zones(PoolRole::ControlPlane, zones);
        }
        out.set_default_config_zones(PoolRole::ControlPlane, default_zones, zones_in_region);

        for pool in &cfg.compute {
            let Some(zones) = pool.aws_zones() else {
                continue;
            };
            let role = PoolRole::from_pool_name(&pool.name);
            out.set_availability_zones(role, zones);
            if role == PoolRole::Edge {
                continue;
            }
            out.set_default_config_zones(role, default_zones, zones_in_region);
        }

        out.validate()?;
        log::debug!(
            "Zones control_plane={:?} compute={:?} edge={:?}",
            out.zones(PoolRole::ControlPlane),
            out.zones(PoolRole::Compute),
            out.edge_zones()
        );
        Ok(out)
    }
}
