//! Zone and CIDR planning for the cluster VPC.
//!
//! With existing subnets listed in the install config (BYO VPC) the classified
//! subnets are relayed as they are. Otherwise the machine network is carved
//! into one private subnet per zone, a public super-block split per zone, and
//! an edge super-block for Local/Wavelength zones. Every split leaves free
//! blocks behind for day-2 expansion.

use super::classifier::{classify_subnets, common_vpc, SubnetGroups};
use super::overlap::{check_non_overlapping, check_within_network};
use super::zones::{PoolRole, ZoneSet};
use crate::config::PlannerSettings;
use crate::error::{PlanError, PlanStage, Result};
use crate::metadata::MetadataProvider;
use crate::models::{
    CidrError, ClusterId, InstallConfig, Ipv4, NetworkPlan, SubnetSpec, VpcSpec,
};

/// Compute the network plan of a cluster.
///
/// Facts are fetched from `provider` first; the computation afterwards is pure
/// and either returns a complete plan or an error.
pub fn plan<P: MetadataProvider + ?Sized>(
    install_config: Option<&InstallConfig>,
    cluster_id: Option<&ClusterId>,
    provider: &P,
    settings: &PlannerSettings,
) -> Result<NetworkPlan> {
    let cfg = install_config.ok_or(PlanError::MissingInstallConfig("install config"))?;
    if cfg.platform.aws.is_none() {
        return Err(PlanError::MissingInstallConfig("platform.aws"));
    }
    let cluster_id = cluster_id.ok_or(PlanError::MissingClusterMetadata("cluster id"))?;
    if cluster_id.infra_id.trim().is_empty() {
        return Err(PlanError::MissingClusterMetadata("infraID"));
    }

    let subnet_ids = cfg.subnet_ids();
    if !subnet_ids.is_empty() {
        log::info!(
            "#Start plan() BYO VPC with {} existing subnet(s)",
            subnet_ids.len()
        );
        let groups = gather_subnets(provider, subnet_ids)?;
        return plan_byo_vpc(cfg, &groups);
    }

    log::info!("#Start plan() managed VPC for {}", cluster_id.infra_id);
    let zones_in_region = provider
        .availability_zones()
        .map_err(PlanError::metadata("failed to get availability zones"))?;
    plan_managed_vpc(cfg, cluster_id, &zones_in_region, settings)
}

/// Fetch and classify the listed subnets.
pub fn gather_subnets<P: MetadataProvider + ?Sized>(
    provider: &P,
    ids: &[String],
) -> Result<SubnetGroups> {
    let facts = provider
        .subnets(ids)
        .map_err(PlanError::metadata("describing subnets"))?;
    let route_tables = match common_vpc(&facts)? {
        Some(vpc) => provider
            .route_tables(&vpc)
            .map_err(PlanError::metadata("describing route tables"))?,
        None => Vec::new(),
    };
    let zones = provider
        .zones()
        .map_err(PlanError::metadata("describing availability zones"))?;
    classify_subnets(ids, &facts, &route_tables, &zones)
}

/// Relay existing subnets into the plan without any CIDR arithmetic.
pub fn plan_byo_vpc(cfg: &InstallConfig, groups: &SubnetGroups) -> Result<NetworkPlan> {
    let configured_vpc = cfg
        .platform
        .aws
        .as_ref()
        .and_then(|aws| aws.vpc.as_deref())
        .filter(|vpc| !vpc.is_empty());
    if let Some(configured) = configured_vpc {
        if configured != groups.vpc {
            return Err(PlanError::VpcMismatch {
                configured: configured.to_string(),
                found: groups.vpc.clone(),
            });
        }
    }

    let subnets: Vec<SubnetSpec> = groups
        .iter()
        .map(|subnet| SubnetSpec {
            id: subnet.id.clone(),
            availability_zone: subnet.zone.name.clone(),
            cidr_block: subnet.cidr,
            is_public: subnet.public,
        })
        .collect();
    log::info!(
        "BYO VPC {}: private={} public={} edge={}",
        groups.vpc,
        groups.private.len(),
        groups.public.len(),
        groups.edge.len()
    );

    check_non_overlapping(&subnets)?;
    if let Some(network) = cfg.machine_cidr() {
        check_within_network(&subnets, network.network())?;
    }

    let plan = NetworkPlan {
        vpc: VpcSpec::Existing {
            id: groups.vpc.clone(),
        },
        subnets,
    };
    check_zone_coverage(cfg, &plan)?;
    Ok(plan)
}

/// Every zone declared by a regular pool needs a private subnet, and a public
/// one when the cluster is published externally. Every edge pool zone needs
/// at least one subnet.
fn check_zone_coverage(cfg: &InstallConfig, plan: &NetworkPlan) -> Result<()> {
    let zones = ZoneSet::from_declared_pools(cfg)?;
    let missing = |zone: &str, role: PoolRole, visibility: &'static str| {
        PlanError::MissingZoneCoverage {
            zone: zone.to_string(),
            pool: role.pool_name().to_string(),
            visibility,
        }
    };

    for role in [PoolRole::ControlPlane, PoolRole::Compute] {
        for zone in zones.zones(role) {
            if !plan.has_subnet(&zone, false) {
                return Err(missing(&zone, role, "private"));
            }
            if cfg.is_external() && !plan.has_subnet(&zone, true) {
                return Err(missing(&zone, role, "public"));
            }
        }
    }
    for zone in zones.edge_zones() {
        if !plan.covers_zone(&zone) {
            return Err(missing(&zone, PoolRole::Edge, "edge"));
        }
    }
    Ok(())
}

/// Number of equal blocks the machine network is split into.
///
/// One per regular zone plus one free block, one more for the public
/// super-block when publishing externally, one more for the edge super-block.
pub fn base_block_count(zones: usize, edge_zones: usize, external: bool) -> usize {
    let mut count = zones + 1;
    if external {
        count += 1;
    }
    if edge_zones > 0 {
        count += 1;
    }
    count
}

/// Number of blocks the edge super-block is split into, with one free block.
pub fn edge_block_count(edge_zones: usize, external: bool) -> usize {
    let per_zone = if external { 2 } else { 1 };
    per_zone * edge_zones + 1
}

/// Split `cidr` into `count` blocks, honouring the smallest permitted subnet.
fn split_block(
    stage: PlanStage,
    cidr: Ipv4,
    count: usize,
    settings: &PlannerSettings,
) -> Result<Vec<Ipv4>> {
    let blocks = cidr
        .split_into_subnets(count)
        .map_err(|source| PlanError::InsufficientCidrSpace { stage, source })?;
    if let Some(block) = blocks.first() {
        if block.mask > settings.smallest_subnet_prefix {
            return Err(PlanError::InsufficientCidrSpace {
                stage,
                source: CidrError::InsufficientSpace {
                    cidr,
                    count,
                    prefix: block.mask as u32,
                },
            });
        }
    }
    log::debug!("{stage}: split {cidr} into {count} block(s)");
    Ok(blocks)
}

fn push_subnet(subnets: &mut Vec<SubnetSpec>, infra_id: &str, zone: &str, cidr: Ipv4, public: bool) {
    let id = SubnetSpec::synthesized_id(infra_id, public, zone);
    log::debug!("Subnet {id} {cidr} zone={zone}");
    subnets.push(SubnetSpec {
        id,
        availability_zone: zone.to_string(),
        cidr_block: cidr,
        is_public: public,
    });
}

/// Carve the machine network into the subnets of a managed VPC.
///
/// `zones_in_region` are the regular zones of the region, used when neither
/// the pools nor the platform default name any zone.
pub fn plan_managed_vpc(
    cfg: &InstallConfig,
    cluster_id: &ClusterId,
    zones_in_region: &[String],
    settings: &PlannerSettings,
) -> Result<NetworkPlan> {
    let base = cfg
        .machine_cidr()
        .ok_or(PlanError::MissingInstallConfig("networking.machineNetwork"))?
        .network();
    let infra_id = cluster_id.infra_id.as_str();

    let zone_set = ZoneSet::from_install_config(cfg, zones_in_region)?;
    let zones = zone_set.availability_zones();
    let edge_zones = zone_set.edge_zones();
    if zones.is_empty() {
        return Err(PlanError::NoAvailabilityZones);
    }
    let external = cfg.is_external();

    let num_blocks = base_block_count(zones.len(), edge_zones.len(), external);
    log::info!(
        "Planning {base}: zones={} edge_zones={} external={external} base_blocks={num_blocks}",
        zones.len(),
        edge_zones.len()
    );
    let blocks = split_block(PlanStage::PrivateSubnets, base, num_blocks, settings)?;

    // blocks[zones.len()] is the public super-block, or free space when internal
    let public_blocks = if external {
        split_block(
            PlanStage::PublicSubnets,
            blocks[zones.len()],
            zones.len(),
            settings,
        )?
    } else {
        Vec::new()
    };

    let mut subnets = Vec::new();
    for (i, zone) in zones.iter().enumerate() {
        push_subnet(&mut subnets, infra_id, zone, blocks[i], false);
        if external {
            push_subnet(&mut subnets, infra_id, zone, public_blocks[i], true);
        }
    }

    if !edge_zones.is_empty() {
        let edge_block = blocks[zones.len() + 1];
        let edge_blocks = split_block(
            PlanStage::EdgeSubnets,
            edge_block,
            edge_block_count(edge_zones.len(), external),
            settings,
        )?;
        for (i, zone) in edge_zones.iter().enumerate() {
            push_subnet(&mut subnets, infra_id, zone, edge_blocks[i], false);
            if external {
                let public = edge_blocks[edge_zones.len() + i];
                push_subnet(&mut subnets, infra_id, zone, public, true);
            }
        }
    }

    check_non_overlapping(&subnets)?;
    check_within_network(&subnets, base)?;

    log::info!("Planned {} subnet(s) in {base}", subnets.len());
    Ok(NetworkPlan {
        vpc: VpcSpec::Managed { cidr_block: base },
        subnets,
    })
}
