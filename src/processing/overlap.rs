//! Overlapping subnet CIDR detection.
//!
//! Detects subnets of a plan whose address ranges collide, and subnets that
//! fall outside the network they are supposed to be carved from. User ranges
//! are never corrected, only reported.

use crate::error::{PlanError, Result};
use crate::models::{Ipv4, SubnetSpec};

/// Represents two subnets sharing addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapConflict {
    pub first: SubnetSpec,
    pub second: SubnetSpec,
}

impl From<OverlapConflict> for PlanError {
    fn from(conflict: OverlapConflict) -> Self {
        PlanError::OverlappingSubnets {
            first: conflict.first.id,
            first_cidr: conflict.first.cidr_block,
            second: conflict.second.id,
            second_cidr: conflict.second.cidr_block,
        }
    }
}

/// Find every pair of overlapping subnets.
///
/// Subnets are sorted by CIDR, so each range only needs comparing with the
/// ranges that start before its end. Pairs are reported in address order.
pub fn find_overlapping_subnets(subnets: &[SubnetSpec]) -> Vec<OverlapConflict> {
    let mut sorted: Vec<&SubnetSpec> = subnets.iter().collect();
    sorted.sort_by_key(|s| (s.cidr_block.lo(), s.cidr_block.mask));

    let mut conflicts = Vec::new();
    for (i, first) in sorted.iter().enumerate() {
        for second in sorted.iter().skip(i + 1) {
            if second.cidr_block.lo() > first.cidr_block.hi() {
                break;
            }
            conflicts.push(OverlapConflict {
                first: (*first).clone(),
                second: (*second).clone(),
            });
        }
    }
    conflicts
}

/// Log overlapping subnet conflicts as warnings.
pub fn log_overlapping_subnets(conflicts: &[OverlapConflict]) {
    if conflicts.is_empty() {
        log::debug!("No overlapping subnet CIDRs found.");
        return;
    }

    log::warn!("Found {} overlapping subnet CIDR pair(s):", conflicts.len());
    for conflict in conflicts {
        log::warn!(
            "  - '{}' {} overlaps '{}' {}",
            conflict.first.id,
            conflict.first.cidr_block,
            conflict.second.id,
            conflict.second.cidr_block
        );
    }
}

/// Fail on the first overlapping pair.
pub fn check_non_overlapping(subnets: &[SubnetSpec]) -> Result<()> {
    let conflicts = find_overlapping_subnets(subnets);
    log_overlapping_subnets(&conflicts);
    match conflicts.into_iter().next() {
        Some(conflict) => Err(conflict.into()),
        None => Ok(()),
    }
}

/// Fail on the first subnet not contained in `network`.
pub fn check_within_network(subnets: &[SubnetSpec], network: Ipv4) -> Result<()> {
    match subnets
        .iter()
        .find(|s| !network.contains_cidr(&s.cidr_block))
    {
        Some(outside) => Err(PlanError::SubnetOutsideNetwork {
            subnet: outside.id.clone(),
            cidr: outside.cidr_block,
            network,
        }),
        None => Ok(()),
    }
}
