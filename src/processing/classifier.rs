//! Subnet classification from route table topology.
//!
//! The EC2 API has no "is public" attribute on a subnet. A subnet is public
//! when the route table it uses sends traffic to an internet gateway.

use crate::error::{PlanError, Result};
use crate::models::{RouteTable, Subnet, SubnetFacts, Zone};
use std::collections::{BTreeMap, HashMap};

/// Target prefix of internet gateway routes. Virtual private gateways (`vgw-`),
/// peering connections (`pcx-`) and the `local` route do not make a subnet public.
pub const INTERNET_GATEWAY_PREFIX: &str = "igw";

/// How the route table of a subnet was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTableSource {
    /// The table is explicitly associated with the subnet.
    Explicit,
    /// No explicit association, the VPC's main table applies implicitly.
    Main,
}

/// Visibility of a subnet and the route table it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub public: bool,
    pub source: RouteTableSource,
}

/// Existing subnets grouped by role, keyed by subnet ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubnetGroups {
    pub vpc: String,
    pub private: BTreeMap<String, Subnet>,
    pub public: BTreeMap<String, Subnet>,
    pub edge: BTreeMap<String, Subnet>,
}

impl SubnetGroups {
    /// Private, then public, then edge subnets.
    pub fn iter(&self) -> impl Iterator<Item = &Subnet> {
        self.private
            .values()
            .chain(self.public.values())
            .chain(self.edge.values())
    }

    pub fn len(&self) -> usize {
        self.private.len() + self.public.len() + self.edge.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolve the route table used by `subnet_id`.
///
/// The explicitly associated table wins; otherwise the VPC's main table.
pub fn resolve_route_table<'a>(
    route_tables: &'a [RouteTable],
    subnet_id: &str,
) -> Result<(&'a RouteTable, RouteTableSource)> {
    if let Some(table) = route_tables
        .iter()
        .find(|t| t.is_associated_with(subnet_id))
    {
        return Ok((table, RouteTableSource::Explicit));
    }

    match route_tables.iter().find(|t| t.is_main()) {
        Some(table) => {
            log::debug!(
                "Assuming implicit use of main routing table {} for {}",
                table.route_table_id,
                subnet_id
            );
            Ok((table, RouteTableSource::Main))
        }
        None => Err(PlanError::RoutingTableNotFound(subnet_id.to_string())),
    }
}

/// Classify `subnet_id` as public or private from its resolved route table.
pub fn classify(subnet_id: &str, route_tables: &[RouteTable]) -> Result<Classification> {
    let (table, source) = resolve_route_table(route_tables, subnet_id)?;
    let public = table.routes.iter().any(|route| {
        route
            .gateway_id
            .as_deref()
            .is_some_and(|gw| gw.starts_with(INTERNET_GATEWAY_PREFIX))
    });
    if !public {
        for pcx in peering_targets(table) {
            log::debug!(
                "Route table {} of {} routes to peering {}, not an internet gateway",
                table.route_table_id,
                subnet_id,
                pcx
            );
        }
    }
    Ok(Classification { public, source })
}

/// Peering connections targeted by the routes of `table`.
pub fn peering_targets(table: &RouteTable) -> impl Iterator<Item = &str> {
    table
        .routes
        .iter()
        .filter_map(|route| route.vpc_peering_connection_id.as_deref())
}

/// True when the route table used by `subnet_id` reaches an internet gateway.
pub fn is_subnet_public(route_tables: &[RouteTable], subnet_id: &str) -> Result<bool> {
    classify(subnet_id, route_tables).map(|c| c.public)
}

/// The VPC shared by all subnets, the first-seen subnet being the baseline.
pub fn common_vpc(facts: &[SubnetFacts]) -> Result<Option<String>> {
    let mut baseline: Option<&SubnetFacts> = None;
    for subnet in facts {
        match baseline {
            None => baseline = Some(subnet),
            Some(first) if first.vpc_id != subnet.vpc_id => {
                return Err(PlanError::MultipleVpcsDetected {
                    subnet: subnet.id.clone(),
                    vpc: subnet.vpc_id.clone(),
                    baseline_subnet: first.id.clone(),
                    baseline_vpc: first.vpc_id.clone(),
                })
            }
            Some(_) => {}
        }
    }
    Ok(baseline.map(|s| s.vpc_id.clone()))
}

/// Classify the requested subnets and group them into private, public and edge.
pub fn classify_subnets(
    ids: &[String],
    facts: &[SubnetFacts],
    route_tables: &[RouteTable],
    zones: &[Zone],
) -> Result<SubnetGroups> {
    let vpc = common_vpc(facts)?.unwrap_or_default();
    let metas: HashMap<&str, &SubnetFacts> = facts.iter().map(|s| (s.id.as_str(), s)).collect();
    let zones: HashMap<&str, &Zone> = zones.iter().map(|z| (z.name.as_str(), z)).collect();

    let mut groups = SubnetGroups {
        vpc,
        ..Default::default()
    };

    for id in ids {
        let meta = metas
            .get(id.as_str())
            .ok_or_else(|| PlanError::SubnetNotFound(id.clone()))?;
        let zone = zones
            .get(meta.availability_zone.as_str())
            .ok_or_else(|| PlanError::UnknownZone {
                subnet: id.clone(),
                zone: meta.availability_zone.clone(),
            })?;
        let public = is_subnet_public(route_tables, id)?;

        let subnet = Subnet {
            id: id.clone(),
            vpc_id: meta.vpc_id.clone(),
            cidr: meta.cidr_block,
            zone: (*zone).clone(),
            public,
        };
        log::debug!(
            "Classified subnet {} zone={} kind={} public={}",
            subnet.id,
            subnet.zone.name,
            subnet.zone.kind,
            subnet.public
        );

        let group = if subnet.zone.is_edge() {
            &mut groups.edge
        } else if public {
            &mut groups.public
        } else {
            &mut groups.private
        };
        group.insert(id.clone(), subnet);
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ipv4, Route, RouteTableAssociation, ZoneKind};

    fn route(gateway: &str) -> Route {
        Route {
            destination_cidr_block: Some("0.0.0.0/0".to_string()),
            gateway_id: Some(gateway.to_string()),
            ..Default::default()
        }
    }

    fn table(id: &str, subnets: &[&str], main: bool, routes: Vec<Route>) -> RouteTable {
        let mut associations: Vec<RouteTableAssociation> = subnets
            .iter()
            .map(|s| RouteTableAssociation {
                subnet_id: Some(s.to_string()),
                main: false,
            })
            .collect();
        if main {
            associations.push(RouteTableAssociation {
                subnet_id: None,
                main: true,
            });
        }
        RouteTable {
            route_table_id: id.to_string(),
            vpc_id: Some("vpc-1".to_string()),
            associations,
            routes,
        }
    }

    fn facts(id: &str, vpc: &str, cidr: &str, zone: &str) -> SubnetFacts {
        SubnetFacts {
            id: id.to_string(),
            vpc_id: vpc.to_string(),
            cidr_block: Ipv4::new(cidr).unwrap(),
            availability_zone: zone.to_string(),
        }
    }

    fn zone(name: &str, kind: ZoneKind) -> Zone {
        Zone {
            name: name.to_string(),
            kind,
            group: "us-east-1".to_string(),
        }
    }

    fn fixture_tables() -> Vec<RouteTable> {
        vec![
            table("rtb-igw", &["subnet-igw"], false, vec![route("local"), route("igw-0abc")]),
            table("rtb-pcx", &["subnet-pcx"], false, vec![route("local"), route("pcx-0abc")]),
            table("rtb-vgw", &["subnet-vgw"], false, vec![route("vgw-0abc")]),
            table("rtb-main", &[], true, vec![route("local")]),
        ]
    }

    #[test]
    fn test_internet_gateway_route_is_public() {
        let c = classify("subnet-igw", &fixture_tables()).unwrap();
        assert_eq!(
            c,
            Classification {
                public: true,
                source: RouteTableSource::Explicit
            }
        );
    }

    #[test]
    fn test_peering_and_virtual_gateway_are_private() {
        let tables = fixture_tables();
        assert!(!is_subnet_public(&tables, "subnet-pcx").unwrap());
        assert!(!is_subnet_public(&tables, "subnet-vgw").unwrap());
    }

    #[test]
    fn test_peering_targets() {
        let mut peering = route("local");
        peering.gateway_id = None;
        peering.vpc_peering_connection_id = Some("pcx-0abc".to_string());
        let t = table("rtb-peer", &["subnet-peer"], false, vec![route("local"), peering]);
        assert_eq!(peering_targets(&t).collect::<Vec<_>>(), vec!["pcx-0abc"]);
        assert!(!is_subnet_public(&[t], "subnet-peer").unwrap());
    }

    #[test]
    fn test_falls_back_to_main_table() {
        let c = classify("subnet-unassociated", &fixture_tables()).unwrap();
        assert_eq!(
            c,
            Classification {
                public: false,
                source: RouteTableSource::Main
            }
        );

        // a public main table makes unassociated subnets public
        let tables = vec![table("rtb-main", &[], true, vec![route("igw-1")])];
        assert!(is_subnet_public(&tables, "subnet-x").unwrap());
    }

    #[test]
    fn test_explicit_association_wins_over_main() {
        let tables = vec![
            table("rtb-main", &[], true, vec![route("igw-1")]),
            table("rtb-private", &["subnet-x"], false, vec![route("local")]),
        ];
        let (resolved, source) = resolve_route_table(&tables, "subnet-x").unwrap();
        assert_eq!(resolved.route_table_id, "rtb-private");
        assert_eq!(source, RouteTableSource::Explicit);
    }

    #[test]
    fn test_no_route_table() {
        let tables = vec![table("rtb-other", &["subnet-y"], false, vec![])];
        let err = classify("subnet-x", &tables).unwrap_err();
        assert!(matches!(err, PlanError::RoutingTableNotFound(id) if id == "subnet-x"));
    }

    #[test]
    fn test_classify_subnets_groups() {
        let tables = vec![
            table("rtb-public", &["subnet-pub", "subnet-edge"], false, vec![route("igw-1")]),
            table("rtb-main", &[], true, vec![route("local")]),
        ];
        let facts = vec![
            facts("subnet-priv", "vpc-1", "10.0.0.0/19", "a"),
            facts("subnet-pub", "vpc-1", "10.0.96.0/21", "a"),
            facts("subnet-edge", "vpc-1", "10.0.128.0/21", "a-nyc-1a"),
        ];
        let zones = vec![zone("a", ZoneKind::Regular), zone("a-nyc-1a", ZoneKind::Edge)];
        let ids: Vec<String> = facts.iter().map(|f| f.id.clone()).collect();

        let groups = classify_subnets(&ids, &facts, &tables, &zones).unwrap();
        assert_eq!(groups.vpc, "vpc-1");
        assert_eq!(groups.len(), 3);
        assert!(groups.private.contains_key("subnet-priv"));
        assert!(groups.public.contains_key("subnet-pub"));
        assert!(groups.edge["subnet-edge"].public);
    }

    #[test]
    fn test_classify_subnets_errors() {
        let tables = vec![table("rtb-main", &[], true, vec![])];
        let zones = vec![zone("a", ZoneKind::Regular)];

        let mixed = vec![
            facts("subnet-1", "vpc-1", "10.0.0.0/24", "a"),
            facts("subnet-2", "vpc-2", "10.0.1.0/24", "a"),
        ];
        let ids = vec!["subnet-1".to_string(), "subnet-2".to_string()];
        let err = classify_subnets(&ids, &mixed, &tables, &zones).unwrap_err();
        assert!(matches!(
            err,
            PlanError::MultipleVpcsDetected { ref baseline_vpc, ref vpc, .. }
                if baseline_vpc == "vpc-1" && vpc == "vpc-2"
        ));

        let one = vec![facts("subnet-1", "vpc-1", "10.0.0.0/24", "a")];
        let err = classify_subnets(&ids, &one, &tables, &zones).unwrap_err();
        assert!(matches!(err, PlanError::SubnetNotFound(id) if id == "subnet-2"));

        let unknown_zone = vec![facts("subnet-1", "vpc-1", "10.0.0.0/24", "zz")];
        let err = classify_subnets(&ids[..1], &unknown_zone, &tables, &zones).unwrap_err();
        assert!(matches!(err, PlanError::UnknownZone { .. }));
    }
}
