//! Integration tests for aws-subnet-planner
//!
//! These tests drive the complete workflow from the input files to the plan.

use aws_subnet_planner::config::PlannerSettings;
use aws_subnet_planner::input::{read_cluster_id, read_install_config};
use aws_subnet_planner::metadata::read_metadata_snapshot;
use aws_subnet_planner::models::{SubnetSpec, VpcSpec};
use aws_subnet_planner::output::plan_to_json;
use aws_subnet_planner::{plan, plan_from_files, AppConfig, NetworkPlan, PlanError};

const TEST_DATA: &str = "src/tests/test_data";

fn app(install_config: &str) -> AppConfig {
    AppConfig {
        install_config: format!("{TEST_DATA}/{install_config}"),
        cluster_metadata: format!("{TEST_DATA}/cluster_metadata.json"),
        metadata_snapshot: format!("{TEST_DATA}/aws_metadata_01.json"),
        plan_output: None,
        settings: PlannerSettings::default(),
    }
}

fn row(plan: &NetworkPlan) -> Vec<(String, String, String, bool)> {
    plan.sorted_by_id()
        .subnets
        .into_iter()
        .map(|s: SubnetSpec| {
            (
                s.id,
                s.availability_zone,
                s.cidr_block.to_string(),
                s.is_public,
            )
        })
        .collect()
}

fn expected(rows: &[(&str, &str, &str, bool)]) -> Vec<(String, String, String, bool)> {
    rows.iter()
        .map(|(id, zone, cidr, public)| (id.to_string(), zone.to_string(), cidr.to_string(), *public))
        .collect()
}

#[test]
fn test_managed_vpc_from_files() {
    let plan = plan_from_files(&app("install_config_managed.json")).expect("Failed to plan");

    assert_eq!(plan.vpc.cidr_block().unwrap().to_string(), "10.0.0.0/16");
    assert_eq!(
        row(&plan),
        expected(&[
            ("infra-id-subnet-private-us-east-1a", "us-east-1a", "10.0.0.0/19", false),
            ("infra-id-subnet-private-us-east-1b", "us-east-1b", "10.0.32.0/19", false),
            ("infra-id-subnet-private-us-east-1c", "us-east-1c", "10.0.64.0/19", false),
            ("infra-id-subnet-public-us-east-1a", "us-east-1a", "10.0.96.0/21", true),
            ("infra-id-subnet-public-us-east-1b", "us-east-1b", "10.0.104.0/21", true),
            ("infra-id-subnet-public-us-east-1c", "us-east-1c", "10.0.112.0/21", true),
        ])
    );
}

#[test]
fn test_managed_vpc_with_edge_zone_from_files() {
    let plan = plan_from_files(&app("install_config_edge.json")).expect("Failed to plan");
    let without_edge =
        plan_from_files(&app("install_config_managed.json")).expect("Failed to plan");

    let edge: Vec<&SubnetSpec> = plan
        .subnets
        .iter()
        .filter(|s| s.availability_zone == "us-east-1-nyc-1a")
        .collect();
    assert_eq!(edge.len(), 2);
    assert_eq!(edge[0].cidr_block.to_string(), "10.0.128.0/21");
    assert!(!edge[0].is_public);
    assert_eq!(edge[1].cidr_block.to_string(), "10.0.136.0/21");
    assert!(edge[1].is_public);

    // regular zone blocks are unchanged by the edge zone
    for subnet in &without_edge.subnets {
        assert!(plan.subnets.contains(subnet), "missing {}", subnet.id);
    }
}

#[test]
fn test_byo_vpc_relays_existing_subnets() {
    let plan = plan_from_files(&app("install_config_byo.json")).expect("Failed to plan");

    assert_eq!(
        plan.vpc,
        VpcSpec::Existing {
            id: "vpc-0123".to_string()
        }
    );
    assert_eq!(
        row(&plan),
        expected(&[
            ("subnet-priv-a", "us-east-1a", "10.0.0.0/19", false),
            ("subnet-priv-b", "us-east-1b", "10.0.32.0/19", false),
            ("subnet-priv-c", "us-east-1c", "10.0.64.0/19", false),
            ("subnet-pub-a", "us-east-1a", "10.0.96.0/21", true),
            ("subnet-pub-b", "us-east-1b", "10.0.104.0/21", true),
            ("subnet-pub-c", "us-east-1c", "10.0.112.0/21", true),
        ])
    );
}

#[test]
fn test_byo_vpc_multiple_vpcs() {
    let install_config = read_install_config(format!("{TEST_DATA}/install_config_byo_multi_vpc.json"))
        .expect("Failed to read install config");
    let cluster_id = read_cluster_id(format!("{TEST_DATA}/cluster_metadata.json"))
        .expect("Failed to read cluster metadata");
    let snapshot = read_metadata_snapshot(format!("{TEST_DATA}/aws_metadata_01.json"))
        .expect("Failed to read metadata snapshot");

    let err = plan(
        Some(&install_config),
        Some(&cluster_id),
        &snapshot,
        &PlannerSettings::default(),
    )
    .unwrap_err();
    match err {
        PlanError::MultipleVpcsDetected {
            subnet,
            vpc,
            baseline_vpc,
            ..
        } => {
            assert_eq!(subnet, "subnet-other-vpc");
            assert_eq!(vpc, "vpc-9999");
            assert_eq!(baseline_vpc, "vpc-0123");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_plan_json_is_reproducible() {
    let first = plan_from_files(&app("install_config_edge.json")).expect("Failed to plan");
    let second = plan_from_files(&app("install_config_edge.json")).expect("Failed to plan");
    let first_json = plan_to_json(&first).expect("Failed to render plan");
    assert_eq!(first_json, plan_to_json(&second).expect("Failed to render plan"));

    let value: serde_json::Value = serde_json::from_str(&first_json).unwrap();
    assert_eq!(value["vpc"]["cidrBlock"], "10.0.0.0/16");
    assert_eq!(value["subnets"].as_array().unwrap().len(), 8);
    assert!(value["subnets"][0].get("availabilityZone").is_some());
    assert!(value["subnets"][0].get("isPublic").is_some());
}

#[test]
fn test_missing_input_file() {
    let mut config = app("install_config_managed.json");
    config.metadata_snapshot = format!("{TEST_DATA}/no_such_snapshot.json");
    assert!(plan_from_files(&config).is_err());
}
