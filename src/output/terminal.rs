//! Terminal output of a plan.

use crate::models::{NetworkPlan, SubnetSpec};
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// One line of the plan table, without colours.
pub fn format_subnet_row(subnet: &SubnetSpec) -> String {
    let visibility = if subnet.is_public { "public" } else { "private" };
    format!(
        "{cidr},{zone},{visibility},{id}",
        cidr = format_field(subnet.cidr_block, 18),
        zone = format_field(&subnet.availability_zone, 20),
        visibility = format_field(visibility, 9),
        id = format_field(&subnet.id, 40),
    )
}

/// Print the plan as a table sorted by CIDR to stdout.
pub fn plan_print(plan: &NetworkPlan) {
    log::info!("#Start plan_print() {} subnet(s)", plan.subnets.len());
    println!("# {}", plan.vpc.to_string().bold());
    println!(
        r#"       "cidr_block",    "availability_zone", "public",                                     "id""#
    );

    let mut subnets: Vec<&SubnetSpec> = plan.subnets.iter().collect();
    subnets.sort_by_key(|s| s.cidr_block);
    for subnet in subnets {
        let row = format_subnet_row(subnet);
        if subnet.is_public {
            println!("{}", row.yellow());
        } else {
            println!("{}", row.green());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_subnet_row() {
        let subnet = SubnetSpec {
            id: "infra-subnet-public-a".to_string(),
            availability_zone: "a".to_string(),
            cidr_block: Ipv4::new("10.0.96.0/21").unwrap(),
            is_public: true,
        };
        let row = format_subnet_row(&subnet);
        assert!(row.starts_with("    \"10.0.96.0/21\","));
        assert!(row.contains("\"public\""));
        assert!(row.ends_with("\"infra-subnet-public-a\""));
    }
}
