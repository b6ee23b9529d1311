//! Output formatting for a network plan.
//!
//! - [`json`] - JSON document consumed by the manifest generators
//! - [`terminal`] - Terminal table with colors

mod json;
mod terminal;

pub use json::{plan_to_json, write_plan};
pub use terminal::{format_field, format_subnet_row, plan_print};
