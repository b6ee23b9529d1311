//! Cloud metadata collaborator.
//!
//! - [`provider`] - the [`MetadataProvider`] seam used by the planner
//! - [`snapshot`] - a provider backed by a JSON snapshot of the region

mod provider;
mod snapshot;

pub use provider::{MetadataError, MetadataProvider};
pub use snapshot::{read_metadata_snapshot, MetadataSnapshot};
