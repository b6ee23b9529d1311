//! Loading of the planner's JSON inputs from disk.

use crate::models::{ClusterId, InstallConfig};
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `json_path` points at the offending field, e.g. `compute[0].platform`.
    #[error("error parsing {path}: path={json_path} error={source}")]
    Parse {
        path: String,
        json_path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and deserialize a JSON document, reporting the failing field path.
pub fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, LoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    log::debug!("Read {} bytes from {display}", json.len());

    let mut deserializer = serde_json::Deserializer::from_str(&json);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| LoadError::Parse {
        path: display,
        json_path: e.path().to_string(),
        source: e.into_inner(),
    })
}

pub fn read_install_config(path: impl AsRef<Path>) -> Result<InstallConfig, LoadError> {
    let cfg: InstallConfig = read_json_file(path)?;
    log::info!(
        "Loaded install config: publish={:?} byo_subnets={} compute_pools={}",
        cfg.publish,
        cfg.subnet_ids().len(),
        cfg.compute.len()
    );
    Ok(cfg)
}

pub fn read_cluster_id(path: impl AsRef<Path>) -> Result<ClusterId, LoadError> {
    read_json_file(path)
}
