//! Startup configuration.
//!
//! Values come from command-line flags, then environment variables (both
//! handled by clap), then an optional JSON config file. The dataset path and
//! the cluster address are required.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bulk::DEFAULT_BATCH_SIZE;
use crate::dataset::{DEFAULT_SAMPLE_SIZE, DEFAULT_SEED};
use crate::error::{CinedexError, Result};

/// Environment variable naming the dataset file.
pub const DATASET_ENV: &str = "PATH_TO_DATASET";

/// Environment variable naming the cluster address.
pub const CLUSTER_ENV: &str = "SEARCH_CLUSTER_ADDRESS";

/// Older name for the cluster address variable, read when nothing else sets it.
pub const LEGACY_CLUSTER_ENV: &str = "ELASTIC_SEARCH_SERVER_ADDRESS";

/// Fall back to [`LEGACY_CLUSTER_ENV`], looked up through `lookup`, when no
/// cluster address was given.
pub fn with_legacy_cluster<F>(cluster_address: Option<String>, lookup: F) -> Option<String>
where
    F: FnOnce(&str) -> Option<String>,
{
    cluster_address.or_else(|| {
        let legacy = lookup(LEGACY_CLUSTER_ENV)?;
        debug!("Using cluster address from {LEGACY_CLUSTER_ENV}");
        Some(legacy)
    })
}

/// Contents of a JSON config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub dataset_path: Option<PathBuf>,
    pub cluster_address: Option<String>,
    pub batch_size: Option<usize>,
    pub sample_size: Option<usize>,
    pub seed: Option<u64>,
}

impl ConfigFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            CinedexError::config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            CinedexError::config(format!("invalid config file {}: {e}", path.display()))
        })
    }
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub dataset_path: PathBuf,
    pub cluster_address: String,
    pub batch_size: usize,
    pub sample_size: usize,
    pub seed: u64,
}

impl Config {
    /// Merge values given on the command line (or through the environment)
    /// over those from `file`.
    pub fn resolve(
        dataset_path: Option<PathBuf>,
        cluster_address: Option<String>,
        file: ConfigFile,
    ) -> Result<Self> {
        let dataset_path = dataset_path
            .or(file.dataset_path)
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| {
                CinedexError::config(format!(
                    "dataset path is not set (use --dataset, {DATASET_ENV} or a config file)"
                ))
            })?;
        let cluster_address = cluster_address
            .or(file.cluster_address)
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| {
                CinedexError::config(format!(
                    "cluster address is not set (use --cluster, {CLUSTER_ENV} or a config file)"
                ))
            })?;

        let config = Config {
            dataset_path,
            cluster_address,
            batch_size: file.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            sample_size: file.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE),
            seed: file.seed.unwrap_or(DEFAULT_SEED),
        };
        debug!("Resolved configuration: {config:?}");
        Ok(config)
    }
}
