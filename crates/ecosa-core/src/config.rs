use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ingest::IngestPolicy;
use crate::kind::{LayoutKind, MetricKind};

/// File name looked up in the project root by [`load_project_config`].
pub const CONFIG_FILE_NAME: &str = "ecosa.toml";

/// Seed handed to seedable layouts unless configured otherwise.
pub const DEFAULT_LAYOUT_SEED: u64 = 1997;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcosaConfig {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub metric: MetricConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default)]
    pub policy: IngestPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub kind: LayoutKind,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_spring_iterations")]
    pub spring_iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            kind: LayoutKind::default(),
            seed: default_seed(),
            spring_iterations: default_spring_iterations(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricConfig {
    #[serde(default)]
    pub default: MetricKind,
}

/// Load a config file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file exists but cannot be read and
/// [`Error::Config`] if it is not valid TOML for [`EcosaConfig`].
pub fn load_config(path: &Path) -> Result<EcosaConfig> {
    if !path.exists() {
        return Ok(EcosaConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<EcosaConfig>(&content).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `ecosa.toml` from `project_root`, falling back to defaults.
///
/// # Errors
///
/// As [`load_config`].
pub fn load_project_config(project_root: &Path) -> Result<EcosaConfig> {
    load_config(&project_root.join(CONFIG_FILE_NAME))
}

const fn default_seed() -> u64 {
    DEFAULT_LAYOUT_SEED
}

const fn default_spring_iterations() -> usize {
    50
}
