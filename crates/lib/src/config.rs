//! Optional on-disk configuration.

use std::{fs::File, io::BufReader};

use anyhow::{Context, Result};
use camino::Utf8Path;
use fn_error_context::context;
use fsinv_mount::MountTableSource;
use serde::{Deserialize, Serialize};

use crate::render::OutputFormat;

/// The environment variable that can be used to point at a YAML config file.
pub const CONFIG_VAR: &str = "FSINV_CONFIG";

/// Defaults that apply when the corresponding CLI flag is not given.
#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct InventoryConfig {
    /// Output format.
    pub format: Option<OutputFormat>,
    /// Tool used to read the mount table.
    pub mount_table: Option<MountTableSource>,
}

impl InventoryConfig {
    /// Load the file named by [`CONFIG_VAR`], if set.
    #[context("Loading config")]
    pub fn load() -> Result<Option<Self>> {
        let Some(config) = std::env::var_os(CONFIG_VAR) else {
            return Ok(None);
        };
        let path = Utf8Path::from_path(std::path::Path::new(&config))
            .ok_or_else(|| anyhow::anyhow!("{CONFIG_VAR} is not valid UTF-8"))?;
        Self::from_path(path).map(Some)
    }

    /// Load config from `path`.
    pub fn from_path(path: &Utf8Path) -> Result<Self> {
        let f = File::open(path)
            .with_context(|| format!("Opening {path}"))
            .map(BufReader::new)?;
        let r = serde_yaml::from_reader(f).with_context(|| format!("Parsing config from {path}"))?;
        tracing::debug!("Loaded config from {path}");
        Ok(r)
    }
}
