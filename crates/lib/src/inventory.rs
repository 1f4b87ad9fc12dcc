//! Gathering the mount table and the device forest.
//!
//! Both come from external tools (or captured copies of their output).
//! A tool that is missing, fails, or prints something we can't parse
//! results in an empty list and a warning; the report is then simply
//! shorter.

use anyhow::{Context, Result};
use camino::Utf8Path;
use fsinv_blockdev::Device;
use fsinv_mount::{MountEntry, MountTableSource};

/// Where to read inputs from.
#[derive(Debug, Default, Clone, Copy)]
pub struct InventorySources<'a> {
    /// Tool (or captured output format) for the mount table.
    pub mount_table: MountTableSource,
    /// Captured `lsblk --json` output to use instead of running lsblk.
    pub lsblk_json: Option<&'a Utf8Path>,
    /// Captured mount table to use instead of running the tool.
    pub mounts_file: Option<&'a Utf8Path>,
}

/// A point-in-time snapshot of the host's storage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Inventory {
    /// Active mounts, in mount table order.
    pub mounts: Vec<MountEntry>,
    /// Root-level block devices.
    pub forest: Vec<Device>,
}

fn or_empty<T>(what: &str, r: Result<Vec<T>>) -> Vec<T> {
    match r {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("Failed to read {what}: {e:#}");
            Vec::new()
        }
    }
}

fn read_captured(path: &Utf8Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Reading {path}"))
}

impl Inventory {
    /// Collect the mount table and device forest.
    ///
    /// Only failing to read a captured file named in `sources` is an error;
    /// problems with the tools or their output are logged and yield empty lists.
    pub fn collect(sources: &InventorySources<'_>) -> Result<Self> {
        let mounts = match sources.mounts_file {
            Some(path) => {
                let buf = read_captured(path)?;
                fsinv_mount::parse_mounts(sources.mount_table, &buf)
            }
            None => fsinv_mount::list_mounts(sources.mount_table),
        };
        let forest = match sources.lsblk_json {
            Some(path) => {
                let buf = read_captured(path)?;
                fsinv_blockdev::parse_lsblk_json(&buf)
            }
            None => fsinv_blockdev::list_forest(),
        };
        Ok(Self {
            mounts: or_empty("mount table", mounts),
            forest: or_empty("block devices", forest),
        })
    }

    /// Keep only mounts whose target is one of `mountpoints`; an empty
    /// filter keeps everything.
    pub fn retain_mountpoints(&mut self, mountpoints: &[String]) {
        if mountpoints.is_empty() {
            return;
        }
        self.mounts
            .retain(|m| mountpoints.iter().any(|mp| mp == &m.target));
    }
}
