//! Block device enumeration.
//!
//! The device tree comes from `lsblk --json`: a forest of physical
//! devices, each owning its partitions, which may in turn own logical
//! volumes, and so on.

use std::process::Command;

use anyhow::{Context, Result};
use fn_error_context::context;
use fsinv_utils::CommandRunExt;
use serde::{Deserialize, Serialize};

/// The `lsblk` columns we consume; these map onto the fields of [`Device`].
const LSBLK_COLUMNS: &str = "NAME,PATH,MOUNTPOINT,UUID,SERIAL";

/// The top-level document emitted by `lsblk --json`.
#[derive(Debug, Deserialize)]
pub struct DevicesOutput {
    /// Root-level devices.
    pub blockdevices: Vec<Device>,
}

/// One block device node, owning its children.
///
/// Optional columns are kept as `None` when lsblk reports them as `null`
/// (or omits them); they are never replaced by an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Device {
    /// Kernel device name, e.g. `sda1`.
    pub name: String,
    /// Device node path; not present in output from older lsblk. It is
    /// not derived from `name`, since e.g. device-mapper nodes live under
    /// `/dev/mapper`.
    pub path: Option<String>,
    /// Where this device is mounted, if anywhere.
    pub mountpoint: Option<String>,
    /// Filesystem UUID.
    pub uuid: Option<String>,
    /// Hardware serial; usually only set on whole disks.
    pub serial: Option<String>,
    /// Partitions, logical volumes and other holders.
    #[serde(default)]
    pub children: Vec<Device>,
}

impl Device {
    /// Whether this node (not a descendant) is mounted exactly at `mountpoint`.
    pub fn is_mounted_at(&self, mountpoint: &str) -> bool {
        self.mountpoint.as_deref() == Some(mountpoint)
    }
}

/// Parse captured `lsblk --json` output into the root-level forest.
#[context("Parsing lsblk output")]
pub fn parse_lsblk_json(buf: &str) -> Result<Vec<Device>> {
    let devs: DevicesOutput = serde_json::from_str(buf)?;
    Ok(devs.blockdevices)
}

/// Run `lsblk` and return the root-level device forest.
#[context("Listing block devices")]
pub fn list_forest() -> Result<Vec<Device>> {
    let devs: DevicesOutput = Command::new("lsblk")
        .args(["--json", "--output", LSBLK_COLUMNS])
        .run_and_parse_json()
        .context("Invoking lsblk")?;
    tracing::debug!("lsblk reported {} root devices", devs.blockdevices.len());
    Ok(devs.blockdevices)
}
