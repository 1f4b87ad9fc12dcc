//! Joining the mount table with the device forest into one record per mount.

use std::fmt::Display;

use fsinv_blockdev::Device;
use fsinv_mount::MountEntry;
use serde::Serialize;

use crate::boot::is_boot_volume;
use crate::resolve::{resolve, ResolvedDevice};

/// Role of a disk on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiskType {
    /// The disk backing `/`.
    Os,
    /// Everything else.
    Data,
}

impl DiskType {
    /// Classify from the boot volume flag.
    pub fn from_boot_volume(is_boot_volume: bool) -> Self {
        if is_boot_volume {
            Self::Os
        } else {
            Self::Data
        }
    }
}

impl Display for DiskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiskType::Os => f.write_str("OS Disk"),
            DiskType::Data => f.write_str("Data Disks"),
        }
    }
}

/// A mounted filesystem together with the disk it lives on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    /// Source column from the mount table.
    pub source: String,
    /// Name of the root-level device.
    pub name: String,
    /// Path of the root-level device.
    pub path: Option<String>,
    /// Serial of the root-level device.
    pub serial: Option<String>,
    /// The mount point.
    pub mount_point: String,
    /// Path of the node actually mounted there.
    pub disk_path: Option<String>,
    /// Filesystem UUID of the node actually mounted there.
    pub uuid: Option<String>,
    /// Whether the root-level device also backs `/`.
    pub is_boot_volume: bool,
    /// Derived from `is_boot_volume`.
    pub disk_type: DiskType,
}

impl ReportRecord {
    fn new(source: &str, resolved: ResolvedDevice, is_boot_volume: bool) -> Self {
        let ResolvedDevice { top_level, matched } = resolved;
        Self {
            source: source.to_string(),
            name: top_level.name,
            path: top_level.path,
            serial: top_level.serial,
            mount_point: matched.mount_point,
            disk_path: matched.path,
            uuid: matched.uuid,
            is_boot_volume,
            disk_type: DiskType::from_boot_volume(is_boot_volume),
        }
    }
}

/// Report output for one mount table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ReportEntry {
    /// A block device backs this mount.
    Resolved(ReportRecord),
    /// Nothing in the device forest is mounted here (e.g. tmpfs, network filesystems).
    #[serde(rename_all = "camelCase")]
    NotFound {
        /// Source column from the mount table.
        source: String,
        /// The mount point.
        mount_point: String,
    },
}

impl ReportEntry {
    /// The mount point this entry describes.
    pub fn mount_point(&self) -> &str {
        match self {
            ReportEntry::Resolved(r) => &r.mount_point,
            ReportEntry::NotFound { mount_point, .. } => mount_point,
        }
    }
}

/// Build one [`ReportEntry`] per mount, in mount table order.
///
/// A mount that doesn't resolve yields [`ReportEntry::NotFound`]; it never
/// affects the other entries.
pub fn assemble_report(mounts: &[MountEntry], forest: &[Device]) -> Vec<ReportEntry> {
    mounts
        .iter()
        .map(|mount| match resolve(forest, &mount.target) {
            Some(resolved) => {
                let boot = is_boot_volume(
                    &resolved.top_level.name,
                    resolved.top_level.serial.as_deref(),
                    forest,
                );
                ReportEntry::Resolved(ReportRecord::new(&mount.source, resolved, boot))
            }
            None => {
                tracing::debug!("No block device found for mount point: {}", mount.target);
                ReportEntry::NotFound {
                    source: mount.source.clone(),
                    mount_point: mount.target.clone(),
                }
            }
        })
        .collect()
}
