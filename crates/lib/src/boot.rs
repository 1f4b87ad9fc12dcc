//! Telling the boot disk apart from data disks.

use fsinv_blockdev::Device;

use crate::resolve::resolve;

/// The mount point whose backing device counts as the boot volume.
pub const ROOT_MOUNTPOINT: &str = "/";

/// Whether the root-level device `name` with `serial` is the one backing `/`.
///
/// Kernel names alone are not unique enough across hosts and hotplug, so
/// both the name and the serial have to match. An absent serial matches
/// only an absent serial. If `/` cannot be resolved, nothing is the boot
/// volume.
pub fn is_boot_volume(name: &str, serial: Option<&str>, forest: &[Device]) -> bool {
    let Some(root) = resolve(forest, ROOT_MOUNTPOINT) else {
        tracing::debug!("No device found for {ROOT_MOUNTPOINT}");
        return false;
    };
    root.top_level.name == name && root.top_level.serial.as_deref() == serial
}
