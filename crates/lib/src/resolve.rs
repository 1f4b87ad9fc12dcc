//! Correlating a mount point with the physical device that backs it.
//!
//! Serial numbers are generally only reported for whole disks, so when a
//! mount lives on a partition or a logical volume several layers down we
//! still want the identity of the disk at the root of that subtree.

use fsinv_blockdev::Device;
use serde::Serialize;

use crate::search::find_by_mountpoint;

/// Identity of a root-level device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIdentity {
    /// Kernel name, e.g. `nvme0n1`.
    pub name: String,
    /// Device node path, if lsblk reported one.
    pub path: Option<String>,
    /// Hardware serial, if the device reports one.
    pub serial: Option<String>,
}

impl From<&Device> for DeviceIdentity {
    fn from(dev: &Device) -> Self {
        Self {
            name: dev.name.clone(),
            path: dev.path.clone(),
            serial: dev.serial.clone(),
        }
    }
}

/// The node that literally carries the requested mount point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedNode {
    /// The mount point; always equal to the one that was looked up.
    pub mount_point: String,
    /// Device node path of the matched node, if lsblk reported one.
    pub path: Option<String>,
    /// Filesystem UUID of the matched node.
    pub uuid: Option<String>,
}

/// The result of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDevice {
    /// The forest root under which the match was found.
    pub top_level: DeviceIdentity,
    /// The matched node; may be `top_level` itself.
    pub matched: MatchedNode,
}

/// Find which root-level device backs `mountpoint`.
///
/// Roots are tried in order; for each, the root itself and then its
/// descendants are searched. Returns `None` if nothing in the forest is
/// mounted there.
pub fn resolve(forest: &[Device], mountpoint: &str) -> Option<ResolvedDevice> {
    forest.iter().find_map(|root| {
        let matched = find_by_mountpoint(std::slice::from_ref(root), mountpoint)?;
        tracing::trace!("{mountpoint} is on {} under {}", matched.name, root.name);
        Some(ResolvedDevice {
            top_level: root.into(),
            matched: MatchedNode {
                mount_point: mountpoint.to_string(),
                path: matched.path.clone(),
                uuid: matched.uuid.clone(),
            },
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tests::dev;

    fn disk(name: &str, serial: &str, mountpoint: Option<&str>, children: Vec<Device>) -> Device {
        Device {
            serial: Some(serial.to_string()),
            uuid: None,
            ..dev(name, mountpoint, children)
        }
    }

    #[test]
    fn test_resolve_partition() {
        let forest = [disk(
            "sda",
            "S1",
            None,
            vec![Device {
                uuid: Some("U1".into()),
                ..dev("sda1", Some("/"), vec![])
            }],
        )];
        let r = resolve(&forest, "/").unwrap();
        similar_asserts::assert_eq!(
            r,
            ResolvedDevice {
                top_level: DeviceIdentity {
                    name: "sda".into(),
                    path: Some("/dev/sda".into()),
                    serial: Some("S1".into()),
                },
                matched: MatchedNode {
                    mount_point: "/".into(),
                    path: Some("/dev/sda1".into()),
                    uuid: Some("U1".into()),
                },
            }
        );
    }

    #[test]
    fn test_resolve_root_itself() {
        let forest = [
            disk("sda", "S1", Some("/"), vec![]),
            Device {
                uuid: Some("U2".into()),
                ..disk("sdb", "S2", Some("/mnt/data"), vec![])
            },
        ];
        for root in &forest {
            let mp = root.mountpoint.as_deref().unwrap();
            let r = resolve(&forest, mp).unwrap();
            assert_eq!(r.top_level, DeviceIdentity::from(root));
            assert_eq!(r.matched.path, root.path);
            assert_eq!(r.matched.uuid, root.uuid);
        }
    }

    #[test]
    fn test_resolve_nested_takes_root_serial() {
        // The intermediate partition has a serial of its own, which must not
        // leak into the result.
        let lv = dev("vg0-home", Some("/home"), vec![]);
        let part = Device {
            serial: Some("PART-SERIAL".into()),
            ..dev("sda3", None, vec![lv])
        };
        let forest = [
            disk("nvme0n1", "N1", None, vec![dev("nvme0n1p1", Some("/"), vec![])]),
            disk("sda", "S1", None, vec![part]),
        ];
        let r = resolve(&forest, "/home").unwrap();
        assert_eq!(r.top_level.name, "sda");
        assert_eq!(r.top_level.serial.as_deref(), Some("S1"));
        assert_eq!(r.matched.path.as_deref(), Some("/dev/vg0-home"));
        assert_eq!(r.matched.uuid.as_deref(), Some("uuid-vg0-home"));
    }

    #[test]
    fn test_resolve_missing() {
        assert!(resolve(&[], "/").is_none());
        let forest = [disk("sda", "S1", None, vec![dev("sda1", Some("/"), vec![])])];
        assert!(resolve(&forest, "/data").is_none());
        assert!(resolve(&forest, "").is_none());
    }

    #[test]
    fn test_resolve_absent_path() {
        // A device-mapper node without a PATH column; its node is
        // /dev/mapper/vg0-root, which can't be guessed from the name.
        let lv = Device {
            path: None,
            ..dev("vg0-root", Some("/"), vec![])
        };
        let forest = [Device {
            path: None,
            ..disk("nvme0n1", "N1", None, vec![dev("nvme0n1p3", None, vec![lv])])
        }];
        let r = resolve(&forest, "/").unwrap();
        assert_eq!(r.top_level.name, "nvme0n1");
        assert_eq!(r.top_level.path, None);
        assert_eq!(r.matched.path, None);
        assert_eq!(r.matched.uuid.as_deref(), Some("uuid-vg0-root"));
    }
}
