//! Locating a mount point anywhere in the device forest.

use fsinv_blockdev::Device;

/// Find the node mounted exactly at `mountpoint`.
///
/// This is a depth-first, pre-order walk: each node is checked before its
/// children, and a node's whole subtree is searched before its next
/// sibling. The first match wins; nothing after it is visited.
pub fn find_by_mountpoint<'a>(nodes: &'a [Device], mountpoint: &str) -> Option<&'a Device> {
    nodes.iter().find_map(|node| {
        if node.is_mounted_at(mountpoint) {
            Some(node)
        } else {
            find_by_mountpoint(&node.children, mountpoint)
        }
    })
}
