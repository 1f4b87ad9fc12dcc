//! The mount table: which source is mounted where.
//!
//! Entries are read either from `df` (the default) or from `findmnt`.

use std::process::Command;

use anyhow::{Context, Result};
use fn_error_context::context;
use fsinv_utils::CommandRunExt;
use serde::{Deserialize, Serialize};

/// One active mount.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MountEntry {
    /// The mounted device or other source string, e.g. `/dev/sda1` or `tmpfs`.
    pub source: String,
    /// The mount point.
    pub target: String,
}

impl MountEntry {
    /// Create a new entry.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// The tool used to read the mount table.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MountTableSource {
    /// `df --output=source,target`
    #[default]
    Df,
    /// `findmnt --json --list`
    Findmnt,
}

/// The document emitted by `findmnt --json --list`.
#[derive(Debug, Deserialize)]
pub struct Findmnt {
    /// Flat list of mounts.
    pub filesystems: Vec<MountEntry>,
}

/// Parse captured `df --output=source,target` output.
///
/// The first line is the column header. The target is the rest of the
/// line after the source, so mount points containing spaces are kept whole.
pub fn parse_df_output(buf: &str) -> Vec<MountEntry> {
    buf.lines()
        .skip(1)
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let Some((source, target)) = line.split_once(char::is_whitespace) else {
                tracing::warn!("Skipping malformed df line: {line}");
                return None;
            };
            Some(MountEntry::new(source, target.trim()))
        })
        .collect()
}

/// Parse captured `findmnt --json --list` output.
#[context("Parsing findmnt output")]
pub fn parse_findmnt_json(buf: &str) -> Result<Vec<MountEntry>> {
    let o: Findmnt = serde_json::from_str(buf)?;
    Ok(o.filesystems)
}

fn run_df() -> Result<Vec<MountEntry>> {
    let buf = Command::new("df")
        .arg("--output=source,target")
        .run_get_string()?;
    Ok(parse_df_output(&buf))
}

fn run_findmnt() -> Result<Vec<MountEntry>> {
    let o: Findmnt = Command::new("findmnt")
        .args(["--json", "--list", "--output", "SOURCE,TARGET"])
        .run_and_parse_json()?;
    Ok(o.filesystems)
}

/// Read the live mount table using the given tool.
#[context("Listing mounts via {source:?}")]
pub fn list_mounts(source: MountTableSource) -> Result<Vec<MountEntry>> {
    let mounts = match source {
        MountTableSource::Df => run_df(),
        MountTableSource::Findmnt => run_findmnt(),
    }
    .context("Reading mount table")?;
    tracing::debug!("Found {} mounts", mounts.len());
    Ok(mounts)
}

/// Parse a captured mount table in the format produced by `source`.
pub fn parse_mounts(source: MountTableSource, buf: &str) -> Result<Vec<MountEntry>> {
    match source {
        MountTableSource::Df => Ok(parse_df_output(buf)),
        MountTableSource::Findmnt => parse_findmnt_json(buf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_df() {
        let buf = indoc::indoc! { "
            Filesystem                Mounted on
            /dev/mapper/vg0-root      /
            devtmpfs                  /dev
            tmpfs                     /dev/shm
            /dev/nvme0n1p2            /boot
            /dev/sda1                 /mnt/my data

            /dev/sdb
        " };
        let mounts = parse_df_output(buf);
        similar_asserts::assert_eq!(
            mounts,
            vec![
                MountEntry::new("/dev/mapper/vg0-root", "/"),
                MountEntry::new("devtmpfs", "/dev"),
                MountEntry::new("tmpfs", "/dev/shm"),
                MountEntry::new("/dev/nvme0n1p2", "/boot"),
                MountEntry::new("/dev/sda1", "/mnt/my data"),
            ]
        );
    }

    #[test]
    fn test_parse_df_header_only() {
        assert!(parse_df_output("").is_empty());
        assert!(parse_df_output("Filesystem     Mounted on\n").is_empty());
    }

    #[test]
    fn test_parse_findmnt() -> Result<()> {
        let buf = indoc::indoc! { r#"
            {
               "filesystems": [
                  {"source": "/dev/mapper/vg0-root", "target": "/"},
                  {"source": "proc", "target": "/proc"},
                  {"source": "/dev/sda1", "target": "/mnt/data"}
               ]
            }
        "# };
        let mounts = parse_mounts(MountTableSource::Findmnt, buf)?;
        similar_asserts::assert_eq!(
            mounts,
            vec![
                MountEntry::new("/dev/mapper/vg0-root", "/"),
                MountEntry::new("proc", "/proc"),
                MountEntry::new("/dev/sda1", "/mnt/data"),
            ]
        );
        assert!(parse_mounts(MountTableSource::Findmnt, "nope").is_err());
        Ok(())
    }

    #[test]
    fn test_source_names() -> Result<()> {
        let v: MountTableSource = serde_json::from_str(r#""findmnt""#)?;
        assert_eq!(v, MountTableSource::Findmnt);
        assert_eq!(MountTableSource::default(), MountTableSource::Df);
        Ok(())
    }
}
