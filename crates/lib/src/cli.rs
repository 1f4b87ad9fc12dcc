//! # Command line interface
//!
//! Command line tool to report the block device behind each mounted
//! filesystem.

use std::ffi::OsString;
use std::io::Write;

use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use fsinv_mount::MountTableSource;

use crate::config::InventoryConfig;
use crate::inventory::{Inventory, InventorySources};
use crate::render::{render, OutputFormat};
use crate::report::{assemble_report, ReportEntry};

/// Report the block device backing each mounted filesystem, and whether
/// that device is the boot disk.
///
/// If the environment variable FSINV_CONFIG is set, it must name a YAML
/// file which may set `format` and `mount-table`. Command line options
/// take precedence over it.
#[derive(Debug, Parser, PartialEq, Eq)]
#[clap(name = "fsinv", version)]
pub struct Opt {
    /// Output format
    #[clap(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Tool used to read the mount table
    #[clap(long, value_enum)]
    pub mount_table: Option<MountTableSource>,

    /// Read the device tree from captured `lsblk --json` output instead of running lsblk
    #[clap(long, value_name = "FILE")]
    pub lsblk_json: Option<Utf8PathBuf>,

    /// Read the mount table from a captured file instead of running the tool;
    /// the expected format follows --mount-table
    #[clap(long, value_name = "FILE")]
    pub mounts_file: Option<Utf8PathBuf>,

    /// Only report this mount point (may be repeated)
    #[clap(long = "mountpoint", value_name = "PATH", action = clap::ArgAction::Append)]
    pub mountpoints: Vec<String>,
}

fn build_report(opts: &Opt, config: &InventoryConfig) -> Result<Vec<ReportEntry>> {
    let mount_table = opts
        .mount_table
        .or(config.mount_table)
        .unwrap_or_default();
    let sources = InventorySources {
        mount_table,
        lsblk_json: opts.lsblk_json.as_deref(),
        mounts_file: opts.mounts_file.as_deref(),
    };
    let mut inventory = Inventory::collect(&sources)?;
    inventory.retain_mountpoints(&opts.mountpoints);
    tracing::debug!(
        "Correlating {} mounts with {} root devices",
        inventory.mounts.len(),
        inventory.forest.len()
    );
    Ok(assemble_report(&inventory.mounts, &inventory.forest))
}

fn run(opts: Opt, config: InventoryConfig, out: &mut impl Write) -> Result<()> {
    let format = opts.format.or(config.format).unwrap_or_default();
    let report = build_report(&opts, &config)?;
    render(out, format, &report)
}

/// Parse the provided arguments and execute.
/// Calls [`clap::Error::exit`] on failure, printing the error message and aborting the program.
pub fn run_from_iter<I>(args: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    let opts = Opt::parse_from(args);
    let config = InventoryConfig::load()?.unwrap_or_default();
    let mut stdout = anstream::stdout();
    run(opts, config, &mut stdout)
}
