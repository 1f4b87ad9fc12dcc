//! Rendering a report for humans or machines.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use crate::report::{ReportEntry, ReportRecord};

/// Output format for the report.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human readable key/value blocks
    #[default]
    Human,
    /// JSON array of records
    Json,
    /// YAML sequence of records
    Yaml,
}

/// Placeholder for fields the device did not report.
const ABSENT: &str = "-";

fn write_field(out: &mut impl Write, label: &str, value: impl Display) -> Result<()> {
    writeln!(out, "{}: {value}", label.bold())?;
    Ok(())
}

fn write_record(out: &mut impl Write, r: &ReportRecord) -> Result<()> {
    write_field(out, "Name", &r.name)?;
    write_field(out, "Path", r.path.as_deref().unwrap_or(ABSENT))?;
    write_field(out, "Serial", r.serial.as_deref().unwrap_or(ABSENT))?;
    write_field(out, "Mount Point", &r.mount_point)?;
    write_field(out, "Disk Path", r.disk_path.as_deref().unwrap_or(ABSENT))?;
    write_field(out, "UUID", r.uuid.as_deref().unwrap_or(ABSENT))?;
    write_field(
        out,
        "Is Boot Volume",
        if r.is_boot_volume { "Yes" } else { "No" },
    )?;
    write_field(out, "Disk Type", r.disk_type)?;
    Ok(())
}

fn render_human(out: &mut impl Write, entries: &[ReportEntry]) -> Result<()> {
    for entry in entries {
        match entry {
            ReportEntry::Resolved(r) => write_record(out, r)?,
            ReportEntry::NotFound { mount_point, .. } => writeln!(
                out,
                "{}",
                format!("No block device found for mount point: {mount_point}").yellow()
            )?,
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write `entries` to `out` in the requested format.
pub fn render(out: &mut impl Write, format: OutputFormat, entries: &[ReportEntry]) -> Result<()> {
    match format {
        OutputFormat::Human => render_human(out, entries)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, entries)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *out, entries)?,
    }
    out.flush()?;
    Ok(())
}
