//! # Filesystem inventory
//!
//! For every mounted filesystem, find the physical block device behind
//! it and whether that device is the boot disk.
//!
//! This is the implementation library for `fsinv`; the binary
//! (`crates/cli`) is a thin wrapper that delegates to [`cli::run_from_iter`].
//! The API is internal and not stable for external consumption.
//!
//! # Module Index
//!
//! - [`search`] - Finding a mount point anywhere in the device tree
//! - [`resolve`] - Mapping a mount point to its root-level device
//! - [`boot`] - Boot volume classification
//! - [`report`] - One record per mount table entry
//! - [`render`] - Human, JSON and YAML output
//! - [`inventory`] - Collecting inputs from `lsblk`, `df` and `findmnt`
//! - [`config`] - Optional YAML configuration
//! - [`cli`] - Command-line interface (clap-based)
//!
//! The device tree model lives in `fsinv-blockdev` and the mount table in
//! `fsinv-mount`.

pub mod boot;
pub mod cli;
pub mod config;
pub mod inventory;
pub mod render;
pub mod report;
pub mod resolve;
pub mod search;
