//! Logging setup for the fsinv binary.
//!
//! The report is written to stdout; everything here goes to stderr (and
//! the journal when running as root).

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Build the stderr filter from `RUST_LOG`-style `directives`.
///
/// With no directives, warnings and errors are shown: a tool we depend on
/// failing must be visible even though the run still succeeds.
pub fn stderr_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

/// Initialize tracing: compact stderr output filtered by `RUST_LOG`
/// (default `warn`), plus the journal at `info` when running as root.
pub fn initialize_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let stderr_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter(&directives));

    let journald_layer = rustix::process::getuid()
        .is_root()
        .then(tracing_journald::layer)
        .and_then(Result::ok)
        .map(|layer| layer.with_filter(LevelFilter::INFO));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(journald_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_filter() {
        assert_eq!(stderr_filter("").max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(
            stderr_filter("debug").max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
