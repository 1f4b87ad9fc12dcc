//! The main entrypoint for fsinv, which mostly just delegates to the
//! library crate.

use anyhow::Result;

fn run() -> Result<()> {
    fsinv_utils::initialize_tracing();
    tracing::trace!("starting {}", fsinv_utils::NAME);
    fsinv_lib::cli::run_from_iter(std::env::args_os())
}

fn main() {
    fsinv_utils::run_main(run)
}
