//! Edge Model Code Generator - Main Entry Point

use anyhow::Result;
use edge_codegen::{init_logging, parse_args, run, Settings};
use tracing::info;

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let settings = Settings::load(args.config.as_deref())?;
    init_logging(&settings.log_level);

    info!("=== Edge Codegen v{} ===", env!("CARGO_PKG_VERSION"));

    let summary = run(&settings, &args)?;
    info!(
        "Wrote {} files to {} ({} windows, {} flagged)",
        summary.files_written.len(),
        args.output.display(),
        summary.windows,
        summary.flagged
    );

    Ok(())
}
