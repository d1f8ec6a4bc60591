//! single-entry-lut - write the single sun/sky LUT entry used by M1 scenes

use anyhow::{Context, Result};
use clap::Parser;
use lut::LightingPreset;
use lutgen::{logging, report, ToolConfig};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "single-entry-lut")]
#[command(
    author,
    version,
    about = "Generate a dummy single-entry LUT (sun direction, sun and sky radiance)"
)]
struct Cli {
    /// Output HDF5 file path [default: $LUTGEN_ASSETS_DIR/assets/luts/dummy_lut.h5,
    /// where LUTGEN_ASSETS_DIR defaults to the working directory]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Lighting preset: standard, morning, noon or backlight
    #[arg(long, default_value_t = LightingPreset::Standard)]
    preset: LightingPreset,
}

fn main() -> Result<()> {
    let config = ToolConfig::from_env();
    logging::init(&config.log_filter);

    let cli = Cli::parse();
    let output = cli.output.unwrap_or_else(|| config.single_entry_output());
    debug!(preset = %cli.preset, output = %output.display(), "single-entry-lut");

    let entry = cli.preset.entry();
    entry
        .save(&output)
        .with_context(|| format!("Failed to write LUT to {}", output.display()))?;

    print!("{}", report::single_entry_report(cli.preset, &output, &entry));
    Ok(())
}
