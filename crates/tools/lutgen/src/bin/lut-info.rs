//! lut-info - inspect a LUT file written by the lutgen generators

use anyhow::{Context, Result};
use clap::Parser;
use lut::{AtmosphereLut, DirectionalLutEntry};
use lutgen::report::{EntryReport, InspectReport};
use lutgen::{logging, ToolConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lut-info")]
#[command(author, version, about = "Validate and summarize a Quantiloom LUT file")]
struct Cli {
    /// LUT file to inspect
    path: PathBuf,

    /// Print interpolated values at this wavelength in nm (repeatable)
    #[arg(long = "at", value_name = "NM")]
    at: Vec<f32>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Read a single-entry LUT instead of a spectral one
    #[arg(long, conflicts_with = "at")]
    single_entry: bool,
}

fn main() -> Result<()> {
    let config = ToolConfig::from_env();
    logging::init(&config.log_filter);

    let cli = Cli::parse();
    let path = &cli.path;

    let output = if cli.single_entry {
        let entry = DirectionalLutEntry::load(path)
            .with_context(|| format!("Failed to read single-entry LUT {}", path.display()))?;
        let report = EntryReport::new(path, &entry);
        if cli.json {
            serde_json::to_string_pretty(&report)? + "\n"
        } else {
            report.to_text()
        }
    } else {
        let lut = AtmosphereLut::load(path)
            .with_context(|| format!("Failed to read spectral LUT {}", path.display()))?;
        let report = InspectReport::new(path, &lut, &cli.at);
        if cli.json {
            serde_json::to_string_pretty(&report)? + "\n"
        } else {
            report.to_text()
        }
    };

    print!("{output}");
    Ok(())
}
