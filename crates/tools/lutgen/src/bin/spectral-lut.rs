//! spectral-lut - synthesize a dummy spectral atmosphere LUT
//!
//! Samples solar irradiance (Planck, D65 temperature), Rayleigh sky
//! radiance and Beer-Lambert transmittance over a wavelength grid and
//! writes them to an HDF5 file.

use anyhow::{Context, Result};
use clap::Parser;
use lut::spectral::{
    DEFAULT_LAMBDA_MAX_NM, DEFAULT_LAMBDA_MIN_NM, DEFAULT_NUM_SAMPLES, DEFAULT_SOLAR_ZENITH_DEG,
};
use lut::SpectralLutParams;
use lutgen::{logging, report, ToolConfig};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "spectral-lut")]
#[command(
    author,
    version,
    about = "Generate a dummy spectral atmosphere LUT for Quantiloom testing",
    allow_negative_numbers = true
)]
struct Cli {
    /// Output HDF5 file path
    #[arg(short, long)]
    output: PathBuf,

    /// Minimum wavelength (nm)
    #[arg(long, default_value_t = DEFAULT_LAMBDA_MIN_NM)]
    lambda_min: f64,

    /// Maximum wavelength (nm)
    #[arg(long, default_value_t = DEFAULT_LAMBDA_MAX_NM)]
    lambda_max: f64,

    /// Number of wavelength samples
    #[arg(long, default_value_t = DEFAULT_NUM_SAMPLES)]
    num_samples: usize,

    /// Solar zenith angle in degrees, in [0, 90)
    #[arg(long, default_value_t = DEFAULT_SOLAR_ZENITH_DEG)]
    zenith: f64,
}

fn main() -> Result<()> {
    let config = ToolConfig::from_env();
    logging::init(&config.log_filter);

    let cli = Cli::parse();
    let params = SpectralLutParams {
        lambda_min_nm: cli.lambda_min,
        lambda_max_nm: cli.lambda_max,
        num_samples: cli.num_samples,
        solar_zenith_deg: cli.zenith,
    };
    debug!(?params, output = %cli.output.display(), "spectral-lut");

    let lut = params.generate().context("Invalid LUT parameters")?;
    lut.save(&cli.output)
        .with_context(|| format!("Failed to write LUT to {}", cli.output.display()))?;

    print!("{}", report::spectral_report(&params, &cli.output, &lut));
    Ok(())
}
