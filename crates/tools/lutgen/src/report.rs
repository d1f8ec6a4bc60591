//! Human-readable and JSON reports printed by the binaries

use lut::{
    AtmosphereLut, DirectionalLutEntry, LightingPreset, LutRecord, LutSummary, SpectralLutParams,
    SpectralSample,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

/// Scientific notation with a signed, two-digit exponent (`1.23e-03`)
pub fn format_sci(value: f32, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
            }
            Err(_) => formatted,
        },
        // inf / NaN
        None => formatted,
    }
}

fn format_vec3(v: [f32; 3]) -> String {
    format!("[{:.4}, {:.4}, {:.4}]", v[0], v[1], v[2])
}

/// Report printed by `spectral-lut` after a successful write
pub fn spectral_report(params: &SpectralLutParams, output: &Path, lut: &AtmosphereLut) -> String {
    let summary = lut.summary();
    let mut out = String::new();
    let _ = writeln!(out, "Generating dummy LUT:");
    let _ = writeln!(
        out,
        "  Wavelength range: {:?} - {:?} nm",
        params.lambda_min_nm, params.lambda_max_nm
    );
    let _ = writeln!(out, "  Number of samples: {}", params.num_samples);
    let _ = writeln!(out, "  Solar zenith angle: {:?} deg", params.solar_zenith_deg);
    let _ = writeln!(out, "  Output: {}", output.display());
    let _ = writeln!(
        out,
        "  Solar irradiance range: {} - {} W/m^2/nm",
        format_sci(summary.solar_irradiance.min, 2),
        format_sci(summary.solar_irradiance.max, 2)
    );
    let _ = writeln!(
        out,
        "  Sky radiance range: {} - {} W/m^2/sr/nm",
        format_sci(summary.sky_radiance.min, 2),
        format_sci(summary.sky_radiance.max, 2)
    );
    let _ = writeln!(
        out,
        "  Transmittance range: {:.4} - {:.4}",
        summary.transmittance.min, summary.transmittance.max
    );
    let _ = writeln!(out, "Done!");
    out
}

/// Report printed by `single-entry-lut` after a successful write
pub fn single_entry_report(
    preset: LightingPreset,
    output: &Path,
    entry: &DirectionalLutEntry,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Generating single-entry LUT (preset: {preset}):");
    let _ = writeln!(
        out,
        "  Sun direction: {} (normalized)",
        format_vec3(entry.sun_direction.to_array())
    );
    let _ = writeln!(out, "  Sun radiance: {}", format_vec3(entry.sun_radiance.to_array()));
    let _ = writeln!(out, "  Sky radiance: {}", format_vec3(entry.sky_radiance.to_array()));
    let _ = writeln!(out, "  Output: {}", output.display());
    let _ = writeln!(out, "Done!");
    out
}

/// `lut-info` report for a spectral LUT
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub path: String,
    pub summary: LutSummary,
    pub metadata: BTreeMap<String, String>,
    /// Interpolated values at the requested wavelengths
    pub samples: Vec<SpectralSample>,
}

impl InspectReport {
    pub fn new(path: &Path, lut: &AtmosphereLut, wavelengths: &[f32]) -> Self {
        let samples = wavelengths
            .iter()
            .map(|&wavelength_nm| SpectralSample {
                wavelength_nm,
                solar_irradiance: lut.solar_irradiance_at(wavelength_nm),
                sky_radiance: lut.sky_radiance_at(wavelength_nm),
                transmittance: lut.transmittance_at(wavelength_nm),
            })
            .collect();

        Self {
            path: path.display().to_string(),
            summary: lut.summary(),
            metadata: lut.metadata.clone(),
            samples,
        }
    }

    pub fn to_text(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();
        let _ = writeln!(out, "Spectral LUT: {}", self.path);
        let _ = writeln!(out, "  Samples: {}", s.num_samples);
        let _ = writeln!(
            out,
            "  Wavelength range: {} - {} nm",
            s.wavelength_nm.min, s.wavelength_nm.max
        );
        let _ = writeln!(
            out,
            "  Solar irradiance range: {} - {} W/m^2/nm",
            format_sci(s.solar_irradiance.min, 2),
            format_sci(s.solar_irradiance.max, 2)
        );
        let _ = writeln!(
            out,
            "  Sky radiance range: {} - {} W/m^2/sr/nm",
            format_sci(s.sky_radiance.min, 2),
            format_sci(s.sky_radiance.max, 2)
        );
        let _ = writeln!(
            out,
            "  Transmittance range: {:.4} - {:.4}",
            s.transmittance.min, s.transmittance.max
        );

        if !self.metadata.is_empty() {
            let _ = writeln!(out, "  Metadata:");
            for (key, value) in &self.metadata {
                let _ = writeln!(out, "    {key}: {value}");
            }
        }

        for sample in &self.samples {
            let _ = writeln!(
                out,
                "  At {} nm: solar {} W/m^2/nm, sky {} W/m^2/sr/nm, transmittance {:.4}",
                sample.wavelength_nm,
                format_sci(sample.solar_irradiance, 3),
                format_sci(sample.sky_radiance, 3),
                sample.transmittance
            );
        }
        out
    }
}

/// `lut-info --single-entry` report
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub path: String,
    pub sun_direction: [f32; 3],
    pub sun_radiance: [f32; 3],
    pub sky_radiance: [f32; 3],
    pub description: String,
    pub version: String,
    pub mode: String,
    pub wavelength_nm: f32,
    /// Size of the GPU record in bytes
    pub record_size: usize,
}

impl EntryReport {
    pub fn new(path: &Path, entry: &DirectionalLutEntry) -> Self {
        Self {
            path: path.display().to_string(),
            sun_direction: entry.sun_direction.to_array(),
            sun_radiance: entry.sun_radiance.to_array(),
            sky_radiance: entry.sky_radiance.to_array(),
            description: entry.metadata.description.clone(),
            version: entry.metadata.version.clone(),
            mode: entry.metadata.mode.clone(),
            wavelength_nm: entry.metadata.wavelength_nm,
            record_size: std::mem::size_of::<LutRecord>(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Single-entry LUT: {}", self.path);
        let _ = writeln!(out, "  Sun direction: {}", format_vec3(self.sun_direction));
        let _ = writeln!(out, "  Sun radiance: {}", format_vec3(self.sun_radiance));
        let _ = writeln!(out, "  Sky radiance: {}", format_vec3(self.sky_radiance));
        let _ = writeln!(out, "  Description: {}", self.description);
        let _ = writeln!(out, "  Version: {}", self.version);
        let _ = writeln!(out, "  Mode: {}", self.mode);
        let _ = writeln!(out, "  Wavelength: {} nm", self.wavelength_nm);
        let _ = writeln!(out, "  Record size: {} bytes", self.record_size);
        out
    }
}
