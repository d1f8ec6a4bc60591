//! Error types for LUT generation and I/O

use crate::io::h5::H5Error;
use std::io;
use thiserror::Error;

/// LUT error types
#[derive(Debug, Error)]
pub enum LutError {
    #[error("invalid wavelength range [{min}, {max}] nm: bounds must be positive and min < max")]
    InvalidWavelengthRange { min: f64, max: f64 },

    #[error("number of samples must be at least 1")]
    NoSamples,

    #[error("solar zenith angle {0} deg is outside [0, 90)")]
    InvalidZenith(f64),

    #[error("radiance at {wavelength_nm} nm underflows float32")]
    RadianceUnderflow { wavelength_nm: f64 },

    #[error("{num_samples} samples over [{min}, {max}] nm are too dense for float32 wavelengths")]
    DegenerateGrid {
        min: f64,
        max: f64,
        num_samples: usize,
    },

    #[error("invalid LUT: {0}")]
    InvalidLut(String),

    #[error("missing dataset `{0}`")]
    MissingDataset(&'static str),

    #[error("missing group `{0}`")]
    MissingGroup(&'static str),

    #[error("dataset `{name}` has {found} elements, expected {expected}")]
    DatasetLength {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("missing attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("unknown lighting preset `{0}` (expected standard, morning, noon or backlight)")]
    UnknownPreset(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("HDF5 error: {0}")]
    Container(#[from] H5Error),
}

/// Result type alias for LUT operations
pub type Result<T> = std::result::Result<T, LutError>;
