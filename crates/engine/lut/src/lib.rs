//! Atmosphere lookup tables for the Quantiloom renderer
//!
//! This crate builds and reads the placeholder LUT files the renderer's
//! LUT-fast mode consumes in tests:
//!
//! - [`AtmosphereLut`]: solar irradiance, sky radiance and transmittance
//!   sampled over wavelength, synthesized by [`SpectralLutParams::generate`]
//!   from Planck, Rayleigh and Beer-Lambert approximations
//! - [`DirectionalLutEntry`]: a single sun direction with RGB sun and sky
//!   radiance, uploaded to the GPU as a [`LutRecord`]
//!
//! Both are stored in HDF5 files written by the pure-Rust codec in
//! [`io::h5`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use lut::{AtmosphereLut, SpectralLutParams};
//! use std::path::Path;
//!
//! let lut = SpectralLutParams::default().generate()?;
//! lut.save(Path::new("assets/luts/dummy_spectral.h5"))?;
//!
//! let loaded = AtmosphereLut::load(Path::new("assets/luts/dummy_spectral.h5"))?;
//! println!("T(550 nm) = {}", loaded.transmittance_at(550.0));
//! # Ok::<(), lut::LutError>(())
//! ```

pub mod atmosphere;
pub mod directional;
pub mod error;
pub mod io;
pub mod physics;
pub mod spectral;

// Re-export main types
pub use atmosphere::{AtmosphereLut, LutSummary, SpectralSample, ValueRange};
pub use directional::{DirectionalLutEntry, EntryMetadata, LightingPreset, LutRecord};
pub use error::{LutError, Result};
pub use spectral::SpectralLutParams;
