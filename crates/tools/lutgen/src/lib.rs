//! Lutgen - dummy LUT generators for Quantiloom renderer testing
//!
//! Shared plumbing for the three binaries:
//!
//! - `spectral-lut`: synthesize a wavelength-sampled atmosphere LUT
//! - `single-entry-lut`: write the single sun/sky entry used by M1 scenes
//! - `lut-info`: load, validate and summarize an existing LUT file
//!
//! Environment configuration lives in [`config`], subscriber setup in
//! [`logging`], and the stdout reports in [`report`].

pub mod config;
pub mod logging;
pub mod report;

pub use config::ToolConfig;
