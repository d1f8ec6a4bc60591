//! Spectral atmosphere LUT
//!
//! Four parallel arrays sampled on a strictly increasing wavelength axis,
//! plus free-form string metadata. On disk each array is a root-level
//! `float32` dataset and the metadata are string attributes on a
//! `metadata` group.

use crate::io::h5::{AttrValue, Group};
use crate::io::{read_h5_file, write_h5_file};
use crate::{LutError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Dataset names
pub const WAVELENGTHS: &str = "wavelengths";
pub const SOLAR_IRRADIANCE: &str = "solar_irradiance";
pub const SKY_RADIANCE: &str = "sky_radiance";
pub const TRANSMITTANCE: &str = "transmittance";

/// Group holding the metadata attributes
pub const METADATA_GROUP: &str = "metadata";

/// Well-known metadata keys
pub mod keys {
    pub const MODEL: &str = "model";
    pub const SOLAR_ZENITH_DEG: &str = "solar_zenith_deg";
    pub const VISIBILITY_KM: &str = "visibility_km";
    pub const DESCRIPTION: &str = "description";
    pub const GENERATOR: &str = "generator";
}

/// One wavelength row of the LUT
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectralSample {
    pub wavelength_nm: f32,
    /// W/m²/nm, top of atmosphere
    pub solar_irradiance: f32,
    /// W/m²/sr/nm, zenith
    pub sky_radiance: f32,
    /// Direct-beam transmittance in [0, 1]
    pub transmittance: f32,
}

/// Closed interval of values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    fn of(values: &[f32]) -> Self {
        let (min, max) = values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            });
        Self { min, max }
    }
}

/// Per-array statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LutSummary {
    pub num_samples: usize,
    pub wavelength_nm: ValueRange,
    pub solar_irradiance: ValueRange,
    pub sky_radiance: ValueRange,
    pub transmittance: ValueRange,
}

/// Spectral atmosphere lookup table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtmosphereLut {
    /// Wavelength axis (nm), strictly increasing
    pub wavelengths: Vec<f32>,
    pub solar_irradiance: Vec<f32>,
    pub sky_radiance: Vec<f32>,
    pub transmittance: Vec<f32>,
    pub metadata: BTreeMap<String, String>,
}

impl AtmosphereLut {
    /// Check that the LUT is non-empty, the arrays are parallel and the
    /// wavelength axis strictly increases
    pub fn validate(&self) -> Result<()> {
        let n = self.wavelengths.len();
        if n == 0 {
            return Err(LutError::InvalidLut("no wavelength samples".to_string()));
        }

        for (name, values) in [
            (SOLAR_IRRADIANCE, &self.solar_irradiance),
            (SKY_RADIANCE, &self.sky_radiance),
            (TRANSMITTANCE, &self.transmittance),
        ] {
            if values.len() != n {
                return Err(LutError::DatasetLength {
                    name,
                    expected: n,
                    found: values.len(),
                });
            }
        }

        // `!(a < b)` also catches NaN
        if let Some(i) = self.wavelengths.windows(2).position(|w| !(w[0] < w[1])) {
            return Err(LutError::InvalidLut(format!(
                "wavelengths not strictly increasing at index {}: {} then {}",
                i + 1,
                self.wavelengths[i],
                self.wavelengths[i + 1]
            )));
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// First and last wavelength, `(0, 0)` when empty
    pub fn wavelength_range(&self) -> (f32, f32) {
        match (self.wavelengths.first(), self.wavelengths.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => (0.0, 0.0),
        }
    }

    /// Row `index`, if in bounds and present in every array
    pub fn sample(&self, index: usize) -> Option<SpectralSample> {
        Some(SpectralSample {
            wavelength_nm: *self.wavelengths.get(index)?,
            solar_irradiance: *self.solar_irradiance.get(index)?,
            sky_radiance: *self.sky_radiance.get(index)?,
            transmittance: *self.transmittance.get(index)?,
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = SpectralSample> + '_ {
        (0..self.len()).map_while(|i| self.sample(i))
    }

    /// Linearly interpolate `values` (parallel to the wavelength axis) at
    /// `wavelength_nm`
    ///
    /// Targets outside the axis clamp to the boundary values. Returns 0.0
    /// for an empty LUT.
    pub fn interpolate(&self, values: &[f32], wavelength_nm: f32) -> f32 {
        let axis = &self.wavelengths;
        let (Some(&first), Some(&last)) = (axis.first(), axis.last()) else {
            return 0.0;
        };
        let n = axis.len().min(values.len());
        if n == 0 {
            return 0.0;
        }

        if wavelength_nm <= first {
            return values[0];
        }
        if wavelength_nm >= last || n == 1 {
            return values[n - 1];
        }

        // First index whose wavelength is >= target, in 1..n
        let right = axis[..n].partition_point(|&w| w < wavelength_nm).clamp(1, n - 1);
        let left = right - 1;

        let (lambda0, lambda1) = (axis[left], axis[right]);
        let t = (wavelength_nm - lambda0) / (lambda1 - lambda0);
        values[left] * (1.0 - t) + values[right] * t
    }

    pub fn solar_irradiance_at(&self, wavelength_nm: f32) -> f32 {
        self.interpolate(&self.solar_irradiance, wavelength_nm)
    }

    pub fn sky_radiance_at(&self, wavelength_nm: f32) -> f32 {
        self.interpolate(&self.sky_radiance, wavelength_nm)
    }

    pub fn transmittance_at(&self, wavelength_nm: f32) -> f32 {
        self.interpolate(&self.transmittance, wavelength_nm)
    }

    pub fn summary(&self) -> LutSummary {
        LutSummary {
            num_samples: self.len(),
            wavelength_nm: ValueRange::of(&self.wavelengths),
            solar_irradiance: ValueRange::of(&self.solar_irradiance),
            sky_radiance: ValueRange::of(&self.sky_radiance),
            transmittance: ValueRange::of(&self.transmittance),
        }
    }

    /// Build the HDF5 tree for this LUT
    pub fn to_group(&self) -> Group {
        let mut metadata = Group::new();
        for (key, value) in &self.metadata {
            metadata.set_attribute(key.as_str(), AttrValue::from(value.as_str()));
        }

        let mut root = Group::new();
        root.insert_dataset(WAVELENGTHS, self.wavelengths.clone());
        root.insert_dataset(SOLAR_IRRADIANCE, self.solar_irradiance.clone());
        root.insert_dataset(SKY_RADIANCE, self.sky_radiance.clone());
        root.insert_dataset(TRANSMITTANCE, self.transmittance.clone());
        root.insert_group(METADATA_GROUP, metadata);
        root
    }

    /// Extract a LUT from an HDF5 tree
    ///
    /// The four datasets are required. A missing `metadata` group yields
    /// empty metadata; non-string metadata attributes are skipped. The
    /// result is not validated.
    pub fn from_group(root: &Group) -> Result<Self> {
        let read = |name: &'static str| {
            root.dataset(name)
                .map(|dataset| dataset.values.clone())
                .ok_or(LutError::MissingDataset(name))
        };

        let mut lut = Self {
            wavelengths: read(WAVELENGTHS)?,
            solar_irradiance: read(SOLAR_IRRADIANCE)?,
            sky_radiance: read(SKY_RADIANCE)?,
            transmittance: read(TRANSMITTANCE)?,
            metadata: BTreeMap::new(),
        };

        match root.group(METADATA_GROUP) {
            Some(group) => {
                for attr in &group.attributes {
                    match attr.value.as_str() {
                        Some(value) => {
                            lut.metadata.insert(attr.name.clone(), value.to_string());
                        }
                        None => debug!(name = %attr.name, "skipping non-string metadata attribute"),
                    }
                }
            }
            None => warn!(group = METADATA_GROUP, "LUT has no metadata group"),
        }

        Ok(lut)
    }

    /// Validate and write the LUT to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        write_h5_file(path, &self.to_group())?;
        info!(path = %path.display(), samples = self.len(), "saved spectral LUT");
        Ok(())
    }

    /// Read and validate a LUT from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let root = read_h5_file(path)?;
        let lut = Self::from_group(&root)?;
        lut.validate()?;
        info!(path = %path.display(), samples = lut.len(), "loaded spectral LUT");
        Ok(lut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_point_lut() -> AtmosphereLut {
        AtmosphereLut {
            wavelengths: vec![400.0, 500.0, 700.0],
            solar_irradiance: vec![1.0, 2.0, 4.0],
            sky_radiance: vec![0.4, 0.2, 0.1],
            transmittance: vec![0.8, 0.9, 0.95],
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        assert!(three_point_lut().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        let lut = AtmosphereLut::default();
        assert!(matches!(lut.validate(), Err(LutError::InvalidLut(_))));
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let mut lut = three_point_lut();
        lut.sky_radiance.pop();
        match lut.validate() {
            Err(LutError::DatasetLength { name, expected, found }) => {
                assert_eq!(name, SKY_RADIANCE);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_non_increasing() {
        let mut lut = three_point_lut();
        lut.wavelengths[2] = 500.0;
        assert!(matches!(lut.validate(), Err(LutError::InvalidLut(_))));

        lut.wavelengths[2] = f32::NAN;
        assert!(lut.validate().is_err());
    }

    #[test]
    fn test_interpolate_exact_at_grid_points() {
        let lut = three_point_lut();
        for (i, &w) in lut.wavelengths.iter().enumerate() {
            assert_eq!(lut.solar_irradiance_at(w), lut.solar_irradiance[i]);
        }
    }

    #[test]
    fn test_interpolate_between_points() {
        let lut = three_point_lut();
        assert!((lut.solar_irradiance_at(450.0) - 1.5).abs() < 1e-6);
        assert!((lut.solar_irradiance_at(600.0) - 3.0).abs() < 1e-6);
        assert!((lut.sky_radiance_at(600.0) - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_interpolate_clamps_outside_range() {
        let lut = three_point_lut();
        assert_eq!(lut.transmittance_at(100.0), 0.8);
        assert_eq!(lut.transmittance_at(5000.0), 0.95);
    }

    #[test]
    fn test_interpolate_single_sample_and_empty() {
        let lut = AtmosphereLut {
            wavelengths: vec![550.0],
            solar_irradiance: vec![2.5],
            sky_radiance: vec![0.1],
            transmittance: vec![0.9],
            metadata: BTreeMap::new(),
        };
        assert_eq!(lut.solar_irradiance_at(300.0), 2.5);
        assert_eq!(lut.solar_irradiance_at(900.0), 2.5);

        assert_eq!(AtmosphereLut::default().solar_irradiance_at(550.0), 0.0);
    }

    #[test]
    fn test_wavelength_range_and_samples() {
        let lut = three_point_lut();
        assert_eq!(lut.wavelength_range(), (400.0, 700.0));
        assert_eq!(AtmosphereLut::default().wavelength_range(), (0.0, 0.0));

        let samples: Vec<_> = lut.samples().collect();
        assert_eq!(samples.len(), 3);
        assert_eq!(
            samples[1],
            SpectralSample {
                wavelength_nm: 500.0,
                solar_irradiance: 2.0,
                sky_radiance: 0.2,
                transmittance: 0.9,
            }
        );
        assert!(lut.sample(3).is_none());
    }

    #[test]
    fn test_summary_min_max() {
        let summary = three_point_lut().summary();
        assert_eq!(summary.num_samples, 3);
        assert_eq!(summary.wavelength_nm, ValueRange { min: 400.0, max: 700.0 });
        assert_eq!(summary.sky_radiance, ValueRange { min: 0.1, max: 0.4 });
        assert_eq!(summary.transmittance, ValueRange { min: 0.8, max: 0.95 });
    }

    #[test]
    fn test_group_round_trip_keeps_metadata() {
        let mut lut = three_point_lut();
        lut.metadata.insert(keys::MODEL.to_string(), "Dummy_Rayleigh".to_string());
        lut.metadata.insert(keys::SOLAR_ZENITH_DEG.to_string(), "30.0".to_string());

        let group = lut.to_group();
        assert!(group.group(METADATA_GROUP).is_some());
        assert_eq!(AtmosphereLut::from_group(&group).unwrap(), lut);
    }

    #[test]
    fn test_from_group_missing_dataset() {
        let mut group = three_point_lut().to_group();
        group.members.remove(TRANSMITTANCE);
        assert!(matches!(
            AtmosphereLut::from_group(&group),
            Err(LutError::MissingDataset(TRANSMITTANCE))
        ));
    }

    #[test]
    fn test_from_group_without_metadata() {
        let mut group = three_point_lut().to_group();
        group.members.remove(METADATA_GROUP);
        let lut = AtmosphereLut::from_group(&group).unwrap();
        assert!(lut.metadata.is_empty());
    }

    #[test]
    fn test_from_group_skips_float_metadata() {
        let mut group = three_point_lut().to_group();
        let mut metadata = Group::new();
        metadata.set_attribute("model", AttrValue::from("x"));
        metadata.set_attribute("scale", AttrValue::from(2.0f32));
        group.insert_group(METADATA_GROUP, metadata);

        let lut = AtmosphereLut::from_group(&group).unwrap();
        assert_eq!(lut.metadata.len(), 1);
        assert_eq!(lut.metadata["model"], "x");
    }

    #[test]
    fn test_save_rejects_invalid_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.h5");
        let mut lut = three_point_lut();
        lut.transmittance.clear();

        assert!(lut.save(&path).is_err());
        assert!(!path.exists());
    }
}
