//! Synthetic spectral LUT generation

use crate::atmosphere::{keys, AtmosphereLut};
use crate::physics::{sky_radiance, solar_irradiance, transmittance};
use crate::{LutError, Result};
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_LAMBDA_MIN_NM: f64 = 380.0;
pub const DEFAULT_LAMBDA_MAX_NM: f64 = 2500.0;
pub const DEFAULT_NUM_SAMPLES: usize = 212;
pub const DEFAULT_SOLAR_ZENITH_DEG: f64 = 30.0;

pub const MODEL_NAME: &str = "Dummy_Rayleigh";
pub const VISIBILITY_KM: &str = "23.0";
pub const DESCRIPTION: &str = "Simplified Rayleigh atmosphere for testing";
pub const GENERATOR: &str = "spectral-lut";

/// Inputs of the spectral generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralLutParams {
    pub lambda_min_nm: f64,
    pub lambda_max_nm: f64,
    pub num_samples: usize,
    pub solar_zenith_deg: f64,
}

impl Default for SpectralLutParams {
    fn default() -> Self {
        Self {
            lambda_min_nm: DEFAULT_LAMBDA_MIN_NM,
            lambda_max_nm: DEFAULT_LAMBDA_MAX_NM,
            num_samples: DEFAULT_NUM_SAMPLES,
            solar_zenith_deg: DEFAULT_SOLAR_ZENITH_DEG,
        }
    }
}

impl SpectralLutParams {
    pub fn validate(&self) -> Result<()> {
        let (min, max) = (self.lambda_min_nm, self.lambda_max_nm);
        let invalid_range = || LutError::InvalidWavelengthRange { min, max };

        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
            return Err(invalid_range());
        }
        // Bounds must survive the conversion to f32 storage
        let (min_f32, max_f32) = (min as f32, max as f32);
        if !(min_f32 > 0.0 && max_f32.is_finite()) {
            return Err(invalid_range());
        }

        if self.num_samples == 0 {
            return Err(LutError::NoSamples);
        }
        // More samples than distinct f32 values in the range cannot be
        // strictly increasing. Positive f32 bit patterns order like the values.
        let distinct = u64::from(max_f32.to_bits() - min_f32.to_bits()) + 1;
        if self.num_samples as u64 > distinct {
            return Err(self.degenerate());
        }

        // Planck peaks once inside the range and Rayleigh falls off with
        // wavelength, so the smallest values sit at the endpoints
        for wavelength in [min_f32, max_f32] {
            let w = f64::from(wavelength);
            if solar_irradiance(w) as f32 <= 0.0 || sky_radiance(w) as f32 <= 0.0 {
                return Err(LutError::RadianceUnderflow { wavelength_nm: w });
            }
        }

        let zenith = self.solar_zenith_deg;
        if !(zenith.is_finite() && (0.0..90.0).contains(&zenith)) {
            return Err(LutError::InvalidZenith(zenith));
        }

        Ok(())
    }

    fn degenerate(&self) -> LutError {
        LutError::DegenerateGrid {
            min: self.lambda_min_nm,
            max: self.lambda_max_nm,
            num_samples: self.num_samples,
        }
    }

    /// Evenly spaced wavelengths over `[min, max]`, inclusive
    ///
    /// The first element is exactly `min` and, for more than one sample,
    /// the last is exactly `max`.
    fn wavelength_grid_f64(&self) -> Vec<f64> {
        let n = self.num_samples;
        let (min, max) = (self.lambda_min_nm, self.lambda_max_nm);
        if n == 1 {
            return vec![min];
        }

        let step = (max - min) / (n - 1) as f64;
        let mut grid: Vec<f64> = (0..n).map(|i| min + i as f64 * step).collect();
        grid[n - 1] = max;
        grid
    }

    /// Validated wavelength axis as stored in the LUT
    pub fn wavelength_grid(&self) -> Result<Vec<f32>> {
        self.validate()?;
        let grid: Vec<f32> = self
            .wavelength_grid_f64()
            .into_iter()
            .map(|w| w as f32)
            .collect();

        if grid.windows(2).any(|w| w[0] >= w[1]) {
            return Err(self.degenerate());
        }
        Ok(grid)
    }

    fn metadata(&self) -> BTreeMap<String, String> {
        [
            (keys::MODEL, MODEL_NAME.to_string()),
            (keys::SOLAR_ZENITH_DEG, format!("{:?}", self.solar_zenith_deg)),
            (keys::VISIBILITY_KM, VISIBILITY_KM.to_string()),
            (keys::DESCRIPTION, DESCRIPTION.to_string()),
            (keys::GENERATOR, GENERATOR.to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
    }

    /// Compute the synthetic LUT
    ///
    /// Physics is evaluated in `f64` at the stored `f32` wavelengths and
    /// the results stored as `f32`.
    pub fn generate(&self) -> Result<AtmosphereLut> {
        let wavelengths = self.wavelength_grid()?;
        let grid: Vec<f64> = wavelengths.iter().map(|&w| f64::from(w)).collect();
        debug!(
            samples = grid.len(),
            min = self.lambda_min_nm,
            max = self.lambda_max_nm,
            "generated wavelength grid"
        );

        let solar: Vec<f32> = grid.iter().map(|&w| solar_irradiance(w) as f32).collect();
        debug!("computed solar irradiance");

        let sky: Vec<f32> = grid.iter().map(|&w| sky_radiance(w) as f32).collect();
        debug!("computed sky radiance");

        let zenith = self.solar_zenith_deg;
        let trans: Vec<f32> = grid
            .iter()
            .map(|&w| transmittance(w, zenith) as f32)
            .collect();
        debug!(zenith_deg = zenith, "computed transmittance");

        Ok(AtmosphereLut {
            wavelengths,
            solar_irradiance: solar,
            sky_radiance: sky,
            transmittance: trans,
            metadata: self.metadata(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(min: f64, max: f64, num_samples: usize) -> SpectralLutParams {
        SpectralLutParams {
            lambda_min_nm: min,
            lambda_max_nm: max,
            num_samples,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_grid() {
        let grid = SpectralLutParams::default().wavelength_grid().unwrap();
        assert_eq!(grid.len(), 212);
        assert_eq!(grid[0], 380.0);
        assert_eq!(grid[211], 2500.0);
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_grid_spacing_is_even() {
        let grid = params(400.0, 700.0, 4).wavelength_grid().unwrap();
        assert_eq!(grid, vec![400.0, 500.0, 600.0, 700.0]);
    }

    #[test]
    fn test_single_sample_grid() {
        let grid = params(380.0, 2500.0, 1).wavelength_grid().unwrap();
        assert_eq!(grid, vec![380.0]);
    }

    #[test]
    fn test_invalid_ranges() {
        for (min, max) in [
            (500.0, 500.0),
            (700.0, 400.0),
            (0.0, 400.0),
            (-10.0, 400.0),
            (f64::NAN, 400.0),
            (380.0, f64::INFINITY),
            (380.0, 1e300),
        ] {
            assert!(
                matches!(
                    params(min, max, 10).validate(),
                    Err(LutError::InvalidWavelengthRange { .. })
                ),
                "range [{min}, {max}] should be rejected"
            );
        }
    }

    #[test]
    fn test_zero_samples() {
        assert!(matches!(
            params(380.0, 2500.0, 0).validate(),
            Err(LutError::NoSamples)
        ));
    }

    #[test]
    fn test_zenith_bounds() {
        for zenith in [0.0, 45.0, 89.999] {
            let p = SpectralLutParams {
                solar_zenith_deg: zenith,
                ..Default::default()
            };
            assert!(p.validate().is_ok(), "zenith {zenith} should be accepted");
        }
        for zenith in [-1.0, 90.0, 120.0, f64::NAN, f64::INFINITY] {
            let p = SpectralLutParams {
                solar_zenith_deg: zenith,
                ..Default::default()
            };
            assert!(
                matches!(p.validate(), Err(LutError::InvalidZenith(_))),
                "zenith {zenith} should be rejected"
            );
        }
    }

    #[test]
    fn test_degenerate_grid() {
        // Adjacent f32 values near 500 nm are ~3e-5 apart
        let result = params(500.0, 500.001, 1000).wavelength_grid();
        assert!(matches!(result, Err(LutError::DegenerateGrid { .. })));
    }

    #[test]
    fn test_sample_count_beyond_f32_resolution_is_rejected_up_front() {
        for num_samples in [usize::MAX, 2_000_000_000] {
            assert!(matches!(
                params(380.0, 2500.0, num_samples).validate(),
                Err(LutError::DegenerateGrid { .. })
            ));
        }
        // Every f32 between the bounds is still a usable grid
        let grid = params(500.0, f64::from(f32::from_bits(500.0f32.to_bits() + 3)), 4)
            .wavelength_grid()
            .unwrap();
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_radiance_underflow_is_rejected() {
        assert!(matches!(
            params(5.0, 20.0, 10).validate(),
            Err(LutError::RadianceUnderflow { wavelength_nm }) if wavelength_nm == 5.0
        ));
        assert!(matches!(
            params(380.0, 1e20, 10).validate(),
            Err(LutError::RadianceUnderflow { .. })
        ));
    }

    #[test]
    fn test_rows_match_stored_wavelengths() {
        let lut = SpectralLutParams::default().generate().unwrap();
        for (i, &w) in lut.wavelengths.iter().enumerate() {
            let w = f64::from(w);
            assert_eq!(lut.solar_irradiance[i], solar_irradiance(w) as f32);
            assert_eq!(lut.sky_radiance[i], sky_radiance(w) as f32);
            assert_eq!(lut.transmittance[i], transmittance(w, 30.0) as f32);
        }
    }

    #[test]
    fn test_generate_default() {
        let lut = SpectralLutParams::default().generate().unwrap();
        assert!(lut.validate().is_ok());
        assert_eq!(lut.len(), 212);
        assert!(lut.solar_irradiance.iter().all(|&v| v > 0.0));
        assert!(lut.sky_radiance.iter().all(|&v| v > 0.0));
        assert!(lut.transmittance.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_generate_metadata() {
        let lut = SpectralLutParams::default().generate().unwrap();
        assert_eq!(lut.metadata[keys::MODEL], "Dummy_Rayleigh");
        assert_eq!(lut.metadata[keys::SOLAR_ZENITH_DEG], "30.0");
        assert_eq!(lut.metadata[keys::VISIBILITY_KM], "23.0");
        assert_eq!(lut.metadata[keys::DESCRIPTION], DESCRIPTION);
        assert_eq!(lut.metadata[keys::GENERATOR], "spectral-lut");

        let p = SpectralLutParams {
            solar_zenith_deg: 45.5,
            ..Default::default()
        };
        assert_eq!(p.generate().unwrap().metadata[keys::SOLAR_ZENITH_DEG], "45.5");
    }

    #[test]
    fn test_sky_radiance_at_reference_wavelength() {
        let lut = params(450.0, 650.0, 3).generate().unwrap();
        assert_eq!(lut.wavelengths[1], 550.0);
        assert_eq!(lut.sky_radiance[1], 0.1);
    }

    #[test]
    fn test_higher_zenith_attenuates_more() {
        let low = SpectralLutParams {
            solar_zenith_deg: 10.0,
            ..Default::default()
        };
        let high = SpectralLutParams {
            solar_zenith_deg: 80.0,
            ..Default::default()
        };
        let low = low.generate().unwrap();
        let high = high.generate().unwrap();
        assert!(low
            .transmittance
            .iter()
            .zip(&high.transmittance)
            .all(|(l, h)| l >= h));
        assert!(low.transmittance[0] > high.transmittance[0]);
    }
}
