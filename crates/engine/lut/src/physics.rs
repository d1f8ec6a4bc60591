//! Closed-form atmosphere approximations
//!
//! Pure functions of wavelength (nm) and solar zenith angle (degrees),
//! evaluated in `f64`. None of these are calibrated radiative transfer;
//! they produce plausible placeholder spectra for renderer testing.
//!
//! - Solar irradiance: Planck blackbody at the CIE D65 correlated colour
//!   temperature, scaled by the solar disk solid angle
//! - Sky radiance: Rayleigh `1/λ⁴` law anchored at 550 nm
//! - Transmittance: Beer-Lambert with Rayleigh optical depth and
//!   Kasten-Young air mass

/// Planck constant (J·s)
pub const PLANCK_CONSTANT: f64 = 6.626_070_15e-34;
/// Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Boltzmann constant (J/K)
pub const BOLTZMANN_CONSTANT: f64 = 1.380_649e-23;

/// CIE D65 correlated colour temperature (K)
pub const D65_TEMPERATURE_K: f64 = 6504.0;
/// Solid angle subtended by the solar disk (sr)
pub const SOLAR_SOLID_ANGLE_SR: f64 = 6.8e-5;
/// Empirical scale towards the ~1361 W/m² solar constant
pub const SOLAR_NORMALIZATION: f64 = 1.5;

/// Anchor wavelength for the Rayleigh laws (nm)
pub const REFERENCE_WAVELENGTH_NM: f64 = 550.0;
/// Clear-sky zenith radiance at the anchor wavelength (W/m²/sr/nm)
pub const REFERENCE_SKY_RADIANCE: f64 = 0.1;
/// Sea-level Rayleigh optical depth at the anchor wavelength
pub const REFERENCE_OPTICAL_DEPTH: f64 = 0.1;

/// Nanometres to metres
const NM_TO_M: f64 = 1e-9;

/// Planck blackbody spectral radiance (W/m²/sr/m)
pub fn planck_radiance(wavelength_nm: f64, temperature_k: f64) -> f64 {
    let lambda_m = wavelength_nm * NM_TO_M;
    let numerator = 2.0 * PLANCK_CONSTANT * SPEED_OF_LIGHT * SPEED_OF_LIGHT / lambda_m.powi(5);
    let exponent =
        PLANCK_CONSTANT * SPEED_OF_LIGHT / (lambda_m * BOLTZMANN_CONSTANT * temperature_k);
    numerator / exponent.exp_m1()
}

/// Approximate top-of-atmosphere solar spectral irradiance (W/m²/nm)
///
/// D65-temperature blackbody radiance times the solar solid angle,
/// converted from per-metre to per-nanometre and scaled by
/// [`SOLAR_NORMALIZATION`].
pub fn solar_irradiance(wavelength_nm: f64) -> f64 {
    planck_radiance(wavelength_nm, D65_TEMPERATURE_K)
        * SOLAR_SOLID_ANGLE_SR
        * NM_TO_M
        * SOLAR_NORMALIZATION
}

/// Rayleigh scaling `(550 / λ)⁴` relative to the reference wavelength
pub fn rayleigh_factor(wavelength_nm: f64) -> f64 {
    (REFERENCE_WAVELENGTH_NM / wavelength_nm).powi(4)
}

/// Clear-sky zenith radiance (W/m²/sr/nm)
pub fn sky_radiance(wavelength_nm: f64) -> f64 {
    REFERENCE_SKY_RADIANCE * rayleigh_factor(wavelength_nm)
}

/// Rayleigh optical depth at zenith
pub fn rayleigh_optical_depth(wavelength_nm: f64) -> f64 {
    REFERENCE_OPTICAL_DEPTH * rayleigh_factor(wavelength_nm)
}

/// Kasten-Young relative air mass
///
/// Only meaningful for zenith angles in `[0, 90)`.
pub fn kasten_young_air_mass(zenith_deg: f64) -> f64 {
    let cos_zenith = zenith_deg.to_radians().cos();
    1.0 / (cos_zenith + 0.50572 * (96.07995 - zenith_deg).powf(-1.6364))
}

/// Direct-beam transmittance `exp(-τ(λ) · m(z))`, in `[0, 1]`
pub fn transmittance(wavelength_nm: f64, zenith_deg: f64) -> f64 {
    (-rayleigh_optical_depth(wavelength_nm) * kasten_young_air_mass(zenith_deg)).exp()
}
