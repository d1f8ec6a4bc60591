//! Single-entry directional LUT
//!
//! One sun direction with sun and sky RGB radiance, the minimal lighting
//! input of the renderer's first milestone. Stored as three length-3
//! `float32` datasets with descriptive root attributes; uploaded to the
//! GPU as a [`LutRecord`].

use crate::io::h5::{AttrValue, Group};
use crate::io::{read_h5_file, write_h5_file};
use crate::{LutError, Result};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Dataset names
pub const SUN_DIRECTION: &str = "sun_direction";
pub const SUN_RADIANCE: &str = "sun_radiance";
pub const SKY_RADIANCE: &str = "sky_radiance";

/// Root attribute names
pub mod keys {
    pub const DESCRIPTION: &str = "description";
    pub const VERSION: &str = "version";
    pub const MODE: &str = "mode";
    pub const WAVELENGTH_NM: &str = "wavelength_nm";
}

/// Descriptive attributes of a directional entry
#[derive(Debug, Clone, PartialEq)]
pub struct EntryMetadata {
    pub description: String,
    pub version: String,
    pub mode: String,
    /// Representative wavelength of the RGB values
    pub wavelength_nm: f32,
}

impl Default for EntryMetadata {
    fn default() -> Self {
        Self {
            description: "Dummy single-entry LUT for M1 testing".to_string(),
            version: "1.0".to_string(),
            mode: "rgb".to_string(),
            wavelength_nm: 550.0,
        }
    }
}

/// Sun and sky lighting for one direction
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLutEntry {
    /// Unit vector from the surface towards the sun
    pub sun_direction: Vec3,
    pub sun_radiance: Vec3,
    pub sky_radiance: Vec3,
    pub metadata: EntryMetadata,
}

impl Default for DirectionalLutEntry {
    fn default() -> Self {
        LightingPreset::Standard.entry()
    }
}

/// Shader-side LUT record
///
/// Each vector occupies a 16-byte slot (std430 `vec3` alignment); the
/// trailing padding floats are always zero.
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LutRecord {
    pub sun_direction: [f32; 3],
    pub _pad0: f32,
    pub sun_radiance: [f32; 3],
    pub _pad1: f32,
    pub sky_radiance: [f32; 3],
    pub _pad2: f32,
}

impl DirectionalLutEntry {
    /// Entry with `raw_direction` normalized and default metadata
    pub fn new(raw_direction: Vec3, sun_radiance: Vec3, sky_radiance: Vec3) -> Self {
        Self {
            sun_direction: raw_direction.normalize(),
            sun_radiance,
            sky_radiance,
            metadata: EntryMetadata::default(),
        }
    }

    pub fn to_record(&self) -> LutRecord {
        LutRecord {
            sun_direction: self.sun_direction.to_array(),
            sun_radiance: self.sun_radiance.to_array(),
            sky_radiance: self.sky_radiance.to_array(),
            ..LutRecord::zeroed()
        }
    }

    pub fn to_group(&self) -> Group {
        let mut root = Group::new();
        root.insert_dataset(SUN_DIRECTION, self.sun_direction.to_array().to_vec());
        root.insert_dataset(SUN_RADIANCE, self.sun_radiance.to_array().to_vec());
        root.insert_dataset(SKY_RADIANCE, self.sky_radiance.to_array().to_vec());

        let meta = &self.metadata;
        root.set_attribute(keys::DESCRIPTION, AttrValue::from(meta.description.as_str()));
        root.set_attribute(keys::VERSION, AttrValue::from(meta.version.as_str()));
        root.set_attribute(keys::MODE, AttrValue::from(meta.mode.as_str()));
        root.set_attribute(keys::WAVELENGTH_NM, AttrValue::from(meta.wavelength_nm));
        root
    }

    pub fn from_group(root: &Group) -> Result<Self> {
        let vector = |name: &'static str| -> Result<Vec3> {
            let dataset = root.dataset(name).ok_or(LutError::MissingDataset(name))?;
            if dataset.len() != 3 {
                return Err(LutError::DatasetLength {
                    name,
                    expected: 3,
                    found: dataset.len(),
                });
            }
            Ok(Vec3::from_slice(&dataset.values))
        };
        let string = |name: &'static str| -> Result<String> {
            root.attribute(name)
                .and_then(AttrValue::as_str)
                .map(str::to_string)
                .ok_or(LutError::MissingAttribute(name))
        };

        let sun_direction = vector(SUN_DIRECTION)?;
        let sun_radiance = vector(SUN_RADIANCE)?;
        let sky_radiance = vector(SKY_RADIANCE)?;
        let wavelength_nm = root
            .attribute(keys::WAVELENGTH_NM)
            .and_then(AttrValue::as_f32)
            .ok_or(LutError::MissingAttribute(keys::WAVELENGTH_NM))?;

        Ok(Self {
            sun_direction,
            sun_radiance,
            sky_radiance,
            metadata: EntryMetadata {
                description: string(keys::DESCRIPTION)?,
                version: string(keys::VERSION)?,
                mode: string(keys::MODE)?,
                wavelength_nm,
            },
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_h5_file(path, &self.to_group())?;
        info!(path = %path.display(), "saved single-entry LUT");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let entry = Self::from_group(&read_h5_file(path)?)?;
        info!(path = %path.display(), "loaded single-entry LUT");
        Ok(entry)
    }
}

/// Named lighting setups matching the renderer's test scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightingPreset {
    /// Three-point style key light from the upper left
    #[default]
    Standard,
    /// Low warm sun
    Morning,
    /// Sun almost straight overhead
    Noon,
    /// Sun behind the subject
    Backlight,
}

impl LightingPreset {
    pub const ALL: [LightingPreset; 4] = [
        LightingPreset::Standard,
        LightingPreset::Morning,
        LightingPreset::Noon,
        LightingPreset::Backlight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LightingPreset::Standard => "standard",
            LightingPreset::Morning => "morning",
            LightingPreset::Noon => "noon",
            LightingPreset::Backlight => "backlight",
        }
    }

    /// Un-normalized sun direction, sun radiance and sky radiance
    fn values(self) -> (Vec3, Vec3, Vec3) {
        match self {
            LightingPreset::Standard => (
                Vec3::new(-0.5, 0.8, -0.3),
                Vec3::splat(3.0),
                Vec3::new(0.3, 0.5, 0.8),
            ),
            LightingPreset::Morning => (
                Vec3::new(0.7, 0.3, -0.2),
                Vec3::new(4.0, 3.5, 2.8),
                Vec3::new(0.8, 0.6, 0.4),
            ),
            LightingPreset::Noon => (
                Vec3::new(0.0, 1.0, 0.1),
                Vec3::splat(5.0),
                Vec3::new(0.4, 0.6, 1.0),
            ),
            LightingPreset::Backlight => (
                Vec3::new(0.0, 0.5, 1.0),
                Vec3::splat(6.0),
                Vec3::new(0.2, 0.3, 0.5),
            ),
        }
    }

    pub fn entry(self) -> DirectionalLutEntry {
        let (direction, sun, sky) = self.values();
        DirectionalLutEntry::new(direction, sun, sky)
    }
}

impl fmt::Display for LightingPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LightingPreset {
    type Err = LutError;

    fn from_str(s: &str) -> Result<Self> {
        LightingPreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LutError::UnknownPreset(s.to_string()))
    }
}
