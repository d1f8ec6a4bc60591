//! Single-entry LUT file tests

use lut::directional::{keys, SKY_RADIANCE, SUN_DIRECTION, SUN_RADIANCE};
use lut::io::h5::AttrValue;
use lut::io::read_h5_file;
use lut::{DirectionalLutEntry, LightingPreset, LutError};
use std::fs;

#[test]
fn test_default_entry_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assets/luts/dummy_lut.h5");

    DirectionalLutEntry::default().save(&path).expect("save should succeed");

    let root = read_h5_file(&path).unwrap();
    let direction = &root.dataset(SUN_DIRECTION).unwrap().values;
    assert_eq!(direction.len(), 3);
    let norm = direction.iter().map(|v| v * v).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5, "direction norm: {norm}");

    assert_eq!(root.dataset(SUN_RADIANCE).unwrap().values, vec![3.0, 3.0, 3.0]);
    assert_eq!(root.dataset(SKY_RADIANCE).unwrap().values, vec![0.3, 0.5, 0.8]);

    let text = |key: &str| root.attribute(key).and_then(AttrValue::as_str);
    assert_eq!(text(keys::DESCRIPTION), Some("Dummy single-entry LUT for M1 testing"));
    assert_eq!(text(keys::VERSION), Some("1.0"));
    assert_eq!(text(keys::MODE), Some("rgb"));
    assert_eq!(
        root.attribute(keys::WAVELENGTH_NM).and_then(AttrValue::as_f32),
        Some(550.0)
    );
}

#[test]
fn test_repeated_save_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dummy_lut.h5");

    DirectionalLutEntry::default().save(&path).unwrap();
    let first = fs::read(&path).unwrap();
    DirectionalLutEntry::default().save(&path).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_presets_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    for preset in LightingPreset::ALL {
        let path = dir.path().join(format!("{preset}.h5"));
        let entry = preset.entry();
        entry.save(&path).unwrap();
        assert_eq!(DirectionalLutEntry::load(&path).unwrap(), entry, "{preset}");
    }
}

#[test]
fn test_preset_overwrites_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lut.h5");

    LightingPreset::Noon.entry().save(&path).unwrap();
    LightingPreset::Standard.entry().save(&path).unwrap();

    let loaded = DirectionalLutEntry::load(&path).unwrap();
    assert_eq!(loaded, DirectionalLutEntry::default());
}

#[test]
fn test_record_bytes_match_entry() {
    let entry = LightingPreset::Morning.entry();
    let record = entry.to_record();
    let bytes = bytemuck::bytes_of(&record);
    assert_eq!(bytes.len(), 48);

    let floats: &[f32] = bytemuck::cast_slice(bytes);
    assert_eq!(&floats[0..3], &entry.sun_direction.to_array());
    assert_eq!(&floats[8..11], &[0.8, 0.6, 0.4]);
}

#[test]
fn test_load_spectral_file_as_entry_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spectral.h5");
    lut::SpectralLutParams::default().generate().unwrap().save(&path).unwrap();

    assert!(matches!(
        DirectionalLutEntry::load(&path),
        Err(LutError::MissingDataset(SUN_DIRECTION))
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        DirectionalLutEntry::load(&dir.path().join("nope.h5")),
        Err(LutError::Io(_))
    ));
}
