//! HDF5 container round-trip tests
//!
//! Verifies that parse(serialize(X)) == X for the trees LUT files use and
//! that re-serializing a parsed tree reproduces the original bytes.

use lut::io::h5::{parse_h5, serialize_h5, AttrValue, Dataset, Group, H5Error};

/// Helper: Assert structural round-trip and canonical encoding
fn assert_roundtrip(root: &Group) {
    let bytes1 = serialize_h5(root).expect("Serialization should succeed");
    let parsed = parse_h5(&bytes1).expect("Deserialization should succeed");
    assert_eq!(root, &parsed, "Parsed tree must equal original tree");

    let bytes2 = serialize_h5(&parsed).expect("Re-serialization should succeed");
    assert_eq!(
        bytes1,
        bytes2,
        "Re-serialization produced different bytes ({} vs {})",
        bytes1.len(),
        bytes2.len()
    );
}

/// Helper: Group with `count` small datasets named `d000`, `d001`, ...
fn wide_group(count: usize) -> Group {
    let mut group = Group::new();
    for i in 0..count {
        group.insert_dataset(format!("d{i:03}"), vec![i as f32, -(i as f32)]);
    }
    group
}

#[test]
fn test_empty_root() {
    assert_roundtrip(&Group::new());
}

#[test]
fn test_single_dataset() {
    let mut root = Group::new();
    root.insert_dataset("wavelengths", vec![380.0, 550.0, 2500.0]);
    assert_roundtrip(&root);
}

#[test]
fn test_exact_float_values_survive() {
    let values = vec![
        0.0,
        -0.0,
        f32::MIN_POSITIVE,
        1.0e-30,
        std::f32::consts::PI,
        f32::MAX,
        -123.456,
    ];
    let mut root = Group::new();
    root.insert_dataset("values", values.clone());

    let parsed = parse_h5(&serialize_h5(&root).unwrap()).unwrap();
    let read = &parsed.dataset("values").unwrap().values;
    let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(read), bits(&values));
}

#[test]
fn test_empty_dataset() {
    let mut root = Group::new();
    root.insert_dataset("empty", Vec::new());
    assert_roundtrip(&root);
}

#[test]
fn test_attributes_on_root_group_and_dataset() {
    let mut dataset = Dataset::new(vec![1.0, 2.0, 3.0]);
    dataset.set_attribute("units", AttrValue::from("nm"));
    dataset.set_attribute("scale", AttrValue::from(0.5f32));

    let mut metadata = Group::new();
    metadata.set_attribute("model", AttrValue::from("Dummy_Rayleigh"));
    metadata.set_attribute("empty", AttrValue::from(""));

    let mut root = Group::new();
    root.set_attribute("description", AttrValue::from("round trip"));
    root.set_attribute("wavelength_nm", AttrValue::from(550.0f32));
    root.insert("data", dataset);
    root.insert_group("metadata", metadata);

    assert_roundtrip(&root);
}

#[test]
fn test_non_ascii_string_attribute() {
    let mut root = Group::new();
    root.set_attribute("units", AttrValue::from("W/m²/sr/nm · λ"));
    assert_roundtrip(&root);
}

#[test]
fn test_long_attribute_and_member_names() {
    let long = "n".repeat(300);
    let mut root = Group::new();
    root.set_attribute(long.clone(), AttrValue::from("x".repeat(1000)));
    root.insert_dataset(long, vec![1.0]);
    assert_roundtrip(&root);
}

#[test]
fn test_nested_groups() {
    let mut inner = Group::new();
    inner.insert_dataset("leaf", vec![42.0]);
    inner.set_attribute("level", AttrValue::from(2.0f32));

    let mut middle = Group::new();
    middle.insert_group("inner", inner);
    middle.insert_group("sibling", Group::new());

    let mut root = Group::new();
    root.insert_group("middle", middle);
    assert_roundtrip(&root);
}

#[test]
fn test_group_spanning_several_symbol_nodes() {
    // 8 entries per symbol table node
    for count in [7, 8, 9, 17, 64] {
        assert_roundtrip(&wide_group(count));
    }
}

#[test]
fn test_group_at_member_limit() {
    assert_roundtrip(&wide_group(256));
    assert!(matches!(
        serialize_h5(&wide_group(257)),
        Err(H5Error::TooManyMembers { count: 257, max: 256 })
    ));
}

#[test]
fn test_large_dataset() {
    let values: Vec<f32> = (0..100_000).map(|i| i as f32 * 0.25).collect();
    let mut root = Group::new();
    root.insert_dataset("big", values);
    assert_roundtrip(&root);
}

#[test]
fn test_truncated_files_are_rejected() {
    let mut root = Group::new();
    root.insert_dataset("wavelengths", vec![1.0, 2.0, 3.0]);
    root.set_attribute("description", AttrValue::from("truncate me"));
    let bytes = serialize_h5(&root).unwrap();

    for len in [0, 8, 95, 96, bytes.len() / 2, bytes.len() - 1] {
        assert!(
            parse_h5(&bytes[..len]).is_err(),
            "truncated to {len} bytes should fail"
        );
    }
}

#[test]
fn test_corrupted_signature_is_rejected() {
    let mut bytes = serialize_h5(&Group::new()).unwrap();
    bytes[1] = b'X';
    assert!(parse_h5(&bytes).is_err());
}
