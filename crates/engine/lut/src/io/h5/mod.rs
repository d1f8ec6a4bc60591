//! Minimal HDF5 container support for LUT files
//!
//! Writes and reads the subset of HDF5 that LUT files need: a tree of
//! groups holding one-dimensional `float32` datasets, with string and
//! `float32` scalar attributes on any object. Files are readable by
//! libhdf5 (and therefore h5py, H5Cpp, ...).
//!
//! # Example
//!
//! ```
//! use lut::io::h5::{parse_h5, serialize_h5, AttrValue, Group};
//!
//! let mut root = Group::new();
//! root.insert_dataset("wavelengths", vec![380.0, 550.0, 780.0]);
//! root.set_attribute("description", AttrValue::from("test"));
//!
//! let bytes = serialize_h5(&root).unwrap();
//! let parsed = parse_h5(&bytes).unwrap();
//! assert_eq!(root, parsed);
//! ```
//!
//! # File Layout
//!
//! ```text
//! [Superblock v0: 96 bytes]
//!   Signature, version bytes, K values, EOF address,
//!   root group symbol table entry (B-tree + local heap cached)
//!
//! [Objects: post-order, 8-byte aligned]
//!   Dataset:  raw little-endian f32 data, then v1 object header
//!             (dataspace, datatype, fill value, layout, attributes)
//!   Group:    local heap (member names), symbol table nodes,
//!             v1 B-tree node, then v1 object header
//!             (symbol table message, attributes)
//! ```
//!
//! Writing is deterministic: the same tree always produces the same bytes.

pub mod parser;
pub mod serializer;

use std::collections::BTreeMap;
use thiserror::Error;

/// HDF5 container errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum H5Error {
    /// No HDF5 signature where a superblock was expected
    #[error("not an HDF5 file: signature not found")]
    InvalidSignature,

    /// A structure uses a format version this reader does not handle
    #[error("unsupported {what} version {version}")]
    UnsupportedVersion { what: &'static str, version: u8 },

    /// Offsets or lengths other than 8 bytes wide
    #[error("unsupported address width: offsets {offsets} bytes, lengths {lengths} bytes")]
    UnsupportedAddressWidth { offsets: u8, lengths: u8 },

    /// A feature outside the supported subset
    #[error("unsupported HDF5 feature: {0}")]
    Unsupported(String),

    /// Read past the end of the file
    #[error("truncated data: need {needed} bytes at offset {offset}, file is {available} bytes")]
    TruncatedData {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Structure signature mismatch ("HEAP", "TREE", "SNOD")
    #[error("bad {expected} signature at offset 0x{offset:x}")]
    BadSignature {
        expected: &'static str,
        offset: usize,
    },

    /// Structurally inconsistent file contents
    #[error("corrupt file: {0}")]
    Corrupt(String),

    /// Object or attribute name that cannot be stored
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// String attribute value that cannot be stored
    #[error("invalid string value for attribute {name:?}: contains NUL byte")]
    InvalidString { name: String },

    /// Group with more members than one B-tree node can index
    #[error("group has {count} members, at most {max} supported")]
    TooManyMembers { count: usize, max: usize },

    /// Header message body longer than a v1 message can hold
    #[error("header message of {size} bytes exceeds the 65535-byte limit")]
    MessageTooLarge { size: usize },

    /// Group or B-tree nesting deeper than `MAX_RECURSION_DEPTH`
    #[error("recursion limit exceeded: max depth is {max_depth}")]
    RecursionLimit { max_depth: usize },
}

/// Value of a scalar attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Fixed-length, null-terminated string
    Str(String),
    /// IEEE 754 single precision scalar
    F32(f32),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            AttrValue::F32(_) => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            AttrValue::F32(v) => Some(*v),
            AttrValue::Str(_) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        AttrValue::F32(value)
    }
}

/// Named attribute attached to a group or dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
}

/// One-dimensional `float32` dataset
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub values: Vec<f32>,
    pub attributes: Vec<Attribute>,
}

impl Dataset {
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            values,
            attributes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: AttrValue) {
        set_attribute(&mut self.attributes, name.into(), value);
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        find_attribute(&self.attributes, name)
    }
}

/// Group member
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Dataset(Dataset),
}

/// HDF5 group: attributes plus named members
///
/// Members are kept sorted by name, which is also the order HDF5 symbol
/// tables require on disk.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub attributes: Vec<Attribute>,
    pub members: BTreeMap<String, Node>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any existing attribute with the same name
    pub fn set_attribute(&mut self, name: impl Into<String>, value: AttrValue) {
        set_attribute(&mut self.attributes, name.into(), value);
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        find_attribute(&self.attributes, name)
    }

    /// Insert a member, replacing any existing member with the same name
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<Node>) {
        self.members.insert(name.into(), node.into());
    }

    pub fn insert_dataset(&mut self, name: impl Into<String>, values: Vec<f32>) {
        self.insert(name, Dataset::new(values));
    }

    pub fn insert_group(&mut self, name: impl Into<String>, group: Group) {
        self.insert(name, group);
    }

    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        match self.members.get(name) {
            Some(Node::Dataset(dataset)) => Some(dataset),
            _ => None,
        }
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        match self.members.get(name) {
            Some(Node::Group(group)) => Some(group),
            _ => None,
        }
    }
}

impl From<Dataset> for Node {
    fn from(dataset: Dataset) -> Self {
        Node::Dataset(dataset)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

fn find_attribute<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a AttrValue> {
    attributes
        .iter()
        .find(|attr| attr.name == name)
        .map(|attr| &attr.value)
}

fn set_attribute(attributes: &mut Vec<Attribute>, name: String, value: AttrValue) {
    match attributes.iter_mut().find(|attr| attr.name == name) {
        Some(existing) => existing.value = value,
        None => attributes.push(Attribute { name, value }),
    }
}

/// HDF5 format constants for the supported subset
pub mod constants {
    /// File signature: `\x89HDF\r\n\x1a\n`
    pub const SIGNATURE: [u8; 8] = [0x89, b'H', b'D', b'F', b'\r', b'\n', 0x1A, b'\n'];

    /// Size of a version 0 superblock with 8-byte offsets and lengths
    pub const SUPERBLOCK_SIZE: usize = 96;

    /// Width of file addresses and lengths
    pub const SIZEOF_OFFSET: u8 = 8;
    pub const SIZEOF_LENGTH: u8 = 8;

    /// Undefined address (all bits set)
    pub const UNDEFINED_ADDRESS: u64 = u64::MAX;

    /// Group leaf node K: a symbol table node holds up to 2K entries
    pub const GROUP_LEAF_K: u16 = 4;
    /// Group internal node K: a B-tree node holds up to 2K children
    pub const GROUP_INTERNAL_K: u16 = 16;

    /// Entries per symbol table node
    pub const SNOD_CAPACITY: usize = 2 * GROUP_LEAF_K as usize;
    /// Children per B-tree node
    pub const BTREE_CAPACITY: usize = 2 * GROUP_INTERNAL_K as usize;
    /// Members a group can hold with a single-level B-tree
    pub const MAX_GROUP_MEMBERS: usize = SNOD_CAPACITY * BTREE_CAPACITY;

    /// Symbol table entry: name offset, header address, cache type, reserved, scratch
    pub const SYMBOL_ENTRY_SIZE: usize = 8 + 8 + 4 + 4 + 16;
    /// "SNOD", version, reserved, symbol count, then 2K entries
    pub const SNOD_SIZE: usize = 8 + SNOD_CAPACITY * SYMBOL_ENTRY_SIZE;
    /// "TREE", type, level, entries used, siblings, 2K children and 2K+1 keys
    pub const BTREE_NODE_SIZE: usize = 24 + BTREE_CAPACITY * 8 + (BTREE_CAPACITY + 1) * 8;
    /// "HEAP", version, reserved, data size, free list head, data address
    pub const LOCAL_HEAP_HEADER_SIZE: usize = 32;
    /// Version 1 object header prefix including alignment padding
    pub const OBJECT_HEADER_PREFIX_SIZE: usize = 16;
    /// Version 1 header message prefix: type, size, flags, reserved
    pub const MESSAGE_PREFIX_SIZE: usize = 8;

    /// Free-list terminator used by libhdf5 local heaps
    pub const HEAP_FREE_NULL: u64 = 1;
    /// Smallest free block: next-offset and size fields
    pub const HEAP_FREE_BLOCK_SIZE: usize = 16;

    // Symbol table entry cache types
    pub const CACHE_NONE: u32 = 0;
    pub const CACHE_SYMBOL_TABLE: u32 = 1;

    // Header message types
    pub const MSG_NIL: u16 = 0x0000;
    pub const MSG_DATASPACE: u16 = 0x0001;
    pub const MSG_LINK_INFO: u16 = 0x0002;
    pub const MSG_DATATYPE: u16 = 0x0003;
    pub const MSG_FILL_VALUE: u16 = 0x0005;
    pub const MSG_LINK: u16 = 0x0006;
    pub const MSG_LAYOUT: u16 = 0x0008;
    pub const MSG_ATTRIBUTE: u16 = 0x000C;
    pub const MSG_CONTINUATION: u16 = 0x0010;
    pub const MSG_SYMBOL_TABLE: u16 = 0x0011;

    // Datatype classes
    pub const CLASS_FLOAT: u8 = 1;
    pub const CLASS_STRING: u8 = 3;
    pub const CLASS_VARIABLE_LENGTH: u8 = 9;

    // Data layout classes
    pub const LAYOUT_COMPACT: u8 = 0;
    pub const LAYOUT_CONTIGUOUS: u8 = 1;
    pub const LAYOUT_CHUNKED: u8 = 2;

    /// Maximum group nesting depth accepted by reader and writer
    pub const MAX_RECURSION_DEPTH: usize = 32;
}

/// Round `n` up to the next multiple of 8
pub(crate) fn align8(n: usize) -> usize {
    (n + 7) & !7
}

// Re-export public API
pub use parser::parse_h5;
pub use serializer::serialize_h5;
