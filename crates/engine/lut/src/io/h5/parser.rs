//! HDF5 parsing - Read file bytes back into a [`Group`] tree
//!
//! Handles version 0/1 superblocks, version 1 object headers (including
//! continuation blocks), symbol-table groups with multi-level v1 B-trees,
//! contiguous and compact `float` datasets, and scalar string/float
//! attributes. Anything else produces a typed [`H5Error`].

use super::constants::*;
use super::{align8, AttrValue, Attribute, Dataset, Group, H5Error, Node};
use std::collections::BTreeMap;
use tracing::debug;

/// Maximum number of header blocks followed for one object
const MAX_HEADER_CHUNKS: usize = 64;

/// Parse HDF5 file bytes into a group tree
///
/// # Example
///
/// ```
/// use lut::io::h5::{parse_h5, serialize_h5, Group};
///
/// let mut root = Group::new();
/// root.insert_dataset("values", vec![0.5]);
/// let parsed = parse_h5(&serialize_h5(&root).unwrap()).unwrap();
/// assert_eq!(parsed.dataset("values").unwrap().values, vec![0.5]);
/// ```
pub fn parse_h5(data: &[u8]) -> Result<Group, H5Error> {
    H5Parser::new(data).parse()
}

/// Raw header message borrowed from the file
struct RawMessage<'a> {
    kind: u16,
    body: &'a [u8],
}

/// Decoded dataspace
struct Dataspace {
    dims: Vec<u64>,
}

impl Dataspace {
    fn element_count(&self) -> Option<u64> {
        self.dims.iter().try_fold(1u64, |acc, &dim| acc.checked_mul(dim))
    }
}

/// Decoded datatype (only the variants LUT files use)
enum Datatype {
    Float { size: usize, big_endian: bool },
    FixedString { size: usize, space_padded: bool },
    Other { class: u8 },
}

/// Bounds-checked little-endian reader over a byte slice
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn bytes(&mut self, len: usize) -> Result<&'a [u8], H5Error> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(H5Error::TruncatedData {
                offset: self.pos,
                needed: len,
                available: self.data.len(),
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<(), H5Error> {
        self.bytes(len).map(|_| ())
    }

    fn u8(&mut self) -> Result<u8, H5Error> {
        Ok(self.bytes(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, H5Error> {
        let b = self.bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, H5Error> {
        let b = self.bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn u64(&mut self) -> Result<u64, H5Error> {
        let b = self.bytes(8)?;
        let mut array = [0u8; 8];
        array.copy_from_slice(b);
        Ok(u64::from_le_bytes(array))
    }

    fn expect_signature(&mut self, signature: &'static str) -> Result<(), H5Error> {
        let offset = self.pos;
        if self.bytes(signature.len())? != signature.as_bytes() {
            return Err(H5Error::BadSignature {
                expected: signature,
                offset,
            });
        }
        Ok(())
    }
}

/// HDF5 parser implementation
struct H5Parser<'a> {
    data: &'a [u8],
    /// Absolute position that file addresses are relative to
    base: usize,
}

impl<'a> H5Parser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, base: 0 }
    }

    fn parse(mut self) -> Result<Group, H5Error> {
        let root_header = self.parse_superblock()?;
        match self.parse_object(root_header, 0)? {
            Node::Group(group) => Ok(group),
            Node::Dataset(_) => Err(H5Error::Corrupt(
                "root object is a dataset, not a group".to_string(),
            )),
        }
    }

    /// Locate and decode the superblock, returning the root object header address
    fn parse_superblock(&mut self) -> Result<u64, H5Error> {
        // The superblock may follow a user block at 0, 512, 1024, 2048, ...
        let mut offset = 0usize;
        let start = loop {
            match self.data.get(offset..offset + SIGNATURE.len()) {
                Some(bytes) if bytes == SIGNATURE => break offset,
                Some(_) => offset = if offset == 0 { 512 } else { offset * 2 },
                None => return Err(H5Error::InvalidSignature),
            }
        };

        let mut cursor = Cursor::new(self.data, start + SIGNATURE.len());
        let version = cursor.u8()?;
        if version > 1 {
            return Err(H5Error::UnsupportedVersion {
                what: "superblock",
                version,
            });
        }
        cursor.skip(3)?; // free-space, root entry versions, reserved
        cursor.skip(1)?; // shared header message version
        let offsets = cursor.u8()?;
        let lengths = cursor.u8()?;
        if offsets != SIZEOF_OFFSET || lengths != SIZEOF_LENGTH {
            return Err(H5Error::UnsupportedAddressWidth { offsets, lengths });
        }
        cursor.skip(1)?;
        cursor.skip(4)?; // group leaf and internal node K
        cursor.skip(4)?; // consistency flags
        if version == 1 {
            cursor.skip(4)?; // indexed storage K + reserved
        }

        let base_address = cursor.u64()?;
        self.base = usize::try_from(base_address)
            .map_err(|_| H5Error::Corrupt(format!("base address 0x{base_address:x}")))?;
        cursor.skip(8)?; // free-space info address
        cursor.skip(8)?; // end of file address
        cursor.skip(8)?; // driver info block address

        // Root group symbol table entry
        cursor.skip(8)?; // link name offset
        cursor.u64()
    }

    fn resolve(&self, address: u64) -> Result<usize, H5Error> {
        if address == UNDEFINED_ADDRESS {
            return Err(H5Error::Corrupt("reference to undefined address".to_string()));
        }
        usize::try_from(address)
            .ok()
            .and_then(|a| a.checked_add(self.base))
            .filter(|&a| a < self.data.len())
            .ok_or(H5Error::TruncatedData {
                offset: address as usize,
                needed: 1,
                available: self.data.len(),
            })
    }

    fn cursor_at(&self, address: u64) -> Result<Cursor<'a>, H5Error> {
        Ok(Cursor::new(self.data, self.resolve(address)?))
    }

    fn parse_object(&self, address: u64, depth: usize) -> Result<Node, H5Error> {
        if depth > MAX_RECURSION_DEPTH {
            return Err(H5Error::RecursionLimit {
                max_depth: MAX_RECURSION_DEPTH,
            });
        }

        let messages = self.read_object_header(address)?;

        let find = |kind: u16| messages.iter().find(|m| m.kind == kind).map(|m| m.body);

        if let Some(stab) = find(MSG_SYMBOL_TABLE) {
            let mut cursor = Cursor::new(stab, 0);
            let btree = cursor.u64()?;
            let heap = cursor.u64()?;
            let attributes = self.decode_attributes(&messages)?;
            let members = self.read_group_members(btree, heap, depth)?;
            return Ok(Node::Group(Group {
                attributes,
                members,
            }));
        }

        if find(MSG_LINK_INFO).is_some() || find(MSG_LINK).is_some() {
            return Err(H5Error::Unsupported(
                "compact or dense link storage groups".to_string(),
            ));
        }

        if let Some(layout) = find(MSG_LAYOUT) {
            let dataspace = find(MSG_DATASPACE)
                .ok_or_else(|| H5Error::Corrupt("dataset without dataspace".to_string()))
                .and_then(decode_dataspace)?;
            let datatype = find(MSG_DATATYPE)
                .ok_or_else(|| H5Error::Corrupt("dataset without datatype".to_string()))
                .and_then(|body| decode_datatype(body).map(|(dt, _)| dt))?;

            if dataspace.dims.len() != 1 {
                return Err(H5Error::Unsupported(format!(
                    "dataset of rank {}",
                    dataspace.dims.len()
                )));
            }
            let Datatype::Float { size, big_endian } = datatype else {
                return Err(H5Error::Unsupported("non-float dataset".to_string()));
            };

            let count = dataspace
                .element_count()
                .and_then(|count| usize::try_from(count).ok())
                .filter(|count| count.checked_mul(size).is_some())
                .ok_or_else(|| H5Error::Corrupt("dataset too large".to_string()))?;
            let raw = self.read_layout(layout, count * size)?;
            let values = decode_floats(raw, count, size, big_endian)?;
            let attributes = self.decode_attributes(&messages)?;

            return Ok(Node::Dataset(Dataset { values, attributes }));
        }

        Err(H5Error::Unsupported(format!(
            "object at 0x{address:x} is neither a group nor a dataset"
        )))
    }

    /// Collect the messages of a version 1 object header, following continuations
    fn read_object_header(&self, address: u64) -> Result<Vec<RawMessage<'a>>, H5Error> {
        let mut cursor = self.cursor_at(address)?;
        let version = cursor.u8()?;
        if version != 1 {
            // Version 2 headers start with "OHDR", whose first byte is 'O'
            let version = if version == b'O' { 2 } else { version };
            return Err(H5Error::UnsupportedVersion {
                what: "object header",
                version,
            });
        }
        cursor.skip(1)?;
        let message_count = cursor.u16()? as usize;
        cursor.skip(4)?; // reference count
        let chunk_size = cursor.u32()? as usize;
        cursor.skip(4)?;

        let mut chunks = vec![(cursor.pos, chunk_size)];
        let mut messages = Vec::with_capacity(message_count);
        let mut seen = 0usize;
        let mut chunks_read = 0usize;

        while let Some((start, size)) = chunks.pop() {
            chunks_read += 1;
            if chunks_read > MAX_HEADER_CHUNKS {
                return Err(H5Error::Corrupt(
                    "too many object header continuation blocks".to_string(),
                ));
            }
            let chunk = Cursor::new(self.data, start).bytes(size)?;
            let mut cursor = Cursor::new(chunk, 0);

            while cursor.pos + MESSAGE_PREFIX_SIZE <= chunk.len() && seen < message_count {
                let kind = cursor.u16()?;
                let body_size = cursor.u16()? as usize;
                cursor.skip(4)?; // flags + reserved
                let body = cursor.bytes(body_size)?;
                seen += 1;

                match kind {
                    MSG_NIL => {}
                    MSG_CONTINUATION => {
                        let mut continuation = Cursor::new(body, 0);
                        let offset = continuation.u64()?;
                        let length = continuation.u64()? as usize;
                        chunks.push((self.resolve(offset)?, length));
                    }
                    _ => messages.push(RawMessage { kind, body }),
                }
            }
        }

        Ok(messages)
    }

    fn read_group_members(
        &self,
        btree: u64,
        heap: u64,
        depth: usize,
    ) -> Result<BTreeMap<String, Node>, H5Error> {
        let heap_data = self.read_local_heap(heap)?;

        let mut entries = Vec::new();
        self.read_btree(btree, &mut entries, 0)?;

        let mut members = BTreeMap::new();
        for (name_offset, header) in entries {
            let name = heap_string(heap_data, name_offset)?;
            let node = self.parse_object(header, depth + 1)?;
            members.insert(name, node);
        }
        Ok(members)
    }

    /// Return the data segment of a local heap
    fn read_local_heap(&self, address: u64) -> Result<&'a [u8], H5Error> {
        let mut cursor = self.cursor_at(address)?;
        cursor.expect_signature("HEAP")?;
        let version = cursor.u8()?;
        if version != 0 {
            return Err(H5Error::UnsupportedVersion {
                what: "local heap",
                version,
            });
        }
        cursor.skip(3)?;
        let size = cursor.u64()? as usize;
        cursor.skip(8)?; // free list head
        let data_address = cursor.u64()?;

        self.cursor_at(data_address)?.bytes(size)
    }

    /// Walk a group B-tree, appending (name offset, object header) pairs
    fn read_btree(
        &self,
        address: u64,
        entries: &mut Vec<(u64, u64)>,
        depth: usize,
    ) -> Result<(), H5Error> {
        if depth > MAX_RECURSION_DEPTH {
            return Err(H5Error::RecursionLimit {
                max_depth: MAX_RECURSION_DEPTH,
            });
        }

        let mut cursor = self.cursor_at(address)?;
        cursor.expect_signature("TREE")?;
        let node_type = cursor.u8()?;
        if node_type != 0 {
            return Err(H5Error::Corrupt(format!(
                "expected group B-tree node, found type {node_type}"
            )));
        }
        let level = cursor.u8()?;
        let used = cursor.u16()? as usize;
        cursor.skip(16)?; // siblings
        cursor.skip(8)?; // key 0

        for _ in 0..used {
            let child = cursor.u64()?;
            cursor.skip(8)?; // right key
            if level == 0 {
                self.read_symbol_node(child, entries)?;
            } else {
                self.read_btree(child, entries, depth + 1)?;
            }
        }
        Ok(())
    }

    fn read_symbol_node(&self, address: u64, entries: &mut Vec<(u64, u64)>) -> Result<(), H5Error> {
        let mut cursor = self.cursor_at(address)?;
        cursor.expect_signature("SNOD")?;
        let version = cursor.u8()?;
        if version != 1 {
            return Err(H5Error::UnsupportedVersion {
                what: "symbol table node",
                version,
            });
        }
        cursor.skip(1)?;
        let count = cursor.u16()? as usize;

        for _ in 0..count {
            let name_offset = cursor.u64()?;
            let header = cursor.u64()?;
            cursor.skip(4 + 4 + 16)?; // cache type, reserved, scratch pad
            entries.push((name_offset, header));
        }
        Ok(())
    }

    fn read_layout(&self, body: &'a [u8], expected: usize) -> Result<&'a [u8], H5Error> {
        let mut cursor = Cursor::new(body, 0);
        let version = cursor.u8()?;
        if version != 3 {
            return Err(H5Error::UnsupportedVersion {
                what: "data layout",
                version,
            });
        }

        let raw = match cursor.u8()? {
            LAYOUT_COMPACT => {
                let size = cursor.u16()? as usize;
                cursor.bytes(size)?
            }
            LAYOUT_CONTIGUOUS => {
                let address = cursor.u64()?;
                let size = cursor.u64()? as usize;
                if address == UNDEFINED_ADDRESS || size == 0 {
                    // Storage never allocated: zero-length dataset
                    return if expected == 0 {
                        Ok(&[])
                    } else {
                        Err(H5Error::Corrupt("dataset storage not allocated".to_string()))
                    };
                }
                self.cursor_at(address)?.bytes(size)?
            }
            LAYOUT_CHUNKED => {
                return Err(H5Error::Unsupported("chunked dataset storage".to_string()))
            }
            other => return Err(H5Error::Corrupt(format!("layout class {other}"))),
        };

        if raw.len() < expected {
            return Err(H5Error::TruncatedData {
                offset: 0,
                needed: expected,
                available: raw.len(),
            });
        }
        Ok(&raw[..expected])
    }

    fn decode_attributes(&self, messages: &[RawMessage<'a>]) -> Result<Vec<Attribute>, H5Error> {
        let mut attributes = Vec::new();
        for message in messages.iter().filter(|m| m.kind == MSG_ATTRIBUTE) {
            if let Some(attribute) = decode_attribute(message.body)? {
                attributes.push(attribute);
            }
        }
        Ok(attributes)
    }
}

fn heap_string(heap: &[u8], offset: u64) -> Result<String, H5Error> {
    let start = usize::try_from(offset)
        .ok()
        .filter(|&start| start < heap.len())
        .ok_or_else(|| H5Error::Corrupt(format!("name offset {offset} outside local heap")))?;
    let len = heap[start..]
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| H5Error::Corrupt("unterminated name in local heap".to_string()))?;
    decode_utf8(&heap[start..start + len])
}

fn decode_utf8(bytes: &[u8]) -> Result<String, H5Error> {
    String::from_utf8(bytes.to_vec())
        .map_err(|_| H5Error::Corrupt("string is not valid UTF-8".to_string()))
}

fn decode_dataspace(body: &[u8]) -> Result<Dataspace, H5Error> {
    let mut cursor = Cursor::new(body, 0);
    let version = cursor.u8()?;
    let rank = cursor.u8()? as usize;
    let _flags = cursor.u8()?;

    match version {
        1 => cursor.skip(5)?,
        2 => {
            // Dataspace type: 0 scalar, 1 simple, 2 null
            if cursor.u8()? == 2 {
                return Ok(Dataspace { dims: vec![0] });
            }
        }
        _ => {
            return Err(H5Error::UnsupportedVersion {
                what: "dataspace",
                version,
            })
        }
    }

    let dims = (0..rank).map(|_| cursor.u64()).collect::<Result<_, _>>()?;
    Ok(Dataspace { dims })
}

/// Decode a datatype message, returning it with its encoded length
fn decode_datatype(body: &[u8]) -> Result<(Datatype, usize), H5Error> {
    let mut cursor = Cursor::new(body, 0);
    let class_and_version = cursor.u8()?;
    let class = class_and_version & 0x0F;
    let bits0 = cursor.u8()?;
    cursor.skip(2)?;
    let size = cursor.u32()? as usize;

    let datatype = match class {
        CLASS_FLOAT => {
            cursor.skip(12)?;
            // Bit 0 is byte order; bit 6 marks VAX order, which is not supported
            if bits0 & 0x40 != 0 {
                return Err(H5Error::Unsupported("VAX byte order".to_string()));
            }
            Datatype::Float {
                size,
                big_endian: bits0 & 0x01 != 0,
            }
        }
        CLASS_STRING => Datatype::FixedString {
            size,
            space_padded: bits0 & 0x0F == 2,
        },
        other => Datatype::Other { class: other },
    };

    Ok((datatype, cursor.pos))
}

fn decode_floats(
    raw: &[u8],
    count: usize,
    size: usize,
    big_endian: bool,
) -> Result<Vec<f32>, H5Error> {
    match size {
        4 => Ok(raw
            .chunks_exact(4)
            .take(count)
            .map(|b| {
                let bytes = [b[0], b[1], b[2], b[3]];
                if big_endian {
                    f32::from_be_bytes(bytes)
                } else {
                    f32::from_le_bytes(bytes)
                }
            })
            .collect()),
        // Narrowed the way libhdf5 converts to NATIVE_FLOAT on read
        8 => Ok(raw
            .chunks_exact(8)
            .take(count)
            .map(|b| {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(b);
                let value = if big_endian {
                    f64::from_be_bytes(bytes)
                } else {
                    f64::from_le_bytes(bytes)
                };
                value as f32
            })
            .collect()),
        other => Err(H5Error::Unsupported(format!("{other}-byte float"))),
    }
}

/// Decode an attribute message; `Ok(None)` for datatypes outside the subset
fn decode_attribute(body: &[u8]) -> Result<Option<Attribute>, H5Error> {
    let mut cursor = Cursor::new(body, 0);
    let version = cursor.u8()?;
    if !(1..=3).contains(&version) {
        return Err(H5Error::UnsupportedVersion {
            what: "attribute",
            version,
        });
    }
    let flags = cursor.u8()?;
    let name_len = cursor.u16()? as usize;
    let datatype_len = cursor.u16()? as usize;
    let dataspace_len = cursor.u16()? as usize;
    if version == 3 {
        cursor.skip(1)?; // name character set
    }

    // Version 1 pads each field to 8 bytes
    let padded = |len: usize| if version == 1 { align8(len) } else { len };

    let name_bytes = cursor.bytes(padded(name_len))?;
    let name_end = name_bytes[..name_len.min(name_bytes.len())]
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(name_len);
    let name = decode_utf8(&name_bytes[..name_end])?;

    if version >= 2 && flags & 0x03 != 0 {
        debug!(attribute = %name, "skipping attribute with shared datatype or dataspace");
        return Ok(None);
    }

    let (datatype, _) = decode_datatype(cursor.bytes(padded(datatype_len))?)?;
    let dataspace = decode_dataspace(cursor.bytes(padded(dataspace_len))?)?;
    if dataspace.element_count() != Some(1) {
        debug!(attribute = %name, "skipping non-scalar attribute");
        return Ok(None);
    }

    let value = match datatype {
        Datatype::Float { size, big_endian } => {
            let raw = cursor.bytes(size)?;
            let values = decode_floats(raw, 1, size, big_endian)?;
            AttrValue::F32(values[0])
        }
        Datatype::FixedString { size, space_padded } => {
            let raw = cursor.bytes(size)?;
            let mut end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
            if space_padded {
                while end > 0 && raw[end - 1] == b' ' {
                    end -= 1;
                }
            }
            AttrValue::Str(decode_utf8(&raw[..end])?)
        }
        Datatype::Other { class } => {
            let kind = if class == CLASS_VARIABLE_LENGTH {
                "variable-length"
            } else {
                "unsupported"
            };
            debug!(attribute = %name, class, "skipping {kind} attribute");
            return Ok(None);
        }
    };

    Ok(Some(Attribute { name, value }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::h5::serialize_h5;

    #[test]
    fn test_rejects_missing_signature() {
        assert_eq!(parse_h5(b"not an hdf5 file"), Err(H5Error::InvalidSignature));
        assert_eq!(parse_h5(&[]), Err(H5Error::InvalidSignature));
    }

    #[test]
    fn test_rejects_newer_superblock() {
        let mut bytes = serialize_h5(&Group::new()).unwrap();
        bytes[8] = 2;
        assert!(matches!(
            parse_h5(&bytes),
            Err(H5Error::UnsupportedVersion {
                what: "superblock",
                version: 2
            })
        ));
    }

    #[test]
    fn test_rejects_truncated_file() {
        let mut root = Group::new();
        root.insert_dataset("values", vec![1.0, 2.0, 3.0]);
        let bytes = serialize_h5(&root).unwrap();

        let result = parse_h5(&bytes[..bytes.len() - 8]);
        assert!(result.is_err(), "truncated file must not parse");
    }

    #[test]
    fn test_finds_superblock_after_user_block() {
        let mut root = Group::new();
        root.insert_dataset("values", vec![4.0]);
        let bytes = serialize_h5(&root).unwrap();

        // A 512-byte user block shifts every address by the base address
        let mut shifted = vec![0u8; 512];
        shifted.extend_from_slice(&bytes);
        shifted[512 + 24..512 + 32].copy_from_slice(&512u64.to_le_bytes());
        // Addresses stay relative to the base, so only the base field changes
        let parsed = parse_h5(&shifted).unwrap();
        assert_eq!(parsed, root);
    }

    #[test]
    fn test_decode_big_endian_and_double_floats() {
        let be = 1.5f32.to_be_bytes();
        assert_eq!(decode_floats(&be, 1, 4, true).unwrap(), vec![1.5]);

        let double = 0.25f64.to_le_bytes();
        assert_eq!(decode_floats(&double, 1, 8, false).unwrap(), vec![0.25]);

        assert!(decode_floats(&[0, 0], 1, 2, false).is_err());
    }

    #[test]
    fn test_space_padded_string_attribute() {
        // Version 1 attribute "s" holding a 6-byte space-padded "ab"
        let mut body = vec![1, 0];
        body.extend_from_slice(&2u16.to_le_bytes()); // "s\0"
        body.extend_from_slice(&8u16.to_le_bytes());
        body.extend_from_slice(&8u16.to_le_bytes());
        body.extend_from_slice(b"s\0\0\0\0\0\0\0");
        body.extend_from_slice(&[0x13, 0x02, 0, 0]);
        body.extend_from_slice(&6u32.to_le_bytes());
        body.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0]);
        body.extend_from_slice(b"ab    ");

        let attribute = decode_attribute(&body).unwrap().unwrap();
        assert_eq!(attribute.name, "s");
        assert_eq!(attribute.value, AttrValue::from("ab"));
    }

    #[test]
    fn test_skips_variable_length_attribute() {
        let mut body = vec![1, 0];
        body.extend_from_slice(&2u16.to_le_bytes());
        body.extend_from_slice(&8u16.to_le_bytes());
        body.extend_from_slice(&8u16.to_le_bytes());
        body.extend_from_slice(b"v\0\0\0\0\0\0\0");
        body.extend_from_slice(&[0x19, 0x01, 0, 0]);
        body.extend_from_slice(&16u32.to_le_bytes());
        body.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0]);
        body.extend_from_slice(&[0u8; 16]);

        assert_eq!(decode_attribute(&body).unwrap(), None);
    }
}
