//! HDF5 serialization - Convert a [`Group`] tree to file bytes

use super::constants::*;
use super::{align8, AttrValue, Attribute, Dataset, Group, H5Error, Node};

/// Serialize a group tree to HDF5 file bytes
///
/// # Example
///
/// ```
/// use lut::io::h5::{serialize_h5, Group};
///
/// let mut root = Group::new();
/// root.insert_dataset("values", vec![1.0, 2.0]);
/// let bytes = serialize_h5(&root).unwrap();
/// assert_eq!(&bytes[..4], b"\x89HDF");
/// ```
pub fn serialize_h5(root: &Group) -> Result<Vec<u8>, H5Error> {
    H5Writer::new().serialize(root)
}

/// Addresses cached in a group's symbol table entry
#[derive(Debug, Clone, Copy)]
struct GroupAddresses {
    header: u64,
    btree: u64,
    heap: u64,
}

/// Header message awaiting encoding
struct Message {
    kind: u16,
    body: Vec<u8>,
}

/// HDF5 writer implementation
///
/// Objects are appended bottom-up (children before their parent) so every
/// address a structure refers to is already known when it is written.
struct H5Writer {
    buffer: Vec<u8>,
}

impl H5Writer {
    fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    fn serialize(mut self, root: &Group) -> Result<Vec<u8>, H5Error> {
        // Superblock placeholder
        self.buffer.resize(SUPERBLOCK_SIZE, 0);

        let root_addresses = self.write_group(root, 0)?;
        self.write_superblock(root_addresses);

        Ok(self.buffer)
    }

    fn write_superblock(&mut self, root: GroupAddresses) {
        let eof = self.buffer.len() as u64;

        let mut sb = Vec::with_capacity(SUPERBLOCK_SIZE);
        sb.extend_from_slice(&SIGNATURE);
        // Superblock, free-space, root entry and shared header versions
        sb.extend_from_slice(&[0, 0, 0, 0]);
        sb.extend_from_slice(&[0, SIZEOF_OFFSET, SIZEOF_LENGTH, 0]);
        sb.extend_from_slice(&GROUP_LEAF_K.to_le_bytes());
        sb.extend_from_slice(&GROUP_INTERNAL_K.to_le_bytes());
        // File consistency flags
        sb.extend_from_slice(&0u32.to_le_bytes());
        // Base address, free-space info, EOF, driver info block
        sb.extend_from_slice(&0u64.to_le_bytes());
        sb.extend_from_slice(&UNDEFINED_ADDRESS.to_le_bytes());
        sb.extend_from_slice(&eof.to_le_bytes());
        sb.extend_from_slice(&UNDEFINED_ADDRESS.to_le_bytes());
        write_symbol_entry(&mut sb, 0, root.header, Some(root));

        debug_assert_eq!(sb.len(), SUPERBLOCK_SIZE);
        self.buffer[..SUPERBLOCK_SIZE].copy_from_slice(&sb);
    }

    fn write_group(&mut self, group: &Group, depth: usize) -> Result<GroupAddresses, H5Error> {
        if depth > MAX_RECURSION_DEPTH {
            return Err(H5Error::RecursionLimit {
                max_depth: MAX_RECURSION_DEPTH,
            });
        }

        if group.members.len() > MAX_GROUP_MEMBERS {
            return Err(H5Error::TooManyMembers {
                count: group.members.len(),
                max: MAX_GROUP_MEMBERS,
            });
        }

        // BTreeMap iteration is byte-wise sorted, the order symbol tables need
        let mut children = Vec::with_capacity(group.members.len());
        for (name, node) in &group.members {
            validate_name(name)?;
            let header = match node {
                Node::Group(subgroup) => self.write_group(subgroup, depth + 1)?.header,
                Node::Dataset(dataset) => self.write_dataset(dataset)?,
            };
            children.push((name.as_str(), header));
        }

        // Local heap: empty string at offset 0, then member names
        let mut heap_data = vec![0u8; 8];
        let mut name_offsets = Vec::with_capacity(children.len());
        for (name, _) in &children {
            name_offsets.push(heap_data.len() as u64);
            heap_data.extend_from_slice(name.as_bytes());
            heap_data.push(0);
            heap_data.resize(align8(heap_data.len()), 0);
        }
        let free_offset = heap_data.len() as u64;
        heap_data.extend_from_slice(&HEAP_FREE_NULL.to_le_bytes());
        heap_data.extend_from_slice(&(HEAP_FREE_BLOCK_SIZE as u64).to_le_bytes());
        let heap = self.write_local_heap(&heap_data, free_offset);

        // Symbol table nodes, each followed by the heap offset of its last name
        let mut leaves = Vec::new();
        for (chunk_index, chunk) in children.chunks(SNOD_CAPACITY).enumerate() {
            let first = chunk_index * SNOD_CAPACITY;
            let offsets = &name_offsets[first..first + chunk.len()];
            let address = self.write_symbol_node(chunk, offsets);
            leaves.push((address, offsets[offsets.len() - 1]));
        }

        let btree = self.write_btree_leaf(&leaves);

        let mut messages = Vec::with_capacity(1 + group.attributes.len());
        let mut stab = Vec::with_capacity(16);
        stab.extend_from_slice(&btree.to_le_bytes());
        stab.extend_from_slice(&heap.to_le_bytes());
        messages.push(Message {
            kind: MSG_SYMBOL_TABLE,
            body: stab,
        });
        for attribute in &group.attributes {
            messages.push(encode_attribute(attribute)?);
        }

        let header = self.write_object_header(&messages)?;

        Ok(GroupAddresses {
            header,
            btree,
            heap,
        })
    }

    fn write_dataset(&mut self, dataset: &Dataset) -> Result<u64, H5Error> {
        let data_size = dataset.values.len() * 4;
        let data_address = if dataset.values.is_empty() {
            UNDEFINED_ADDRESS
        } else {
            let address = self.align();
            for value in &dataset.values {
                self.buffer.extend_from_slice(&value.to_le_bytes());
            }
            address
        };

        let mut layout = Vec::with_capacity(18);
        layout.push(3); // version
        layout.push(LAYOUT_CONTIGUOUS);
        layout.extend_from_slice(&data_address.to_le_bytes());
        layout.extend_from_slice(&(data_size as u64).to_le_bytes());

        let mut messages = vec![
            Message {
                kind: MSG_DATASPACE,
                body: encode_dataspace(Some(dataset.values.len() as u64)),
            },
            Message {
                kind: MSG_DATATYPE,
                body: encode_f32_datatype(),
            },
            Message {
                kind: MSG_FILL_VALUE,
                // Version 2, late allocation, write fill if set, no fill value
                body: vec![2, 2, 2, 0],
            },
            Message {
                kind: MSG_LAYOUT,
                body: layout,
            },
        ];
        for attribute in &dataset.attributes {
            messages.push(encode_attribute(attribute)?);
        }

        self.write_object_header(&messages)
    }

    fn write_local_heap(&mut self, data: &[u8], free_offset: u64) -> u64 {
        let address = self.align();
        let data_address = address + LOCAL_HEAP_HEADER_SIZE as u64;

        self.buffer.extend_from_slice(b"HEAP");
        self.buffer.extend_from_slice(&[0, 0, 0, 0]); // version + reserved
        self.buffer
            .extend_from_slice(&(data.len() as u64).to_le_bytes());
        self.buffer.extend_from_slice(&free_offset.to_le_bytes());
        self.buffer.extend_from_slice(&data_address.to_le_bytes());
        self.buffer.extend_from_slice(data);

        address
    }

    fn write_symbol_node(&mut self, entries: &[(&str, u64)], name_offsets: &[u64]) -> u64 {
        let address = self.align();
        let start = self.buffer.len();

        self.buffer.extend_from_slice(b"SNOD");
        self.buffer.push(1); // version
        self.buffer.push(0);
        self.buffer
            .extend_from_slice(&(entries.len() as u16).to_le_bytes());
        for ((_, header), name_offset) in entries.iter().zip(name_offsets) {
            write_symbol_entry(&mut self.buffer, *name_offset, *header, None);
        }

        // Readers load the full node regardless of how many entries are used
        self.buffer.resize(start + SNOD_SIZE, 0);
        address
    }

    fn write_btree_leaf(&mut self, leaves: &[(u64, u64)]) -> u64 {
        let address = self.align();
        let start = self.buffer.len();

        self.buffer.extend_from_slice(b"TREE");
        self.buffer.push(0); // group node
        self.buffer.push(0); // level
        self.buffer
            .extend_from_slice(&(leaves.len() as u16).to_le_bytes());
        self.buffer
            .extend_from_slice(&UNDEFINED_ADDRESS.to_le_bytes());
        self.buffer
            .extend_from_slice(&UNDEFINED_ADDRESS.to_le_bytes());

        // key 0 is the empty string, key i+1 the last name of child i
        self.buffer.extend_from_slice(&0u64.to_le_bytes());
        for (child, last_name_offset) in leaves {
            self.buffer.extend_from_slice(&child.to_le_bytes());
            self.buffer
                .extend_from_slice(&last_name_offset.to_le_bytes());
        }

        self.buffer.resize(start + BTREE_NODE_SIZE, 0);
        address
    }

    fn write_object_header(&mut self, messages: &[Message]) -> Result<u64, H5Error> {
        let mut chunk_size = 0usize;
        for message in messages {
            let padded = align8(message.body.len());
            if padded > u16::MAX as usize {
                return Err(H5Error::MessageTooLarge { size: padded });
            }
            chunk_size += MESSAGE_PREFIX_SIZE + padded;
        }

        let address = self.align();
        self.buffer.push(1); // version
        self.buffer.push(0);
        self.buffer
            .extend_from_slice(&(messages.len() as u16).to_le_bytes());
        self.buffer.extend_from_slice(&1u32.to_le_bytes()); // reference count
        self.buffer
            .extend_from_slice(&(chunk_size as u32).to_le_bytes());
        self.buffer.extend_from_slice(&[0, 0, 0, 0]);

        for message in messages {
            let padded = align8(message.body.len());
            self.buffer.extend_from_slice(&message.kind.to_le_bytes());
            self.buffer
                .extend_from_slice(&(padded as u16).to_le_bytes());
            self.buffer.extend_from_slice(&[0, 0, 0, 0]); // flags + reserved
            self.buffer.extend_from_slice(&message.body);
            self.buffer.resize(self.buffer.len() + padded - message.body.len(), 0);
        }

        Ok(address)
    }

    /// Pad the buffer to an 8-byte boundary and return the position
    fn align(&mut self) -> u64 {
        self.buffer.resize(align8(self.buffer.len()), 0);
        self.buffer.len() as u64
    }
}

fn write_symbol_entry(
    out: &mut Vec<u8>,
    name_offset: u64,
    header: u64,
    cache: Option<GroupAddresses>,
) {
    out.extend_from_slice(&name_offset.to_le_bytes());
    out.extend_from_slice(&header.to_le_bytes());
    match cache {
        Some(group) => {
            out.extend_from_slice(&CACHE_SYMBOL_TABLE.to_le_bytes());
            out.extend_from_slice(&0u32.to_le_bytes());
            out.extend_from_slice(&group.btree.to_le_bytes());
            out.extend_from_slice(&group.heap.to_le_bytes());
        }
        None => {
            out.extend_from_slice(&CACHE_NONE.to_le_bytes());
            out.extend_from_slice(&0u32.to_le_bytes());
            out.extend_from_slice(&[0u8; 16]);
        }
    }
}

fn validate_name(name: &str) -> Result<(), H5Error> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains('\0') {
        "name contains NUL byte"
    } else if name.contains('/') {
        "name contains path separator"
    } else if name == "." {
        "name is reserved"
    } else {
        return Ok(());
    };

    Err(H5Error::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Version 1 dataspace: rank 1 with the given extent, or scalar for `None`
fn encode_dataspace(extent: Option<u64>) -> Vec<u8> {
    let rank = u8::from(extent.is_some());
    let mut body = vec![1, rank, 0, 0, 0, 0, 0, 0];
    if let Some(extent) = extent {
        body.extend_from_slice(&extent.to_le_bytes());
    }
    body
}

/// IEEE 754 single precision, little-endian
fn encode_f32_datatype() -> Vec<u8> {
    let mut body = Vec::with_capacity(20);
    // Class 1 (float), version 1
    body.push((1 << 4) | CLASS_FLOAT);
    // Little-endian, zero padding, implied mantissa MSB; sign at bit 31
    body.extend_from_slice(&[0x20, 31, 0]);
    body.extend_from_slice(&4u32.to_le_bytes());
    body.extend_from_slice(&0u16.to_le_bytes()); // bit offset
    body.extend_from_slice(&32u16.to_le_bytes()); // bit precision
    body.push(23); // exponent location
    body.push(8); // exponent size
    body.push(0); // mantissa location
    body.push(23); // mantissa size
    body.extend_from_slice(&127u32.to_le_bytes()); // exponent bias
    body
}

/// Fixed-length, null-terminated string of `size` bytes including the terminator
fn encode_string_datatype(size: usize, utf8: bool) -> Vec<u8> {
    let mut body = Vec::with_capacity(8);
    body.push((1 << 4) | CLASS_STRING);
    // Padding type 0 (null terminate) in bits 0-3, character set in bits 4-7
    body.push(if utf8 { 0x10 } else { 0x00 });
    body.extend_from_slice(&[0, 0]);
    body.extend_from_slice(&(size as u32).to_le_bytes());
    body
}

/// Version 1 attribute message (name, datatype and dataspace padded to 8 bytes)
fn encode_attribute(attribute: &Attribute) -> Result<Message, H5Error> {
    validate_name(&attribute.name)?;

    let (datatype, data) = match &attribute.value {
        AttrValue::Str(value) => {
            if value.contains('\0') {
                return Err(H5Error::InvalidString {
                    name: attribute.name.clone(),
                });
            }
            let mut data = value.as_bytes().to_vec();
            data.push(0);
            (encode_string_datatype(data.len(), !value.is_ascii()), data)
        }
        AttrValue::F32(value) => (encode_f32_datatype(), value.to_le_bytes().to_vec()),
    };
    let dataspace = encode_dataspace(None);

    let name_len = attribute.name.len() + 1;
    if name_len > u16::MAX as usize {
        return Err(H5Error::InvalidName {
            name: attribute.name.clone(),
            reason: "name too long",
        });
    }

    let mut body = Vec::new();
    body.push(1); // version
    body.push(0);
    body.extend_from_slice(&(name_len as u16).to_le_bytes());
    body.extend_from_slice(&(datatype.len() as u16).to_le_bytes());
    body.extend_from_slice(&(dataspace.len() as u16).to_le_bytes());
    push_padded(&mut body, attribute.name.as_bytes(), name_len);
    push_padded(&mut body, &datatype, datatype.len());
    push_padded(&mut body, &dataspace, dataspace.len());
    body.extend_from_slice(&data);

    Ok(Message {
        kind: MSG_ATTRIBUTE,
        body,
    })
}

/// Append `bytes`, zero-extended to `len`, then pad to an 8-byte boundary
fn push_padded(out: &mut Vec<u8>, bytes: &[u8], len: usize) {
    let start = out.len();
    out.extend_from_slice(bytes);
    out.resize(start + align8(len), 0);
}
