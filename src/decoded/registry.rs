//! src/decoded/registry.rs
//! Declarative tag tables.
//!
//! A registry maps each tag of a tagged blob to a name and a [`FieldKind`]
//! describing how its value is laid out. Registries are built once from a
//! static table; decoding is a walk over the table entries.

use crate::decoded::reader::TagReader;
use crate::decoded::record::{Record, Value};
use crate::error::TdataError;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Decoder for a value whose layout depends on data read earlier in the value.
pub type CustomDecoder = fn(&mut TagReader<'_>) -> Result<Value, TdataError>;

/// Layout of one value.
#[derive(Clone, Copy)]
pub enum FieldKind {
    /// Signed 32-bit.
    Int32,
    Uint32,
    Uint64,
    /// 64-bit key of another file.
    FileKey,
    /// Length-prefixed byte array.
    Bytes,
    /// Length-prefixed UTF-16BE string.
    String,
    /// Exactly `n` bytes, no prefix.
    Raw(usize),
    /// Fixed sequence of named fields.
    Struct(&'static [Field]),
    /// `u32` count followed by that many elements.
    List(&'static FieldKind),
    Custom(CustomDecoder),
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int32 => f.write_str("Int32"),
            Self::Uint32 => f.write_str("Uint32"),
            Self::Uint64 => f.write_str("Uint64"),
            Self::FileKey => f.write_str("FileKey"),
            Self::Bytes => f.write_str("Bytes"),
            Self::String => f.write_str("String"),
            Self::Raw(n) => write!(f, "Raw({n})"),
            Self::Struct(fields) => f.debug_tuple("Struct").field(fields).finish(),
            Self::List(elem) => f.debug_tuple("List").field(elem).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Named member of a [`FieldKind::Struct`].
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

impl FieldKind {
    /// Read one value of this kind.
    pub fn decode(&self, reader: &mut TagReader<'_>) -> Result<Value, TdataError> {
        Ok(match *self {
            Self::Int32 => Value::Int(i64::from(reader.read_i32()?)),
            Self::Uint32 => Value::Uint(u64::from(reader.read_u32()?)),
            Self::Uint64 => Value::Uint(reader.read_u64()?),
            Self::FileKey => Value::FileKey(reader.read_u64()?),
            Self::Bytes => Value::Bytes(reader.read_bytes()?),
            Self::String => Value::Text(reader.read_string()?),
            Self::Raw(n) => Value::Bytes(reader.read_raw(n)?.to_vec()),
            Self::Struct(fields) => {
                let mut record = Record::new();
                for (index, field) in (0u32..).zip(fields) {
                    record.push(index, field.name, field.kind.decode(reader)?);
                }
                Value::Record(record)
            }
            Self::List(elem) => {
                let count = reader.read_u32()? as usize;
                // Every element takes at least one byte, so a count past the
                // remaining input is corrupt; don't preallocate for it.
                if count > reader.remaining() {
                    return Err(TdataError::Format(format!(
                        "list count {count} exceeds the {} bytes left",
                        reader.remaining()
                    )));
                }
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(elem.decode(reader)?);
                }
                Value::List(items)
            }
            Self::Custom(decode) => decode(reader)?,
        })
    }
}

/// One row of a registry table: tag, name, layout.
pub type TagSpec = (u32, &'static str, FieldKind);

/// Lookup from tag to name and layout.
#[derive(Debug)]
pub struct Registry {
    name: &'static str,
    tags: HashMap<u32, (&'static str, FieldKind)>,
}

impl Registry {
    /// Build from a table. A tag listed twice keeps its last row, so a
    /// caller can override one layout by appending to an existing table.
    #[must_use]
    pub fn new(name: &'static str, table: &[TagSpec]) -> Self {
        let tags = table
            .iter()
            .map(|&(tag, field, kind)| (tag, (field, kind)))
            .collect::<HashMap<_, _>>();
        if tags.len() != table.len() {
            debug!(
                registry = name,
                rows = table.len(),
                tags = tags.len(),
                "duplicate tags, last row kept"
            );
        }
        Self { name, tags }
    }

    /// Registry name used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn lookup(&self, tag: u32) -> Option<(&'static str, FieldKind)> {
        self.tags.get(&tag).copied()
    }

    #[must_use]
    pub fn name_of(&self, tag: u32) -> Option<&'static str> {
        self.lookup(tag).map(|(name, _)| name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Decode a whole blob as `tag value` pairs until the input is exhausted.
///
/// # Errors
///
/// - [`TdataError::UnknownTag`] on a tag absent from `registry`; the rest of
///   the blob cannot be framed without knowing that value's layout.
/// - [`TdataError::Format`] when a value runs past the end of the input.
pub fn read_record(data: &[u8], registry: &Registry) -> Result<Record, TdataError> {
    let mut reader = TagReader::new(data);
    let mut record = Record::new();
    while !reader.is_empty() {
        let tag = reader.read_tag()?;
        let (name, kind) = registry.lookup(tag).ok_or(TdataError::UnknownTag {
            tag,
            registry: registry.name(),
        })?;
        let value = kind.decode(&mut reader).map_err(|e| match e {
            TdataError::Format(msg) => TdataError::Format(format!("{name} (0x{tag:02x}): {msg}")),
            other => other,
        })?;
        record.push(tag, name, value);
    }
    Ok(record)
}
