//! src/decoded/record.rs
//! Decoded values and the tag-ordered records that hold them.

use crate::utils::to_file_part;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// One decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Text(String),
    Bytes(Vec<u8>),
    /// A 64-bit key naming another file of the profile.
    FileKey(u64),
    List(Vec<Value>),
    Record(Record),
}

impl Value {
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(v) | Self::FileKey(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Visit every file key inside this value, depth first.
    pub fn for_each_file_key(&self, f: &mut impl FnMut(u64)) {
        match self {
            Self::FileKey(k) => f(*k),
            Self::List(items) => {
                for item in items {
                    item.for_each_file_key(f);
                }
            }
            Self::Record(r) => {
                for entry in r {
                    entry.value.for_each_file_key(f);
                }
            }
            _ => {}
        }
    }
}

/// A named value at its tag (or field index, inside a struct).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub tag: u32,
    pub name: &'static str,
    pub value: Value,
}

/// Entries in the order they were read. Tags may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<Entry>,
}

impl Record {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, tag: u32, name: &'static str, value: Value) {
        self.entries.push(Entry { tag, name, value });
    }

    /// Last value stored under `name`, mirroring how a later tag overrides an
    /// earlier one when the client loads the file.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.name == name)
            .map(|e| &e.value)
    }

    /// Last value stored under `tag`.
    #[must_use]
    pub fn get_by_tag(&self, tag: u32) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.tag == tag)
            .map(|e| &e.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Uint(v) => serializer.serialize_u64(*v),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Bytes(b) => serializer.serialize_str(&hex::encode(b)),
            Self::FileKey(k) => serializer.serialize_str(&to_file_part(*k)),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Record(r) => r.serialize(serializer),
        }
    }
}

/// Serialized as a map from entry name to value. A repeated name appears
/// once per occurrence, in read order.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.name, &entry.value)?;
        }
        map.end()
    }
}
