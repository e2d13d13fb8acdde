// src/decoded/mod.rs

//! Structured value decoding for decrypted payloads.
//!
//! Settings and map plaintexts are runs of `u32` tags, each followed by a value
//! whose layout only the tag determines. A [`Registry`] supplies those layouts;
//! [`parse_cache`] and [`read_dmap`] walk a blob with one.

pub(crate) mod map;
pub(crate) mod reader;
pub(crate) mod record;
pub(crate) mod registry;
pub(crate) mod settings;

pub use map::{map_registry, read_dmap, DirectoryEntry, DirectoryMap};
pub use reader::TagReader;
pub use record::{Entry, Record, Value};
pub use registry::{read_record, CustomDecoder, Field, FieldKind, Registry, TagSpec};
pub use settings::{parse_cache, settings_registry};
