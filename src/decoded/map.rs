//! src/decoded/map.rs
//! File directory (map plaintext): `lsk*` tags naming the other files of the
//! profile by their 64-bit keys.

use crate::decoded::record::Record;
use crate::decoded::registry::{read_record, Field, FieldKind, Registry, TagSpec};
use crate::error::TdataError;
use crate::utils::to_file_part;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

const DRAFT: &[Field] = &[
    Field::new("key", FieldKind::FileKey),
    Field::new("peer", FieldKind::Uint64),
];

const MEDIA: &[Field] = &[
    Field::new("key", FieldKind::FileKey),
    Field::new("first", FieldKind::Uint64),
    Field::new("second", FieldKind::Uint64),
    Field::new("size", FieldKind::Int32),
];

const STICKERS_KEYS: &[Field] = &[
    Field::new("installed", FieldKind::FileKey),
    Field::new("featured", FieldKind::FileKey),
    Field::new("recent", FieldKind::FileKey),
    Field::new("archived", FieldKind::FileKey),
];

const BACKGROUND: &[Field] = &[
    Field::new("day", FieldKind::FileKey),
    Field::new("night", FieldKind::FileKey),
];

/// Tags of the map blob. Names drop the client's `lsk` prefix.
const MAP_TABLE: &[TagSpec] = &[
    (0x01, "Draft", FieldKind::List(&FieldKind::Struct(DRAFT))),
    (0x02, "DraftPosition", FieldKind::List(&FieldKind::Struct(DRAFT))),
    (0x03, "Images", FieldKind::List(&FieldKind::Struct(MEDIA))),
    (0x04, "Locations", FieldKind::FileKey),
    (0x05, "StickerImages", FieldKind::List(&FieldKind::Struct(MEDIA))),
    (0x06, "Audios", FieldKind::List(&FieldKind::Struct(MEDIA))),
    (0x07, "RecentStickersOld", FieldKind::FileKey),
    (0x08, "BackgroundOld", FieldKind::FileKey),
    (0x09, "UserSettings", FieldKind::FileKey),
    (0x0a, "RecentHashtagsAndBots", FieldKind::FileKey),
    (0x0b, "StickersOld", FieldKind::FileKey),
    (0x0c, "SavedPeersOld", FieldKind::FileKey),
    (0x0d, "ReportSpamStatusesOld", FieldKind::FileKey),
    (0x0e, "SavedGifsOld", FieldKind::FileKey),
    (0x0f, "SavedGifs", FieldKind::FileKey),
    (0x10, "StickersKeys", FieldKind::Struct(STICKERS_KEYS)),
    (0x11, "TrustedBots", FieldKind::FileKey),
    (0x12, "FavedStickers", FieldKind::FileKey),
    (0x13, "ExportSettings", FieldKind::FileKey),
    (0x14, "Background", FieldKind::Struct(BACKGROUND)),
    (0x15, "SelfSerialized", FieldKind::Bytes),
];

static MAP_REGISTRY: LazyLock<Registry> = LazyLock::new(|| Registry::new("map", MAP_TABLE));

/// The process-wide registry of map tags.
pub fn map_registry() -> &'static Registry {
    &MAP_REGISTRY
}

/// A file referenced from the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    /// File name stem on disk, see [`to_file_part`].
    pub identifier: String,
    #[serde(skip)]
    pub file_key: u64,
    /// Map tag the key was found under.
    pub tag: u32,
    /// Registry name of `tag`.
    pub kind: &'static str,
}

/// Every file the map references, in the order first seen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryMap {
    pub files: Vec<DirectoryEntry>,
    /// The decoded map itself, for the non-key values (draft peers, media
    /// sizes, the serialized self user).
    #[serde(skip)]
    pub record: Record,
}

impl DirectoryMap {
    /// Tag of the file stored under `identifier`.
    #[must_use]
    pub fn tag_of(&self, identifier: &str) -> Option<u32> {
        self.files
            .iter()
            .find(|e| e.identifier == identifier)
            .map(|e| e.tag)
    }

    /// All files recorded under `tag`.
    pub fn files_with_tag(&self, tag: u32) -> impl Iterator<Item = &DirectoryEntry> {
        self.files.iter().filter(move |e| e.tag == tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Decode a decrypted map blob into the files it references.
///
/// Key `0` marks an unset slot and is skipped; a key referenced twice is
/// recorded under its first tag. Referenced files are not opened.
///
/// # Errors
///
/// [`TdataError::UnknownTag`] or [`TdataError::Format`], as for
/// [`parse_cache`](crate::decoded::parse_cache).
pub fn read_dmap(plaintext: &[u8]) -> Result<DirectoryMap, TdataError> {
    let registry = map_registry();
    let record = read_record(plaintext, registry)?;

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for entry in &record {
        entry.value.for_each_file_key(&mut |file_key| {
            if file_key != 0 && seen.insert(file_key) {
                files.push(DirectoryEntry {
                    identifier: to_file_part(file_key),
                    file_key,
                    tag: entry.tag,
                    kind: entry.name,
                });
            }
        });
    }
    debug!(entries = record.len(), files = files.len(), "map decoded");
    Ok(DirectoryMap { files, record })
}
