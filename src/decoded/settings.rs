//! src/decoded/settings.rs
//! Settings blob (`settings0` / `settings1` plaintext): a flat run of `dbi*`
//! tags, each followed by its value.

use crate::decoded::reader::TagReader;
use crate::decoded::record::{Record, Value};
use crate::decoded::registry::{read_record, Field, FieldKind, Registry, TagSpec};
use crate::error::TdataError;
use std::sync::LazyLock;
use tracing::debug;

const CONN_AUTO: i32 = 0;
const CONN_DIRECT: i32 = 1;
const CONN_HTTP_PROXY: i32 = 2;
const CONN_TCP_PROXY: i32 = 3;
const CONN_PROXIES_LIST_OLD: i32 = 4;
const CONN_PROXIES_LIST: i32 = 5;

const WINDOW_POSITION: &[Field] = &[
    Field::new("x", FieldKind::Int32),
    Field::new("y", FieldKind::Int32),
    Field::new("w", FieldKind::Int32),
    Field::new("h", FieldKind::Int32),
    Field::new("moncrc", FieldKind::Uint32),
    Field::new("maximized", FieldKind::Int32),
];

const KEY: &[Field] = &[
    Field::new("dcId", FieldKind::Int32),
    Field::new("key", FieldKind::Raw(256)),
];

const USER: &[Field] = &[
    Field::new("userId", FieldKind::Int32),
    Field::new("dcId", FieldKind::Int32),
];

const DC_OPTION_OLD_OLD: &[Field] = &[
    Field::new("dcId", FieldKind::Uint32),
    Field::new("host", FieldKind::String),
    Field::new("ip", FieldKind::String),
    Field::new("port", FieldKind::Uint32),
];

const DC_OPTION_OLD: &[Field] = &[
    Field::new("dcIdWithShift", FieldKind::Uint32),
    Field::new("flags", FieldKind::Int32),
    Field::new("ip", FieldKind::String),
    Field::new("port", FieldKind::Uint32),
];

const DOWNLOAD_PATH: &[Field] = &[
    Field::new("path", FieldKind::String),
    Field::new("bookmark", FieldKind::Bytes),
];

const AUTO_DOWNLOAD: &[Field] = &[
    Field::new("photo", FieldKind::Int32),
    Field::new("audio", FieldKind::Int32),
    Field::new("gif", FieldKind::Int32),
];

const THEME_KEY: &[Field] = &[
    Field::new("day", FieldKind::Uint64),
    Field::new("night", FieldKind::Uint64),
    Field::new("nightMode", FieldKind::Uint32),
];

const DIALOGS_MODE: &[Field] = &[
    Field::new("enabled", FieldKind::Int32),
    Field::new("mode", FieldKind::Int32),
];

const TILE_BACKGROUND: &[Field] = &[
    Field::new("day", FieldKind::Int32),
    Field::new("night", FieldKind::Int32),
];

const HIDDEN_PINNED: &[Field] = &[
    Field::new("peer", FieldKind::Uint64),
    Field::new("msgId", FieldKind::Int32),
];

const PROXY: &[Field] = &[
    Field::new("type", FieldKind::Int32),
    Field::new("host", FieldKind::String),
    Field::new("port", FieldKind::Int32),
    Field::new("user", FieldKind::String),
    Field::new("password", FieldKind::String),
];

const SINGLE_PROXY: &[Field] = &[
    Field::new("host", FieldKind::String),
    Field::new("port", FieldKind::Int32),
    Field::new("user", FieldKind::String),
    Field::new("password", FieldKind::String),
];

/// Tags of the settings blob. Names drop the client's `dbi` prefix.
const SETTINGS_TABLE: &[TagSpec] = &[
    (0x00, "Key", FieldKind::Struct(KEY)),
    (0x01, "User", FieldKind::Struct(USER)),
    (0x02, "DcOptionOldOld", FieldKind::Struct(DC_OPTION_OLD_OLD)),
    (0x03, "ChatSizeMax", FieldKind::Int32),
    (0x04, "MutePeer", FieldKind::Uint64),
    (0x05, "SendKeyOld", FieldKind::Int32),
    (0x06, "AutoStart", FieldKind::Int32),
    (0x07, "StartMinimized", FieldKind::Int32),
    (0x08, "SoundNotify", FieldKind::Int32),
    (0x09, "WorkMode", FieldKind::Int32),
    (0x0a, "SeenTrayTooltip", FieldKind::Int32),
    (0x0b, "DesktopNotify", FieldKind::Int32),
    (0x0c, "AutoUpdate", FieldKind::Int32),
    (0x0d, "LastUpdateCheck", FieldKind::Int32),
    (0x0e, "WindowPosition", FieldKind::Struct(WINDOW_POSITION)),
    (0x0f, "ConnectionTypeOld", FieldKind::Custom(read_connection_type_old)),
    (0x11, "DefaultAttach", FieldKind::Int32),
    (0x12, "CatsAndDogs", FieldKind::Int32),
    (0x13, "ReplaceEmojiOld", FieldKind::Int32),
    (0x14, "AskDownloadPath", FieldKind::Int32),
    (0x15, "DownloadPathOld", FieldKind::String),
    (0x16, "ScaleOld", FieldKind::Int32),
    (0x17, "EmojiTabOld", FieldKind::Int32),
    (0x19, "LoggedPhoneNumber", FieldKind::String),
    (0x1a, "MutedPeers", FieldKind::List(&FieldKind::Uint64)),
    (0x1c, "NotifyView", FieldKind::Int32),
    (0x1d, "SendToMenu", FieldKind::Int32),
    (0x1e, "CompressPastedImage", FieldKind::Int32),
    (0x21, "TileBackgroundOld", FieldKind::Int32),
    (0x22, "AutoLock", FieldKind::Int32),
    (0x23, "DialogLastPath", FieldKind::String),
    (0x27, "DcOptionOld", FieldKind::Struct(DC_OPTION_OLD)),
    (0x28, "TryIPv6", FieldKind::Int32),
    (0x29, "SongVolume", FieldKind::Int32),
    (0x30, "WindowsNotificationsOld", FieldKind::Int32),
    (0x31, "IncludeMuted", FieldKind::Int32),
    (0x32, "MegagroupSizeMax", FieldKind::Int32),
    (0x33, "DownloadPath", FieldKind::Struct(DOWNLOAD_PATH)),
    (0x34, "AutoDownload", FieldKind::Struct(AUTO_DOWNLOAD)),
    (0x35, "SavedGifsLimit", FieldKind::Int32),
    (0x36, "ShowingSavedGifsOld", FieldKind::Int32),
    (0x37, "AutoPlay", FieldKind::Int32),
    (0x38, "AdaptiveForWide", FieldKind::Int32),
    (0x39, "HiddenPinnedMessages", FieldKind::List(&FieldKind::Struct(HIDDEN_PINNED))),
    (0x40, "DialogsMode", FieldKind::Struct(DIALOGS_MODE)),
    (0x41, "ModerateMode", FieldKind::Int32),
    (0x42, "VideoVolume", FieldKind::Int32),
    (0x43, "StickersRecentLimit", FieldKind::Int32),
    (0x44, "NativeNotifications", FieldKind::Int32),
    (0x45, "NotificationsCount", FieldKind::Int32),
    (0x46, "NotificationsCorner", FieldKind::Int32),
    (0x47, "ThemeKeyOld", FieldKind::Uint64),
    (0x48, "DialogsWidthRatioOld", FieldKind::Int32),
    (0x49, "UseExternalVideoPlayer", FieldKind::Int32),
    (0x4a, "DcOptions", FieldKind::Bytes),
    (0x4b, "MtpAuthorization", FieldKind::Bytes),
    (0x4d, "AuthSessionSettings", FieldKind::Bytes),
    (0x4e, "LangPackKey", FieldKind::Uint64),
    (0x4f, "ConnectionType", FieldKind::Custom(read_connection_type)),
    (0x50, "StickersFavedLimit", FieldKind::Int32),
    (0x51, "SuggestStickersByEmoji", FieldKind::Int32),
    (0x52, "SuggestEmoji", FieldKind::Int32),
    (0x53, "TxtDomainString", FieldKind::String),
    (0x54, "ThemeKey", FieldKind::Struct(THEME_KEY)),
    (0x55, "TileBackground", FieldKind::Struct(TILE_BACKGROUND)),
    (0x57, "AnimationsDisabled", FieldKind::Int32),
    (0x58, "ScalePercent", FieldKind::Int32),
    (0x59, "PlaybackSpeed", FieldKind::Int32),
    (0x5a, "LanguagesKey", FieldKind::Uint64),
    (0x5b, "CallSettings", FieldKind::Bytes),
    (0x5e, "ApplicationSettings", FieldKind::Bytes),
    (0x60, "FallbackProductionConfig", FieldKind::Bytes),
];

static SETTINGS_REGISTRY: LazyLock<Registry> =
    LazyLock::new(|| Registry::new("settings", SETTINGS_TABLE));

/// The process-wide registry of settings tags.
pub fn settings_registry() -> &'static Registry {
    &SETTINGS_REGISTRY
}

/// Decode a decrypted settings blob into a [`Record`].
///
/// Usually called with [`settings_registry`]; any registry describing a
/// tag-value blob works.
///
/// # Errors
///
/// [`TdataError::UnknownTag`] or [`TdataError::Format`]; no partial record is
/// returned.
///
/// # Example
///
/// ```
/// use tdata_rs::decoded::{parse_cache, settings_registry, Value};
///
/// // ChatSizeMax = 200
/// let blob = [0, 0, 0, 0x03, 0, 0, 0, 200];
/// let record = parse_cache(&blob, settings_registry()).unwrap();
/// assert_eq!(record.get("ChatSizeMax"), Some(&Value::Int(200)));
/// ```
pub fn parse_cache(plaintext: &[u8], registry: &Registry) -> Result<Record, TdataError> {
    let record = read_record(plaintext, registry)?;
    debug!(
        registry = registry.name(),
        entries = record.len(),
        "tagged blob decoded"
    );
    Ok(record)
}

/// Proxy settings written since proxy lists were introduced.
///
/// `type` selects the layout: auto and direct carry nothing else, the two
/// single-proxy types carry one proxy, and the list types carry a count, the
/// selected index (plus two flags in the newer list) and the proxies.
fn read_connection_type(reader: &mut TagReader<'_>) -> Result<Value, TdataError> {
    let conn_type = reader.read_i32()?;
    let mut record = Record::new();
    record.push(0, "type", Value::Int(i64::from(conn_type)));
    match conn_type {
        CONN_AUTO | CONN_DIRECT => {}
        CONN_HTTP_PROXY | CONN_TCP_PROXY => {
            record.push(1, "proxy", FieldKind::Struct(SINGLE_PROXY).decode(reader)?);
        }
        CONN_PROXIES_LIST_OLD | CONN_PROXIES_LIST => {
            let count = reader.read_i32()?;
            record.push(1, "count", Value::Int(i64::from(count)));
            record.push(2, "index", Value::Int(i64::from(reader.read_i32()?)));
            if conn_type == CONN_PROXIES_LIST {
                record.push(3, "settings", Value::Int(i64::from(reader.read_i32()?)));
                record.push(4, "calls", Value::Int(i64::from(reader.read_i32()?)));
            }
            let count = usize::try_from(count).map_err(|_| {
                TdataError::Format(format!("negative proxy count {count}"))
            })?;
            if count > reader.remaining() {
                return Err(TdataError::Format(format!(
                    "proxy count {count} exceeds the {} bytes left",
                    reader.remaining()
                )));
            }
            let mut proxies = Vec::with_capacity(count);
            for _ in 0..count {
                proxies.push(FieldKind::Struct(PROXY).decode(reader)?);
            }
            record.push(5, "proxies", Value::List(proxies));
        }
        other => {
            return Err(TdataError::Format(format!(
                "unknown connection type {other}"
            )))
        }
    }
    Ok(Value::Record(record))
}

/// Pre-list proxy settings: a type, then one proxy for the proxy types.
fn read_connection_type_old(reader: &mut TagReader<'_>) -> Result<Value, TdataError> {
    let conn_type = reader.read_i32()?;
    let mut record = Record::new();
    record.push(0, "type", Value::Int(i64::from(conn_type)));
    match conn_type {
        CONN_AUTO | CONN_DIRECT => {}
        CONN_HTTP_PROXY | CONN_TCP_PROXY => {
            record.push(1, "proxy", FieldKind::Struct(SINGLE_PROXY).decode(reader)?);
        }
        other => {
            return Err(TdataError::Format(format!(
                "unknown connection type {other}"
            )))
        }
    }
    Ok(Value::Record(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn be32(v: u32) -> [u8; 4] {
        v.to_be_bytes()
    }

    fn qstring(s: &str) -> Vec<u8> {
        let units: Vec<u8> = s.encode_utf16().flat_map(u16::to_be_bytes).collect();
        let mut out = be32(units.len() as u32).to_vec();
        out.extend(units);
        out
    }

    #[test]
    fn registry_names_known_tags() {
        let r = settings_registry();
        assert_eq!(r.name_of(0x19), Some("LoggedPhoneNumber"));
        assert_eq!(r.name_of(0x4f), Some("ConnectionType"));
        assert_eq!(r.name_of(0x10), None);
        assert_eq!(r.len(), SETTINGS_TABLE.len());
    }

    #[test]
    fn tag_names_follow_client_enum() {
        let r = settings_registry();
        assert_eq!(r.name_of(0x21), Some("TileBackgroundOld"));
        assert_eq!(r.name_of(0x30), Some("WindowsNotificationsOld"));
        assert_eq!(r.name_of(0x31), Some("IncludeMuted"));
        assert_eq!(r.name_of(0x36), Some("ShowingSavedGifsOld"));
        assert_eq!(r.name_of(0x37), Some("AutoPlay"));
        assert_eq!(r.name_of(0x38), Some("AdaptiveForWide"));
        assert_eq!(r.name_of(0x40), Some("DialogsMode"));
        assert_eq!(r.name_of(0x47), Some("ThemeKeyOld"));
        assert_eq!(r.name_of(0x48), Some("DialogsWidthRatioOld"));
        assert_eq!(r.name_of(0x49), Some("UseExternalVideoPlayer"));
        assert_eq!(r.name_of(0x54), Some("ThemeKey"));
        assert_eq!(r.name_of(0x58), Some("ScalePercent"));
        assert_eq!(r.name_of(0x59), Some("PlaybackSpeed"));
    }

    #[test]
    fn dialogs_mode_reads_both_fields() {
        let blob: Vec<u8> = [0x40, 1, 0, 0x03, 200].into_iter().flat_map(be32).collect();

        let record = parse_cache(&blob, settings_registry()).unwrap();
        assert_eq!(record.len(), 2);
        let mode = record.get("DialogsMode").and_then(Value::as_record).unwrap();
        assert_eq!(mode.get("enabled"), Some(&Value::Int(1)));
        assert_eq!(mode.get("mode"), Some(&Value::Int(0)));
        assert_eq!(record.get("ChatSizeMax"), Some(&Value::Int(200)));
    }

    #[test]
    fn theme_key_reads_day_night_and_mode() {
        let mut blob = be32(0x54).to_vec();
        blob.extend(7u64.to_be_bytes());
        blob.extend(9u64.to_be_bytes());
        blob.extend(be32(1));
        blob.extend(be32(0x47));
        blob.extend(3u64.to_be_bytes());

        let record = parse_cache(&blob, settings_registry()).unwrap();
        let theme = record.get("ThemeKey").and_then(Value::as_record).unwrap();
        assert_eq!(theme.get("night"), Some(&Value::Uint(9)));
        assert_eq!(theme.get("nightMode"), Some(&Value::Uint(1)));
        assert_eq!(record.get("ThemeKeyOld"), Some(&Value::Uint(3)));
    }

    #[test]
    fn proxies_list_with_one_proxy() {
        let mut blob = be32(0x4f).to_vec();
        blob.extend(be32(CONN_PROXIES_LIST as u32));
        blob.extend(be32(1)); // count
        blob.extend(be32(1)); // index
        blob.extend(be32(0)); // settings
        blob.extend(be32(1)); // calls
        blob.extend(be32(3)); // socks5
        blob.extend(qstring("127.0.0.1"));
        blob.extend(be32(1080));
        blob.extend(qstring("u"));
        blob.extend(qstring(""));

        let record = parse_cache(&blob, settings_registry()).unwrap();
        let conn = record.get("ConnectionType").and_then(Value::as_record).unwrap();
        assert_eq!(conn.get("calls"), Some(&Value::Int(1)));
        let proxies = conn.get("proxies").and_then(Value::as_list).unwrap();
        let proxy = proxies[0].as_record().unwrap();
        assert_eq!(proxy.get("host").and_then(Value::as_str), Some("127.0.0.1"));
        assert_eq!(proxy.get("port"), Some(&Value::Int(1080)));
    }

    #[test]
    fn old_connection_type_with_http_proxy() {
        let mut blob = be32(0x0f).to_vec();
        blob.extend(be32(CONN_HTTP_PROXY as u32));
        blob.extend(qstring("proxy.local"));
        blob.extend(be32(8080));
        blob.extend(qstring(""));
        blob.extend(qstring(""));

        let record = parse_cache(&blob, settings_registry()).unwrap();
        let conn = record.get("ConnectionTypeOld").and_then(Value::as_record).unwrap();
        let proxy = conn.get("proxy").and_then(Value::as_record).unwrap();
        assert_eq!(proxy.get("host").and_then(Value::as_str), Some("proxy.local"));
    }

    #[test]
    fn unknown_connection_type_rejected() {
        let mut blob = be32(0x4f).to_vec();
        blob.extend(be32(9));
        assert!(parse_cache(&blob, settings_registry()).is_err());
    }

    #[test]
    fn truncated_window_position_rejected() {
        let mut blob = be32(0x0e).to_vec();
        blob.extend(be32(2));
        blob.extend(be32(962));
        let err = parse_cache(&blob, settings_registry()).unwrap_err();
        assert!(err.to_string().contains("WindowPosition"));
    }
}
