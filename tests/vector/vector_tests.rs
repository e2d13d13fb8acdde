//! tests/vector/vector_tests.rs
//! End-to-end recovery: containers -> keys -> plaintexts -> records

#[path = "../common.rs"]
mod common;

use common::{load_vectors, local_key, password, unhex, Vectors, FIXTURE_VERSION, TEST_PASSWORD};
use std::io::Cursor;
use tdata_rs::encryptor::encrypt_local_with_padding;
use tdata_rs::{
    decrypt_local, decrypt_stream, encrypt_local, parse_cache, read_container, read_dmap,
    write_container, write_streams, ContainerDecoder, EMap, ESettings, KdfScheme, Magic,
    TdataError, Value,
};

fn map_container(v: &Vectors, legacy: bool) -> EMap {
    let hex = if legacy {
        &v.legacy.container_hex
    } else {
        &v.strong.container_hex
    };
    let container = read_container(Cursor::new(unhex(hex))).unwrap();
    assert!(container.integrity_ok);
    EMap::from_container(&container).unwrap()
}

#[test]
fn payload_decrypts_with_local_key() {
    let v = load_vectors();
    let plain = decrypt_local(&unhex(&v.payload_ciphertext_hex), &local_key(&v)).unwrap();
    assert_eq!(plain, v.payload_plaintext.as_bytes());
}

#[test]
fn fixed_padding_reproduces_ciphertext() {
    let v = load_vectors();
    let plain = v.payload_plaintext.as_bytes();
    let pad_len = tdata_rs::encryptor::padding_len(plain.len());
    let padding = vec![0xA5u8; pad_len];
    let encrypted = encrypt_local_with_padding(plain, &local_key(&v), &padding).unwrap();
    assert_eq!(hex::encode(encrypted), v.payload_ciphertext_hex);
}

#[test]
fn legacy_map_recovers_local_key() {
    let v = load_vectors();
    let map = map_container(&v, true);
    assert_eq!(map.key_encrypted.len(), 0x120);

    let key = map.get_key(&password(&v.legacy.password)).unwrap();
    assert_eq!(hex::encode(key.expose_secret()), v.local_key_hex);
    assert_eq!(
        hex::encode(map.decrypt_map(&key).unwrap()),
        v.map_plaintext_hex
    );
}

#[test]
fn strong_map_recovers_local_key() {
    let v = load_vectors();
    let map = map_container(&v, false);
    let key = map.get_key(&password(&v.strong.password)).unwrap();
    assert_eq!(hex::encode(key.expose_secret()), v.local_key_hex);

    let pinned = map.get_key_with(&password(""), KdfScheme::Strong).unwrap();
    assert_eq!(pinned.expose_secret(), key.expose_secret());
}

#[test]
fn wrong_password_is_a_crypto_error() {
    let v = load_vectors();
    let map = map_container(&v, true);
    let err = map.get_key(&password("not the password")).unwrap_err();
    assert!(err.is_crypto(), "{err}");

    let legacy_only = map_container(&v, false).with_schemes(&[KdfScheme::Legacy]);
    assert!(legacy_only.get_key(&password("")).unwrap_err().is_crypto());
}

#[test]
fn recovered_key_opens_other_files() {
    let v = load_vectors();
    let key = map_container(&v, true)
        .get_key(&password(TEST_PASSWORD))
        .unwrap();

    let secret = encrypt_local(b"peer 777 draft", &key).unwrap();
    let payload = write_streams(&[&secret]);
    let mut raw = Vec::new();
    write_container(&mut raw, Magic::Tdf, FIXTURE_VERSION, &payload).unwrap();
    let container = read_container(Cursor::new(raw)).unwrap();

    assert_eq!(decrypt_stream(&container, 0, &key).unwrap(), b"peer 777 draft");
    assert!(matches!(
        decrypt_stream(&container, 1, &key),
        Err(TdataError::Format(_))
    ));
}

#[test]
fn map_directory_lists_referenced_files() {
    let v = load_vectors();
    let map = map_container(&v, true);
    let key = map.get_key(&password(TEST_PASSWORD)).unwrap();
    let dmap = read_dmap(&map.decrypt_map(&key).unwrap()).unwrap();

    let files: Vec<(&str, u32)> = dmap
        .files
        .iter()
        .map(|e| (e.identifier.as_str(), e.tag))
        .collect();
    assert_eq!(
        files,
        [
            ("FEDCBA9876543210", 0x01),
            ("0123456789ABCDEF", 0x09),
            ("1000000000000000", 0x10),
            ("2000000000000000", 0x10),
            ("3000000000000000", 0x10),
            ("BA00000000000000", 0x03),
        ]
    );

    let draft = dmap.record.get("Draft").and_then(Value::as_list).unwrap();
    let draft = draft[0].as_record().unwrap();
    assert_eq!(draft.get("peer"), Some(&Value::Uint(777)));

    let images = dmap.record.get("Images").and_then(Value::as_list).unwrap();
    let image = images[0].as_record().unwrap();
    assert_eq!(image.get("size"), Some(&Value::Int(1024)));
}

#[test]
fn settings_fixture_decrypts() {
    let v = load_vectors();
    let f = &v.settings_fixture;
    let container = read_container(Cursor::new(unhex(&f.container_hex))).unwrap();
    let settings = ESettings::from_container(&container).unwrap();

    let key = settings.get_key(&password(""));
    assert_eq!(hex::encode(key.expose_secret()), f.passkey_hex);
    let plain = settings.decrypt(&key).unwrap();
    assert_eq!(hex::encode(&plain), f.plaintext_hex);

    let via_trait = ContainerDecoder::get_key(&settings, &password("")).unwrap();
    assert_eq!(via_trait.expose_secret(), key.expose_secret());
}

#[test]
fn settings_fixture_wrong_password() {
    let v = load_vectors();
    let container = read_container(Cursor::new(unhex(&v.settings_fixture.container_hex))).unwrap();
    let settings = ESettings::from_container(&container).unwrap();
    let key = settings.get_key(&password(TEST_PASSWORD));
    assert!(settings.decrypt(&key).unwrap_err().is_crypto());
}

#[test]
fn settings_fixture_parses() {
    let v = load_vectors();
    let f = &v.settings_fixture;
    let container = read_container(Cursor::new(unhex(&f.container_hex))).unwrap();
    let settings = ESettings::from_container(&container).unwrap();
    let plain = settings.decrypt(&settings.get_key(&password(""))).unwrap();

    let record = parse_cache(&plain, tdata_rs::decoded::settings_registry()).unwrap();
    assert_eq!(record.len(), 19);
    assert_eq!(record.get("ChatSizeMax"), Some(&Value::Int(200)));
    assert_eq!(record.get("MegagroupSizeMax"), Some(&Value::Int(200_000)));
    assert_eq!(record.get("StickersFavedLimit"), Some(&Value::Int(5)));
    assert_eq!(record.get("AutoUpdate"), Some(&Value::Int(1)));
    assert_eq!(record.get("TryIPv6"), Some(&Value::Int(1)));
    assert_eq!(
        record.get("LoggedPhoneNumber").and_then(Value::as_str),
        Some("5551999779070")
    );
    assert_eq!(
        record.get("DcOptions").and_then(Value::as_bytes).map(<[u8]>::len),
        Some(604)
    );
    assert_eq!(
        record.get("LangPackKey"),
        Some(&Value::Uint(0xa642_b244_95ee_2a55))
    );

    let conn = record.get("ConnectionType").and_then(Value::as_record).unwrap();
    assert_eq!(conn.get("type"), Some(&Value::Int(4)));
    assert_eq!(conn.get("count"), Some(&Value::Int(0)));
    assert_eq!(conn.get("index"), Some(&Value::Int(-1)));
    assert_eq!(conn.get("proxies").and_then(Value::as_list), Some(&[][..]));

    let window = record.get("WindowPosition").and_then(Value::as_record).unwrap();
    let fields: Vec<&Value> = window.iter().map(|e| &e.value).collect();
    assert_eq!(
        fields,
        [
            &Value::Int(2),
            &Value::Int(962),
            &Value::Int(904),
            &Value::Int(912),
            &Value::Uint(3_329_492_287),
            &Value::Int(0),
        ]
    );
}

#[test]
fn settings_fixture_truncations_rejected() {
    let v = load_vectors();
    let plain = unhex(&v.settings_fixture.plaintext_hex);
    let registry = tdata_rs::decoded::settings_registry();
    // inside the window position, the phone number, the DC options and an int
    for cut in [plain.len() - 1, 730, 400, 70] {
        assert!(
            parse_cache(&plain[..cut], registry).is_err(),
            "cut at {cut} parsed"
        );
    }
}
