//! tests/common.rs
//! Vector loader and constants shared across test files

#![allow(dead_code)] // each test crate uses a different subset

use serde::Deserialize;
use tdata_rs::{LocalKey, PasswordString};

/// Password of the legacy map vector.
pub const TEST_PASSWORD: &str = "Hello";

/// Version stamped on the settings fixture and the legacy map vector.
pub const FIXTURE_VERSION: u32 = 1_003_007;

#[derive(Debug, Deserialize)]
pub struct MapVector {
    pub password: String,
    pub container_hex: String,
    pub passkey_hex: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingsFixture {
    pub container_hex: String,
    pub version: u32,
    pub partial_md5_hex: String,
    pub payload_len: usize,
    pub stream_lens: Vec<usize>,
    pub passkey_hex: String,
    pub plaintext_hex: String,
}

#[derive(Debug, Deserialize)]
pub struct Vectors {
    pub legacy: MapVector,
    pub strong: MapVector,
    pub local_key_hex: String,
    pub map_plaintext_hex: String,
    pub payload_plaintext: String,
    pub payload_ciphertext_hex: String,
    pub strong_hello_hex: String,
    pub salt_hex: String,
    pub settings_fixture: SettingsFixture,
}

pub fn load_vectors() -> Vectors {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("vector")
        .join("data")
        .join("tdata_vectors.json");

    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));

    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse vectors: {e}"))
}

pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap_or_else(|e| panic!("invalid hex in vectors: {e}"))
}

pub fn local_key(v: &Vectors) -> LocalKey {
    let mut key = LocalKey::new([0u8; 256]);
    key.expose_secret_mut().copy_from_slice(&unhex(&v.local_key_hex));
    key
}

pub fn password(s: &str) -> PasswordString {
    PasswordString::new(s.to_string())
}
