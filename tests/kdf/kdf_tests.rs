//! tests/kdf/kdf_tests.rs
//! Passkey derivation against independently computed vectors

#[path = "../common.rs"]
mod common;

use common::{load_vectors, password, unhex, TEST_PASSWORD};
use tdata_rs::crypto::kdf::{derive_legacy_passkey, derive_strong_passkey};
use tdata_rs::{derive_passkey, KdfScheme, Passkey, PasskeyBuilder};

#[test]
fn legacy_vector() {
    let v = load_vectors();
    let key = derive_passkey(&password(TEST_PASSWORD), &unhex(&v.salt_hex), KdfScheme::Legacy);
    assert_eq!(hex::encode(key.expose_secret()), v.legacy.passkey_hex);
}

#[test]
fn strong_vector_empty_password() {
    let v = load_vectors();
    let key = derive_passkey(&password(""), &unhex(&v.salt_hex), KdfScheme::Strong);
    assert_eq!(hex::encode(key.expose_secret()), v.strong.passkey_hex);
}

#[test]
fn strong_vector_with_password() {
    let v = load_vectors();
    let mut key = Passkey::new([0u8; 256]);
    derive_strong_passkey(&password(TEST_PASSWORD), &unhex(&v.salt_hex), &mut key);
    assert_eq!(hex::encode(key.expose_secret()), v.strong_hello_hex);
}

#[test]
fn settings_fixture_passkey() {
    let v = load_vectors();
    let f = &v.settings_fixture;
    let container = unhex(&f.container_hex);
    // salt is the first stream: magic(4) version(4) len(4) salt(32)
    let salt = &container[12..44];

    let mut key = Passkey::new([0u8; 256]);
    derive_legacy_passkey(&password(""), salt, &mut key);
    assert_eq!(hex::encode(key.expose_secret()), f.passkey_hex);
}

#[test]
fn builder_matches_vectors() {
    let v = load_vectors();
    let mut salt = [0u8; 32];
    salt.copy_from_slice(&unhex(&v.salt_hex));

    let legacy = PasskeyBuilder::new(salt)
        .with_scheme(KdfScheme::Legacy)
        .derive(&password(TEST_PASSWORD));
    assert_eq!(hex::encode(legacy.expose_secret()), v.legacy.passkey_hex);

    let strong = PasskeyBuilder::new(salt).derive(&password(""));
    assert_eq!(hex::encode(strong.expose_secret()), v.strong.passkey_hex);
}

#[test]
fn password_changes_key() {
    let salt = [9u8; 32];
    for scheme in [KdfScheme::Legacy, KdfScheme::Strong] {
        let a = derive_passkey(&password(""), &salt, scheme);
        let b = derive_passkey(&password("a"), &salt, scheme);
        assert_ne!(a.expose_secret(), b.expose_secret(), "{scheme}");
    }
}
