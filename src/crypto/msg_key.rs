//! src/crypto/msg_key.rs
//! Per-message AES key/IV preparation for locally encrypted blobs.
//!
//! The ciphertext never stores an IV. Both the AES-256 key and the 32-byte IGE
//! IV are carved from four SHA-1 digests mixing the 16-byte message key with
//! 128 bytes of the 256-byte local key, starting at offset 8 (the "old MTProto"
//! preparation in its decrypt direction, which local storage uses both ways).

use crate::aliases::{AesKey32, IgeIv32, LocalKey};
use crate::consts::LOCAL_KEY_OFFSET;
use sha1::{Digest, Sha1};

/// Carve the AES key and IGE IV for `msg_key` out of `key`.
#[must_use]
pub fn derive_aes_key_iv(key: &LocalKey, msg_key: &[u8]) -> (AesKey32, IgeIv32) {
    let key = key.expose_secret();
    let x = LOCAL_KEY_OFFSET;

    let sha1_a = Sha1::new()
        .chain_update(msg_key)
        .chain_update(&key[x..x + 32])
        .finalize();
    let sha1_b = Sha1::new()
        .chain_update(&key[32 + x..48 + x])
        .chain_update(msg_key)
        .chain_update(&key[48 + x..64 + x])
        .finalize();
    let sha1_c = Sha1::new()
        .chain_update(&key[64 + x..96 + x])
        .chain_update(msg_key)
        .finalize();
    let sha1_d = Sha1::new()
        .chain_update(msg_key)
        .chain_update(&key[96 + x..128 + x])
        .finalize();

    let mut aes_key = AesKey32::new([0u8; 32]);
    {
        let out = aes_key.expose_secret_mut();
        out[..8].copy_from_slice(&sha1_a[..8]);
        out[8..20].copy_from_slice(&sha1_b[8..20]);
        out[20..32].copy_from_slice(&sha1_c[4..16]);
    }

    let mut aes_iv = IgeIv32::new([0u8; 32]);
    {
        let out = aes_iv.expose_secret_mut();
        out[..12].copy_from_slice(&sha1_a[8..20]);
        out[12..20].copy_from_slice(&sha1_b[..8]);
        out[20..24].copy_from_slice(&sha1_c[16..20]);
        out[24..32].copy_from_slice(&sha1_d[..8]);
    }

    (aes_key, aes_iv)
}
