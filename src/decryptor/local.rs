//! src/decryptor/local.rs
//! Decryption of locally encrypted blobs.
//!
//! ```text
//! msg_key(16) | AES-256-IGE( len(u32 LE) | data | padding )
//! ```
//!
//! `msg_key` is the first 16 bytes of SHA-1 over the whole padded plaintext, so it
//! doubles as the integrity check. `len` counts itself plus `data`; padding is
//! always shorter than one block.

use crate::aliases::LocalKey;
use crate::consts::{AES_BLOCK_LEN, MSG_KEY_LEN};
use crate::crypto::ige::aes_ige_decrypt;
use crate::crypto::msg_key::derive_aes_key_iv;
use crate::error::TdataError;
use sha1::{Digest, Sha1};

/// Decrypt one locally encrypted blob with a local key (or passkey).
///
/// Used for the wrapped key and directory of map files, the payload of settings
/// files, and every numbered stream of the other files in a storage directory.
///
/// # Errors
///
/// All failures are [`TdataError::Crypto`]:
/// - input not `16 + k·16` bytes with `k ≥ 1`
/// - SHA-1 digest mismatch (`"wrong key or corrupted ciphertext"`)
/// - length field out of range (`"bad padding ..."`)
pub fn decrypt_local(encrypted: &[u8], key: &LocalKey) -> Result<Vec<u8>, TdataError> {
    if encrypted.len() <= MSG_KEY_LEN || (encrypted.len() - MSG_KEY_LEN) % AES_BLOCK_LEN != 0 {
        return Err(TdataError::Crypto(format!(
            "bad encrypted part size: {}",
            encrypted.len()
        )));
    }

    let (msg_key, body) = encrypted.split_at(MSG_KEY_LEN);
    let (aes_key, aes_iv) = derive_aes_key_iv(key, msg_key);

    let mut decrypted = body.to_vec();
    aes_ige_decrypt(&mut decrypted, &aes_key, &aes_iv)?;

    let digest = Sha1::digest(&decrypted);
    if digest[..MSG_KEY_LEN] != *msg_key {
        decrypted.fill(0);
        return Err(TdataError::Crypto(
            "wrong key or corrupted ciphertext".into(),
        ));
    }

    let full_len = decrypted.len();
    let data_len = u32::from_le_bytes([decrypted[0], decrypted[1], decrypted[2], decrypted[3]]) as usize;
    if data_len > full_len || data_len <= full_len - AES_BLOCK_LEN || data_len < 4 {
        decrypted.fill(0);
        return Err(TdataError::Crypto(format!(
            "bad padding: length field {data_len} for {full_len} decrypted bytes"
        )));
    }

    decrypted.truncate(data_len);
    decrypted.drain(..4);
    Ok(decrypted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LOCAL_KEY_LEN;
    use crate::encryptor::encrypt_local;

    fn key(byte: u8) -> LocalKey {
        LocalKey::new([byte; LOCAL_KEY_LEN])
    }

    #[test]
    fn roundtrip_various_sizes() {
        let k = key(0x5A);
        for len in [0usize, 1, 11, 12, 13, 28, 100] {
            let plain: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let enc = encrypt_local(&plain, &k).unwrap();
            assert_eq!((enc.len() - MSG_KEY_LEN) % AES_BLOCK_LEN, 0);
            assert_eq!(decrypt_local(&enc, &k).unwrap(), plain, "len {len}");
        }
    }

    #[test]
    fn wrong_key_is_crypto_error() {
        let enc = encrypt_local(b"secret", &key(1)).unwrap();
        let err = decrypt_local(&enc, &key(2)).unwrap_err();
        assert!(err.is_crypto());
        assert_eq!(
            err.to_string(),
            "Crypto error: wrong key or corrupted ciphertext"
        );
    }

    #[test]
    fn tampered_body_is_crypto_error() {
        let k = key(3);
        let mut enc = encrypt_local(b"0123456789abcdef0123", &k).unwrap();
        let last = enc.len() - 1;
        enc[last] ^= 1;
        assert!(decrypt_local(&enc, &k).unwrap_err().is_crypto());
    }

    #[test]
    fn bad_sizes_rejected() {
        let k = key(4);
        for len in [0usize, 16, 17, 31, 33] {
            let err = decrypt_local(&vec![0u8; len], &k).unwrap_err();
            assert!(err.is_crypto(), "len {len}");
        }
    }
}
