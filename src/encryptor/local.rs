//! src/encryptor/local.rs
//! Local encryption, the mirror of `decryptor/local.rs`.

use crate::aliases::LocalKey;
use crate::consts::{AES_BLOCK_LEN, MSG_KEY_LEN};
use crate::crypto::ige::aes_ige_encrypt;
use crate::crypto::msg_key::derive_aes_key_iv;
use crate::crypto::rng::fill_random;
use crate::error::TdataError;
use sha1::{Digest, Sha1};

/// Padding needed after `len(u32) ‖ data` to reach a block boundary.
#[inline(always)]
#[must_use]
pub const fn padding_len(plaintext_len: usize) -> usize {
    let data_len = plaintext_len + 4;
    (AES_BLOCK_LEN - data_len % AES_BLOCK_LEN) % AES_BLOCK_LEN
}

/// Encrypt `plaintext` the way the client writes local files, with random padding.
///
/// # Errors
///
/// [`TdataError::Io`] if the OS RNG fails, otherwise as for
/// [`encrypt_local_with_padding`].
pub fn encrypt_local(plaintext: &[u8], key: &LocalKey) -> Result<Vec<u8>, TdataError> {
    let mut padding = [0u8; AES_BLOCK_LEN];
    let padding = &mut padding[..padding_len(plaintext.len())];
    fill_random(padding)?;
    encrypt_local_with_padding(plaintext, key, padding)
}

/// Encrypt with caller-chosen padding bytes (deterministic output for fixtures).
///
/// # Errors
///
/// - [`TdataError::Crypto`] if `padding` is not exactly [`padding_len`] bytes
/// - [`TdataError::Format`] if `plaintext` does not fit the `u32` length field
pub fn encrypt_local_with_padding(
    plaintext: &[u8],
    key: &LocalKey,
    padding: &[u8],
) -> Result<Vec<u8>, TdataError> {
    let expected = padding_len(plaintext.len());
    if padding.len() != expected {
        return Err(TdataError::Crypto(format!(
            "padding must be {expected} bytes, got {}",
            padding.len()
        )));
    }
    let data_len = u32::try_from(plaintext.len() + 4)
        .map_err(|_| TdataError::Format("plaintext too large for local encryption".into()))?;

    let mut body = Vec::with_capacity(data_len as usize + padding.len());
    body.extend_from_slice(&data_len.to_le_bytes());
    body.extend_from_slice(plaintext);
    body.extend_from_slice(padding);

    let digest = Sha1::digest(&body);
    let msg_key = &digest[..MSG_KEY_LEN];
    let (aes_key, aes_iv) = derive_aes_key_iv(key, msg_key);
    aes_ige_encrypt(&mut body, &aes_key, &aes_iv)?;

    let mut out = Vec::with_capacity(MSG_KEY_LEN + body.len());
    out.extend_from_slice(msg_key);
    out.extend_from_slice(&body);
    Ok(out)
}
