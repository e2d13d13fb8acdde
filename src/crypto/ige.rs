//! src/crypto/ige.rs
//! AES-256 in Infinite Garble Extension mode, in place.
//!
//! The 32-byte IV holds two chaining values: `iv[..16]` is the previous
//! ciphertext block, `iv[16..]` the previous plaintext block.
//!
//! ```text
//! encrypt: c_i = E(p_i ^ c_{i-1}) ^ p_{i-1}
//! decrypt: p_i = D(c_i ^ p_{i-1}) ^ c_{i-1}
//! ```

use crate::aliases::{AesKey32, Block16, IgeIv32};
use crate::consts::AES_BLOCK_LEN;
use crate::error::TdataError;
use crate::utils::xor_blocks;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes256Dec, Aes256Enc, Block as AesBlock};

fn check_aligned(len: usize) -> Result<(), TdataError> {
    if len % AES_BLOCK_LEN != 0 {
        return Err(TdataError::Crypto(format!(
            "IGE input of {len} bytes is not block aligned"
        )));
    }
    Ok(())
}

/// Decrypts `data` in place.
pub fn aes_ige_decrypt(data: &mut [u8], key: &AesKey32, iv: &IgeIv32) -> Result<(), TdataError> {
    check_aligned(data.len())?;
    let cipher = Aes256Dec::new(key.expose_secret().into());

    let mut prev_cipher = Block16::new([0u8; 16]);
    let mut prev_plain = Block16::new([0u8; 16]);
    prev_cipher
        .expose_secret_mut()
        .copy_from_slice(&iv.expose_secret()[..16]);
    prev_plain
        .expose_secret_mut()
        .copy_from_slice(&iv.expose_secret()[16..]);

    let mut scratch = Block16::new([0u8; 16]);
    for chunk in data.chunks_exact_mut(AES_BLOCK_LEN) {
        let mut ciphertext = [0u8; 16];
        ciphertext.copy_from_slice(chunk);

        xor_blocks(&ciphertext, prev_plain.expose_secret(), scratch.expose_secret_mut());
        let mut aes_block = AesBlock::from(*scratch.expose_secret());
        cipher.decrypt_block(&mut aes_block);
        xor_blocks(aes_block.as_slice(), prev_cipher.expose_secret(), chunk);

        *prev_cipher.expose_secret_mut() = ciphertext;
        prev_plain.expose_secret_mut().copy_from_slice(chunk);
    }
    Ok(())
}

/// Encrypts `data` in place.
pub fn aes_ige_encrypt(data: &mut [u8], key: &AesKey32, iv: &IgeIv32) -> Result<(), TdataError> {
    check_aligned(data.len())?;
    let cipher = Aes256Enc::new(key.expose_secret().into());

    let mut prev_cipher = Block16::new([0u8; 16]);
    let mut prev_plain = Block16::new([0u8; 16]);
    prev_cipher
        .expose_secret_mut()
        .copy_from_slice(&iv.expose_secret()[..16]);
    prev_plain
        .expose_secret_mut()
        .copy_from_slice(&iv.expose_secret()[16..]);

    let mut plaintext = Block16::new([0u8; 16]);
    let mut scratch = Block16::new([0u8; 16]);
    for chunk in data.chunks_exact_mut(AES_BLOCK_LEN) {
        plaintext.expose_secret_mut().copy_from_slice(chunk);

        xor_blocks(
            plaintext.expose_secret(),
            prev_cipher.expose_secret(),
            scratch.expose_secret_mut(),
        );
        let mut aes_block = AesBlock::from(*scratch.expose_secret());
        cipher.encrypt_block(&mut aes_block);
        xor_blocks(aes_block.as_slice(), prev_plain.expose_secret(), chunk);

        prev_cipher.expose_secret_mut().copy_from_slice(chunk);
        *prev_plain.expose_secret_mut() = *plaintext.expose_secret();
    }
    Ok(())
}
