// src/crypto/mod.rs

//! Low-level crypto primitives.
//!
//! - [`kdf`] - passkey derivation (legacy PBKDF2-SHA1 and strong PBKDF2-SHA512)
//! - [`ige`] - AES-256 in IGE mode
//! - [`msg_key`] - AES key/IV carved from the local key and a message key
//! - [`rng`] - OS randomness for encryption padding

pub mod ige;
pub mod kdf;
pub mod msg_key;
pub mod rng;
