// src/encryptor/mod.rs

//! Local encryption, the inverse of [`decrypt_local`](crate::decryptor::decrypt_local).
//!
//! The recovery path never needs it; it exists to build test fixtures and to
//! re-pack edited files.

pub(crate) mod local;

pub use local::{encrypt_local, encrypt_local_with_padding, padding_len};
