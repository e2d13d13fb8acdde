//! # Secure-Gate Type Aliases
//!
//! Type aliases for secret material, backed by [`secure-gate`](https://github.com/Slurp9187/secure-gate).
//! Every type here only reveals its bytes through an explicit
//! `.expose_secret()` / `.expose_secret_mut()`.
//!
//! ## Type Categories
//!
//! ### Keys
//! - [`LocalKey`] - 256-byte key that decrypts most files of a storage directory
//! - [`Passkey`] - 256-byte key derived from password + salt
//! - [`AesKey32`] - per-message AES-256 key
//! - [`IgeIv32`] - per-message AES-IGE IV (two 16-byte halves)
//! - [`LocalSalt32`] - salt stored in map and settings files
//!
//! ### Buffers
//! - [`SpanBuffer<N>`] - generic secure stack buffer for any size `N`
//! - [`Block16`] - one AES block
//!
//! ### Dynamic Secrets
//! - [`PasswordString`] - user password

use secure_gate::{Dynamic, Fixed};

use crate::consts::{LOCAL_KEY_LEN, LOCAL_SALT_LEN};

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic secure stack buffer
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = Fixed<[u8; N]>;

pub type Block16 = SpanBuffer<16>; // one AES block

// ─────────────────────────────────────────────────────────────────────────────
// Key material
// ─────────────────────────────────────────────────────────────────────────────
pub type LocalKey = SpanBuffer<LOCAL_KEY_LEN>; // unwrapped from the map / key file
pub type Passkey = SpanBuffer<LOCAL_KEY_LEN>; // PBKDF2 output
pub type AesKey32 = SpanBuffer<32>; // carved from key + msg_key
pub type IgeIv32 = SpanBuffer<32>; // carved from key + msg_key
pub type LocalSalt32 = SpanBuffer<LOCAL_SALT_LEN>; // first stream of map / settings

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type PasswordString = Dynamic<String>;
