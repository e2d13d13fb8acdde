//! # Key Derivation Functions (KDF)
//!
//! Passkeys are derived from the user password and a 32-byte salt stored next to
//! the encrypted data. The client has used two schemes over time:
//!
//! - [`legacy`] - PBKDF2-HMAC-SHA1, 4 / 4000 rounds (settings files, old map files)
//! - [`strong`] - SHA-512 pre-hash + PBKDF2-HMAC-SHA512, 1 / 100 000 rounds
//!   (key files of current clients)
//!
//! Both produce a 256-byte [`Passkey`]. Derivation is total: any password and
//! salt yields a key, and only the later digest check tells whether it is right.

pub mod legacy;
pub mod strong;

use crate::aliases::{Passkey, PasswordString};
use crate::consts::LOCAL_KEY_LEN;

pub use legacy::derive_legacy_passkey;
pub use strong::derive_strong_passkey;

/// Which passkey derivation a file was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KdfScheme {
    /// PBKDF2-HMAC-SHA1 over the raw password.
    Legacy,
    /// PBKDF2-HMAC-SHA512 over `SHA-512(salt ‖ password ‖ salt)`.
    Strong,
}

impl KdfScheme {
    /// Rounds used for `password` under this scheme.
    #[must_use]
    pub fn iterations(self, password: &PasswordString) -> u32 {
        let empty = password.expose_secret().is_empty();
        match self {
            Self::Legacy => legacy::iterations(empty),
            Self::Strong => strong::iterations(empty),
        }
    }
}

impl std::fmt::Display for KdfScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Legacy => "legacy",
            Self::Strong => "strong",
        })
    }
}

/// Derive a passkey with the given scheme into a fresh secure buffer.
#[must_use]
pub fn derive_passkey(password: &PasswordString, salt: &[u8], scheme: KdfScheme) -> Passkey {
    let mut out_key = Passkey::new([0u8; LOCAL_KEY_LEN]);
    match scheme {
        KdfScheme::Legacy => derive_legacy_passkey(password, salt, &mut out_key),
        KdfScheme::Strong => derive_strong_passkey(password, salt, &mut out_key),
    }
    out_key
}
