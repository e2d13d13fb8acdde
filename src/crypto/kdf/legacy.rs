//! src/crypto/kdf/legacy.rs
//! Legacy passkey derivation: PBKDF2-HMAC-SHA1 over the raw password

use crate::aliases::{Passkey, PasswordString};
use crate::consts::{LEGACY_ITERATIONS, LEGACY_NO_PASSWORD_ITERATIONS};
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;

#[inline(always)]
pub(crate) const fn iterations(empty_password: bool) -> u32 {
    if empty_password {
        LEGACY_NO_PASSWORD_ITERATIONS
    } else {
        LEGACY_ITERATIONS
    }
}

/// Derive a legacy passkey directly into the caller's buffer.
///
/// - PBKDF2-HMAC-SHA1, 256-byte output
/// - 4 rounds for an empty password, 4000 otherwise
#[inline(always)]
pub fn derive_legacy_passkey(password: &PasswordString, salt: &[u8], out_key: &mut Passkey) {
    let password = password.expose_secret().as_bytes();
    pbkdf2_hmac::<Sha1>(
        password,
        salt,
        iterations(password.is_empty()),
        out_key.expose_secret_mut(),
    );
}
