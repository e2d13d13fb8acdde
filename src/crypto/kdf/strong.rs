//! src/crypto/kdf/strong.rs
//! Strong passkey derivation: SHA-512 pre-hash, then PBKDF2-HMAC-SHA512

use crate::aliases::{Passkey, PasswordString, SpanBuffer};
use crate::consts::{STRONG_ITERATIONS, STRONG_NO_PASSWORD_ITERATIONS};
use pbkdf2::pbkdf2_hmac;
use sha2::{Digest, Sha512};

#[inline(always)]
pub(crate) const fn iterations(empty_password: bool) -> u32 {
    if empty_password {
        STRONG_NO_PASSWORD_ITERATIONS
    } else {
        STRONG_ITERATIONS
    }
}

/// Derive a strong passkey directly into the caller's buffer.
///
/// - `h = SHA-512(salt ‖ password ‖ salt)`
/// - PBKDF2-HMAC-SHA512 with `h` as password, 256-byte output
/// - 1 round for an empty password, 100 000 otherwise
#[inline(always)]
pub fn derive_strong_passkey(password: &PasswordString, salt: &[u8], out_key: &mut Passkey) {
    let password = password.expose_secret().as_bytes();

    let mut prehash = SpanBuffer::<64>::new([0u8; 64]);
    let mut hasher = Sha512::new();
    hasher.update(salt);
    hasher.update(password);
    hasher.update(salt);
    prehash
        .expose_secret_mut()
        .copy_from_slice(hasher.finalize().as_slice());

    pbkdf2_hmac::<Sha512>(
        prehash.expose_secret(),
        salt,
        iterations(password.is_empty()),
        out_key.expose_secret_mut(),
    );
}
