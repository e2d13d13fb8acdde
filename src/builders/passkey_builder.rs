//! src/builders/passkey_builder.rs
//! Passkey derivation builder

use crate::aliases::{LocalSalt32, Passkey, PasswordString};
use crate::consts::{LOCAL_KEY_LEN, LOCAL_SALT_LEN};
use crate::crypto::kdf::{derive_legacy_passkey, derive_strong_passkey, KdfScheme};
use crate::crypto::rng::fill_random;
use crate::error::TdataError;

/// Passkey derivation builder.
///
/// Defaults to [`KdfScheme::Strong`], the scheme current clients write key
/// files with. Settings files always use [`KdfScheme::Legacy`].
///
/// # Thread Safety
///
/// `Send + Sync`; derivation touches no shared state.
///
/// # Example
///
/// ```
/// use tdata_rs::{KdfScheme, PasskeyBuilder, PasswordString};
///
/// let passkey = PasskeyBuilder::new([7u8; 32])
///     .with_scheme(KdfScheme::Legacy)
///     .derive(&PasswordString::new(String::new()));
/// assert_eq!(passkey.expose_secret().len(), 256);
/// ```
#[derive(Debug, Clone)]
pub struct PasskeyBuilder {
    scheme: KdfScheme,
    salt: LocalSalt32,
}

impl PasskeyBuilder {
    /// Builder over an existing salt (the first stream of a map or settings file).
    #[must_use]
    pub fn new(salt: impl Into<[u8; LOCAL_SALT_LEN]>) -> Self {
        Self {
            scheme: KdfScheme::Strong,
            salt: LocalSalt32::new(salt.into()),
        }
    }

    /// Builder over a fresh random salt, for writing new files.
    ///
    /// # Errors
    ///
    /// [`TdataError::Io`] if the OS RNG cannot be read.
    pub fn random() -> Result<Self, TdataError> {
        let mut salt = [0u8; LOCAL_SALT_LEN];
        fill_random(&mut salt)?;
        Ok(Self::new(salt))
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: KdfScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Current salt, to store next to the data it protects.
    #[must_use]
    pub fn salt(&self) -> &[u8; LOCAL_SALT_LEN] {
        self.salt.expose_secret()
    }

    #[must_use]
    pub const fn scheme(&self) -> KdfScheme {
        self.scheme
    }

    /// Derive into a caller-provided secure buffer.
    #[inline(always)]
    pub fn derive_into(&self, password: &PasswordString, out_key: &mut Passkey) {
        let salt = self.salt.expose_secret();
        match self.scheme {
            KdfScheme::Legacy => derive_legacy_passkey(password, salt, out_key),
            KdfScheme::Strong => derive_strong_passkey(password, salt, out_key),
        }
    }

    /// Derive and return a fresh passkey.
    #[must_use]
    pub fn derive(&self, password: &PasswordString) -> Passkey {
        let mut key = Passkey::new([0u8; LOCAL_KEY_LEN]);
        self.derive_into(password, &mut key);
        key
    }
}
