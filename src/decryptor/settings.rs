//! src/decryptor/settings.rs
//! Settings file: `salt(32) | settings_encrypted`.
//!
//! Settings are written before any passcode is known, so the key is always the
//! legacy passkey of the (normally empty) password.

use crate::aliases::{LocalKey, PasswordString};
use crate::container::Container;
use crate::crypto::kdf::{derive_passkey, KdfScheme};
use crate::decryptor::{salted_streams, ContainerDecoder, KeyWrapping};
use crate::error::TdataError;

const SETTINGS_SCHEMES: &[KdfScheme] = &[KdfScheme::Legacy];

/// The two streams of `tdata/settings0` / `settings1`.
#[derive(Debug, Clone)]
pub struct ESettings {
    /// 32 bytes.
    pub salt: Vec<u8>,
    pub settings_encrypted: Vec<u8>,
}

impl ESettings {
    /// Interpret a container as a settings file.
    ///
    /// # Errors
    ///
    /// [`TdataError::Format`] unless the payload holds exactly 2 streams and the
    /// first one is a 32-byte salt.
    pub fn from_container(container: &Container) -> Result<Self, TdataError> {
        let mut streams = salted_streams(container, 2, "settings")?.into_iter();
        match (streams.next(), streams.next()) {
            (Some(salt), Some(settings_encrypted)) => Ok(Self {
                salt,
                settings_encrypted,
            }),
            _ => Err(TdataError::Format("settings: expected 2 streams".into())),
        }
    }

    /// Derive the settings key. Never fails and never looks at the payload;
    /// a wrong password only shows up in [`decrypt`](Self::decrypt).
    #[must_use]
    pub fn get_key(&self, password: &PasswordString) -> LocalKey {
        derive_passkey(password, &self.salt, KdfScheme::Legacy)
    }

    /// Decrypt the settings payload; feed the result to
    /// [`parse_cache`](crate::decoded::parse_cache).
    pub fn decrypt(&self, key: &LocalKey) -> Result<Vec<u8>, TdataError> {
        ContainerDecoder::decrypt(self, key)
    }
}

impl ContainerDecoder for ESettings {
    fn salt(&self) -> &[u8] {
        &self.salt
    }

    fn key_wrapping(&self) -> KeyWrapping<'_> {
        KeyWrapping::Direct
    }

    fn encrypted_payload(&self) -> &[u8] {
        &self.settings_encrypted
    }

    fn kdf_schemes(&self) -> &[KdfScheme] {
        SETTINGS_SCHEMES
    }
}
