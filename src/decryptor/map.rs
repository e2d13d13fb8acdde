//! src/decryptor/map.rs
//! Map / key file: `salt(32) | key_encrypted | map_encrypted`.

use crate::aliases::{LocalKey, PasswordString};
use crate::container::Container;
use crate::crypto::kdf::KdfScheme;
use crate::decryptor::{check_salted, salted_streams, ContainerDecoder, KeyWrapping};
use crate::error::TdataError;

/// Schemes tried by [`EMap::get_key`] unless overridden: current clients first.
pub const DEFAULT_MAP_SCHEMES: &[KdfScheme] = &[KdfScheme::Strong, KdfScheme::Legacy];

/// The three streams of a map file (`tdata/<account>/map0`, or `key_data` in
/// newer clients).
#[derive(Debug, Clone)]
pub struct EMap {
    /// 32 bytes.
    pub salt: Vec<u8>,
    /// The local key, wrapped with the passkey (0x120 bytes in practice).
    pub key_encrypted: Vec<u8>,
    /// The file directory, encrypted with the local key.
    pub map_encrypted: Vec<u8>,
    schemes: &'static [KdfScheme],
}

impl EMap {
    /// Interpret a container as a map file.
    ///
    /// # Errors
    ///
    /// [`TdataError::Format`] unless the payload holds exactly 3 streams and the
    /// first one is a 32-byte salt.
    pub fn from_container(container: &Container) -> Result<Self, TdataError> {
        Self::build(salted_streams(container, 3, "map")?)
    }

    /// Interpret already split streams (salt, wrapped key, encrypted map).
    pub fn from_streams(streams: Vec<Vec<u8>>) -> Result<Self, TdataError> {
        Self::build(check_salted(streams, 3, "map")?)
    }

    fn build(streams: Vec<Vec<u8>>) -> Result<Self, TdataError> {
        let mut streams = streams.into_iter();
        match (streams.next(), streams.next(), streams.next()) {
            (Some(salt), Some(key_encrypted), Some(map_encrypted)) => Ok(Self {
                salt,
                key_encrypted,
                map_encrypted,
                schemes: DEFAULT_MAP_SCHEMES,
            }),
            _ => Err(TdataError::Format("map: expected 3 streams".into())),
        }
    }

    /// Restrict or reorder the derivation schemes [`get_key`](ContainerDecoder::get_key) tries.
    #[must_use]
    pub fn with_schemes(mut self, schemes: &'static [KdfScheme]) -> Self {
        self.schemes = schemes;
        self
    }

    /// Recover the local key. Shorthand for [`ContainerDecoder::get_key`].
    pub fn get_key(&self, password: &PasswordString) -> Result<LocalKey, TdataError> {
        ContainerDecoder::get_key(self, password)
    }

    /// Decrypt the file directory; feed the result to
    /// [`read_dmap`](crate::decoded::read_dmap).
    pub fn decrypt_map(&self, key: &LocalKey) -> Result<Vec<u8>, TdataError> {
        self.decrypt(key)
    }
}

impl ContainerDecoder for EMap {
    fn salt(&self) -> &[u8] {
        &self.salt
    }

    fn key_wrapping(&self) -> KeyWrapping<'_> {
        KeyWrapping::Wrapped(&self.key_encrypted)
    }

    fn encrypted_payload(&self) -> &[u8] {
        &self.map_encrypted
    }

    fn kdf_schemes(&self) -> &[KdfScheme] {
        self.schemes
    }
}
