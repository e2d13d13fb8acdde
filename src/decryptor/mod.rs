// src/decryptor/mod.rs

//! Container decoders.
//!
//! Two kinds of container carry key material:
//!
//! - [`ESettings`] (`settings0` / `settings1`): the passkey derived from the
//!   password is directly the decryption key ([`KeyWrapping::Direct`]).
//! - [`EMap`] (`map0` / `map1`, `key_data`): the passkey only unwraps the
//!   [`LocalKey`] that decrypts everything else ([`KeyWrapping::Wrapped`]).
//!
//! Both share [`ContainerDecoder`], so the key recovery and payload decryption
//! logic exists once.

pub(crate) mod local;
pub(crate) mod map;
pub(crate) mod settings;

pub use local::decrypt_local;
pub use map::EMap;
pub use settings::ESettings;

use crate::aliases::{LocalKey, PasswordString};
use crate::consts::{LOCAL_KEY_LEN, LOCAL_SALT_LEN};
use crate::container::Container;
use crate::crypto::kdf::{derive_passkey, KdfScheme};
use crate::error::TdataError;
use crate::streams::read_streams;
use tracing::debug;

/// How a container turns a passkey into the key for its payload.
#[derive(Debug, Clone, Copy)]
pub enum KeyWrapping<'a> {
    /// The passkey is the key.
    Direct,
    /// The passkey decrypts this blob, which holds the real key as one stream.
    Wrapped(&'a [u8]),
}

/// Shared key-recovery capability of map and settings containers.
pub trait ContainerDecoder {
    /// Salt fed to the passkey derivation.
    fn salt(&self) -> &[u8];

    /// How the passkey relates to the payload key.
    fn key_wrapping(&self) -> KeyWrapping<'_>;

    /// The encrypted payload (settings blob or map directory).
    fn encrypted_payload(&self) -> &[u8];

    /// Passkey derivations to try, in order.
    fn kdf_schemes(&self) -> &[KdfScheme];

    /// Recover the key that decrypts [`encrypted_payload`](Self::encrypted_payload).
    ///
    /// For [`KeyWrapping::Direct`] the first scheme always succeeds. For
    /// [`KeyWrapping::Wrapped`] each scheme in [`kdf_schemes`](Self::kdf_schemes)
    /// is tried; if none unwraps the key, the last [`TdataError::Crypto`] is
    /// returned. An empty scheme list is a [`TdataError::Format`] error.
    fn get_key(&self, password: &PasswordString) -> Result<LocalKey, TdataError> {
        let schemes = self.kdf_schemes();
        if schemes.is_empty() {
            return Err(TdataError::Format(
                "no key derivation scheme configured".into(),
            ));
        }
        let mut last_err = TdataError::Crypto("no key derivation scheme matched".into());
        for &scheme in schemes {
            match self.get_key_with(password, scheme) {
                Ok(key) => return Ok(key),
                Err(e) if e.is_crypto() => {
                    debug!(%scheme, error = %e, "passkey did not unwrap the local key");
                    last_err = e;
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err)
    }

    /// Recover the key with one pinned derivation scheme.
    fn get_key_with(
        &self,
        password: &PasswordString,
        scheme: KdfScheme,
    ) -> Result<LocalKey, TdataError> {
        let passkey = derive_passkey(password, self.salt(), scheme);
        match self.key_wrapping() {
            KeyWrapping::Direct => Ok(passkey),
            KeyWrapping::Wrapped(wrapped) => unwrap_local_key(wrapped, &passkey),
        }
    }

    /// Decrypt the payload with a key from [`get_key`](Self::get_key).
    fn decrypt(&self, key: &LocalKey) -> Result<Vec<u8>, TdataError> {
        decrypt_local(self.encrypted_payload(), key)
    }
}

/// Decrypt a wrapped key blob and pull the local key out of its single stream.
pub(crate) fn unwrap_local_key(wrapped: &[u8], passkey: &LocalKey) -> Result<LocalKey, TdataError> {
    let mut inner = decrypt_local(wrapped, passkey)?;
    let streams = read_streams(&inner);
    inner.fill(0);
    let mut streams = streams?;

    if streams.len() != 1 {
        return Err(TdataError::Format(format!(
            "expected 1 stream in key data, got {}",
            streams.len()
        )));
    }
    let raw = &mut streams[0];
    if raw.len() != LOCAL_KEY_LEN {
        let len = raw.len();
        raw.fill(0);
        return Err(TdataError::Format(format!(
            "local key is {len} bytes, expected {LOCAL_KEY_LEN}"
        )));
    }

    let mut key = LocalKey::new([0u8; LOCAL_KEY_LEN]);
    key.expose_secret_mut().copy_from_slice(raw);
    raw.fill(0);
    Ok(key)
}

/// Split a container into exactly `expected` streams with a leading salt.
pub(crate) fn salted_streams(
    container: &Container,
    expected: usize,
    kind: &str,
) -> Result<Vec<Vec<u8>>, TdataError> {
    let streams = container
        .streams()
        .map_err(|e| TdataError::Format(format!("could not read {kind} streams: {e}")))?;
    debug!(kind, version = container.version, "container streams split");
    check_salted(streams, expected, kind)
}

/// Require exactly `expected` streams, the first being a 32-byte salt.
pub(crate) fn check_salted(
    streams: Vec<Vec<u8>>,
    expected: usize,
    kind: &str,
) -> Result<Vec<Vec<u8>>, TdataError> {
    if streams.len() != expected {
        return Err(TdataError::Format(format!(
            "{kind}: expected {expected} streams, got {}",
            streams.len()
        )));
    }
    if streams[0].len() != LOCAL_SALT_LEN {
        return Err(TdataError::Format(format!(
            "{kind}: bad salt len {}",
            streams[0].len()
        )));
    }
    Ok(streams)
}

/// Decrypt stream `index` of any container with a recovered local key.
///
/// This is how every file other than the map and settings is read once the
/// local key is known.
pub fn decrypt_stream(
    container: &Container,
    index: usize,
    key: &LocalKey,
) -> Result<Vec<u8>, TdataError> {
    let streams = container.streams()?;
    let stream = streams.get(index).ok_or_else(|| {
        TdataError::Format(format!(
            "stream {index} out of range, file has {}",
            streams.len()
        ))
    })?;
    decrypt_local(stream, key)
}
