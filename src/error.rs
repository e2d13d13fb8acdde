//! # Error Types
//!
//! This module defines the error types used throughout the library.
//! All operations return [`Result<T, TdataError>`](TdataError).

use thiserror::Error;

/// The error type for all tdata operations.
///
/// The variants follow the failure classes of the storage format: a malformed
/// envelope or framing ([`Format`](TdataError::Format)), a failed decryption
/// ([`Crypto`](TdataError::Crypto)) and a tag the decoder has no layout for
/// ([`UnknownTag`](TdataError::UnknownTag)).
#[derive(Error, Debug)]
pub enum TdataError {
    /// I/O error while reading a container.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed container envelope, stream framing or structured value.
    ///
    /// Fatal for the file being decoded; retrying will not help.
    #[error("Format error: {0}")]
    Format(String),

    /// Decryption failed: the embedded SHA-1 digest or the length/padding field
    /// did not check out.
    ///
    /// Almost always a wrong password (or key). Deterministic, so it is safe to
    /// retry with another password.
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// A structured value contained a tag missing from the registry.
    ///
    /// The value widths are only known through the registry, so decoding cannot
    /// skip over it.
    #[error("Registry error: unknown tag 0x{tag:02x} in {registry} registry")]
    UnknownTag {
        /// The tag read from the stream.
        tag: u32,
        /// Name of the registry that was consulted.
        registry: &'static str,
    },
}

impl TdataError {
    /// Returns `true` for failures a different password could fix.
    #[must_use]
    pub const fn is_crypto(&self) -> bool {
        matches!(self, Self::Crypto(_))
    }
}

impl From<&'static str> for TdataError {
    fn from(msg: &'static str) -> Self {
        TdataError::Format(msg.to_string())
    }
}
