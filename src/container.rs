//! # Container Reader
//!
//! Every file in a tdata directory is wrapped in the same envelope:
//!
//! ```text
//! magic(4) | version(u32 LE) | payload(..) | md5(16)
//! ```
//!
//! The payload length is implicit (everything between the version and the
//! trailing digest). The digest covers
//! `payload ‖ len(payload) as u32 LE ‖ version as u32 LE ‖ magic`.
//!
//! A digest mismatch does not fail the read: damaged files are still worth
//! decrypting, so the outcome is reported through [`Container::integrity_ok`].

use crate::consts::{CONTAINER_DIGEST_LEN, TDEF_MAGIC, TDF_MAGIC};
use crate::error::TdataError;
use crate::streams::read_streams;
use md5::{Digest, Md5};
use std::io::{Read, Write};
use tracing::{debug, warn};

/// Recognized container signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magic {
    /// `TDF$`, written by every current client.
    Tdf,
    /// `TDEF`, the earlier revision.
    Tdef,
}

impl Magic {
    /// The four signature bytes.
    #[must_use]
    pub const fn bytes(self) -> [u8; 4] {
        match self {
            Self::Tdf => TDF_MAGIC,
            Self::Tdef => TDEF_MAGIC,
        }
    }

    /// Matches raw signature bytes, `None` when unrecognized.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 4]) -> Option<Self> {
        match bytes {
            TDF_MAGIC => Some(Self::Tdf),
            TDEF_MAGIC => Some(Self::Tdef),
            _ => None,
        }
    }
}

/// A parsed container envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub magic: Magic,
    /// Client version that wrote the file, e.g. `1003007` for 1.3.7.
    pub version: u32,
    pub payload: Vec<u8>,
    /// Digest stored at the end of the file.
    pub digest: [u8; CONTAINER_DIGEST_LEN],
    /// Whether the recomputed digest matched [`digest`](Self::digest).
    pub integrity_ok: bool,
}

impl Container {
    /// Splits the payload into its length-framed streams.
    pub fn streams(&self) -> Result<Vec<Vec<u8>>, TdataError> {
        read_streams(&self.payload)
    }

    /// Stored digest as lowercase hex.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

/// Computes the envelope digest for the given parts.
#[must_use]
pub fn container_digest(magic: Magic, version: u32, payload: &[u8]) -> [u8; CONTAINER_DIGEST_LEN] {
    let payload_len = u32::try_from(payload.len()).unwrap_or(u32::MAX);
    let mut hasher = Md5::new();
    hasher.update(payload);
    hasher.update(payload_len.to_le_bytes());
    hasher.update(version.to_le_bytes());
    hasher.update(magic.bytes());
    hasher.finalize().into()
}

#[inline(always)]
fn read_exact_span<R, const N: usize>(reader: &mut R) -> Result<[u8; N], TdataError>
where
    R: Read,
{
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => {
            TdataError::Format(format!("container truncated: expected {N} more bytes"))
        }
        _ => TdataError::Io(e),
    })?;
    Ok(buf)
}

fn read_magic<R: Read>(reader: &mut R) -> Result<Magic, TdataError> {
    let raw = read_exact_span::<_, 4>(reader)?;
    Magic::from_bytes(raw).ok_or_else(|| {
        TdataError::Format(format!(
            "not a tdata file: invalid magic {:02x?}",
            raw.as_slice()
        ))
    })
}

/// Reads only the magic and version of a container.
///
/// Cheap way to tell which client version produced a file without reading
/// its payload.
///
/// # Errors
///
/// - [`TdataError::Format`] - unknown magic or fewer than 8 bytes of input
/// - [`TdataError::Io`] - the reader failed
///
/// # Example
///
/// ```
/// use tdata_rs::read_version;
/// use std::io::Cursor;
///
/// let header = b"TDF$\xff\x4d\x0f\x00";
/// assert_eq!(read_version(Cursor::new(header))?, 1_003_007);
/// # Ok::<(), tdata_rs::TdataError>(())
/// ```
pub fn read_version<R: Read>(mut reader: R) -> Result<u32, TdataError> {
    read_magic(&mut reader)?;
    Ok(u32::from_le_bytes(read_exact_span(&mut reader)?))
}

/// Reads a whole container from `reader`.
///
/// # Errors
///
/// - [`TdataError::Format`] - unknown magic, truncated version, or fewer than
///   16 bytes left for the trailing digest
/// - [`TdataError::Io`] - the reader failed
pub fn read_container<R: Read>(mut reader: R) -> Result<Container, TdataError> {
    let magic = read_magic(&mut reader)?;
    let version = u32::from_le_bytes(read_exact_span(&mut reader)?);

    let mut rest = Vec::new();
    reader.read_to_end(&mut rest)?;
    if rest.len() < CONTAINER_DIGEST_LEN {
        return Err(TdataError::Format(format!(
            "container truncated: {} bytes left, digest needs {CONTAINER_DIGEST_LEN}",
            rest.len()
        )));
    }

    let payload_len = rest.len() - CONTAINER_DIGEST_LEN;
    let mut digest = [0u8; CONTAINER_DIGEST_LEN];
    digest.copy_from_slice(&rest[payload_len..]);
    rest.truncate(payload_len);
    let payload = rest;

    let integrity_ok = container_digest(magic, version, &payload) == digest;
    if integrity_ok {
        debug!(version, payload_len, "container read");
    } else {
        warn!(
            version,
            payload_len,
            stored = %hex::encode(digest),
            "container digest mismatch"
        );
    }

    Ok(Container {
        magic,
        version,
        payload,
        digest,
        integrity_ok,
    })
}

/// Writes a container with a freshly computed digest.
pub fn write_container<W: Write>(
    mut writer: W,
    magic: Magic,
    version: u32,
    payload: &[u8],
) -> Result<(), TdataError> {
    writer.write_all(&magic.bytes())?;
    writer.write_all(&version.to_le_bytes())?;
    writer.write_all(payload)?;
    writer.write_all(&container_digest(magic, version, payload))?;
    Ok(())
}
