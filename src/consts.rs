//! # Constants
//!
//! Signatures, sizes and key-derivation parameters of the tdata storage format.

/// Current container signature.
pub const TDF_MAGIC: [u8; 4] = *b"TDF$";

/// Signature of the earlier container revision. Same layout and digest scheme.
pub const TDEF_MAGIC: [u8; 4] = *b"TDEF";

/// Size of the MD5 digest trailing every container.
pub const CONTAINER_DIGEST_LEN: usize = 16;

/// Size of the stream length prefix (big-endian `u32`).
pub const STREAM_LEN_PREFIX: usize = 4;

/// Size of the salt stored in map and settings files.
pub const LOCAL_SALT_LEN: usize = 32;

/// Size of local keys and passkeys (a 2048-bit MTProto-style auth key).
pub const LOCAL_KEY_LEN: usize = 256;

/// Size of the message key heading every locally encrypted blob.
pub const MSG_KEY_LEN: usize = 16;

/// AES block size.
pub const AES_BLOCK_LEN: usize = 16;

/// Offset into the local key used when carving AES key material for local files.
pub const LOCAL_KEY_OFFSET: usize = 8;

/// Legacy PBKDF2-HMAC-SHA1 rounds with an empty password.
pub const LEGACY_NO_PASSWORD_ITERATIONS: u32 = 4;

/// Legacy PBKDF2-HMAC-SHA1 rounds with a password.
pub const LEGACY_ITERATIONS: u32 = 4_000;

/// Strong PBKDF2-HMAC-SHA512 rounds with an empty password.
pub const STRONG_NO_PASSWORD_ITERATIONS: u32 = 1;

/// Strong PBKDF2-HMAC-SHA512 rounds with a password.
pub const STRONG_ITERATIONS: u32 = 100_000;

/// Null marker for length-prefixed byte arrays and strings.
pub const NULL_LENGTH: u32 = 0xFFFF_FFFF;
