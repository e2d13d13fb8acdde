//! Utility functions used across the library.

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by the AES-IGE chaining in both directions.
///
/// # Panics (by contract)
///
/// Panics if any of the slices is shorter than 16 bytes. Callers only pass
/// AES blocks and 16-byte halves of [`IgeIv32`](crate::aliases::IgeIv32).
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// Renders a file key the way the client names its storage files.
///
/// Sixteen uppercase hex nibbles, least significant nibble first, so
/// `0x0123456789ABCDEF` becomes `"FEDCBA9876543210"`.
#[must_use]
pub fn to_file_part(file_key: u64) -> String {
    let mut value = file_key;
    let mut out = String::with_capacity(16);
    for _ in 0..16 {
        let nibble = (value & 0x0F) as u8;
        out.push(char::from(if nibble < 10 {
            b'0' + nibble
        } else {
            b'A' + nibble - 10
        }));
        value >>= 4;
    }
    out
}

/// Inverse of [`to_file_part`]. Returns `None` for anything that is not exactly
/// sixteen hex digits.
#[must_use]
pub fn from_file_part(identifier: &str) -> Option<u64> {
    if identifier.len() != 16 {
        return None;
    }
    let mut value = 0u64;
    for (i, c) in identifier.chars().enumerate() {
        let nibble = u64::from(c.to_digit(16)?);
        value |= nibble << (4 * i);
    }
    Some(value)
}
