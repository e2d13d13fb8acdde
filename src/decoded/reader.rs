//! src/decoded/reader.rs
//! Big-endian cursor over a decrypted blob, in the layout of Qt's `QDataStream`.

use crate::consts::NULL_LENGTH;
use crate::error::TdataError;

/// Reads tags and fixed or length-prefixed values from a decrypted payload.
///
/// Every read either consumes exactly the bytes of one value or fails with
/// [`TdataError::Format`]; nothing is consumed on failure.
#[derive(Debug, Clone)]
pub struct TagReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> TagReader<'a> {
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next unread byte.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take the next `n` bytes.
    pub fn read_raw(&mut self, n: usize) -> Result<&'a [u8], TdataError> {
        if n > self.remaining() {
            return Err(TdataError::Format(format!(
                "value truncated at offset {}: need {n} bytes, have {}",
                self.pos,
                self.remaining()
            )));
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], TdataError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_raw(N)?);
        Ok(buf)
    }

    pub fn read_u32(&mut self) -> Result<u32, TdataError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, TdataError> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, TdataError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Leading tag of a record entry.
    #[inline(always)]
    pub fn read_tag(&mut self) -> Result<u32, TdataError> {
        self.read_u32()
    }

    /// Length-prefixed byte array. A null array reads as empty.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, TdataError> {
        let start = self.pos;
        let len = self.read_u32()?;
        if len == NULL_LENGTH {
            return Ok(Vec::new());
        }
        self.read_raw(len as usize)
            .map(<[u8]>::to_vec)
            .inspect_err(|_| self.pos = start)
    }

    /// Length-prefixed UTF-16BE string; the prefix counts bytes. A null string
    /// reads as empty.
    pub fn read_string(&mut self) -> Result<String, TdataError> {
        let start = self.pos;
        let len = self.read_u32()?;
        if len == NULL_LENGTH {
            return Ok(String::new());
        }
        let decoded = self.read_raw(len as usize).and_then(|raw| {
            if raw.len() % 2 != 0 {
                return Err(TdataError::Format(format!(
                    "string at offset {start} has odd byte length {len}"
                )));
            }
            let units: Vec<u16> = raw
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).map_err(|_| {
                TdataError::Format(format!("string at offset {start} is not valid UTF-16"))
            })
        });
        if decoded.is_err() {
            self.pos = start;
        }
        decoded
    }
}
