//! # Stream Codec
//!
//! Container payloads (and several decrypted blobs) are sequences of
//! `[u32 BE length][bytes]` frames that must end exactly at the buffer end.

use crate::consts::STREAM_LEN_PREFIX;
use crate::error::TdataError;

/// Splits `data` into its length-framed streams.
///
/// # Errors
///
/// - `Format("length overruns buffer")` if a declared length runs past the end
/// - `Format("trailing bytes after last stream")` if 1–3 bytes are left over,
///   too few to hold another length prefix
pub fn read_streams(data: &[u8]) -> Result<Vec<Vec<u8>>, TdataError> {
    let mut streams = Vec::new();
    let mut rest = data;

    while !rest.is_empty() {
        if rest.len() < STREAM_LEN_PREFIX {
            return Err(TdataError::Format(
                "trailing bytes after last stream".into(),
            ));
        }
        let (prefix, tail) = rest.split_at(STREAM_LEN_PREFIX);
        let len = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
        if len > tail.len() {
            return Err(TdataError::Format("length overruns buffer".into()));
        }
        let (stream, tail) = tail.split_at(len);
        streams.push(stream.to_vec());
        rest = tail;
    }

    Ok(streams)
}

/// Frames `streams` back into a single buffer.
///
/// # Panics
///
/// Panics if a stream is longer than `u32::MAX` bytes.
#[must_use]
pub fn write_streams<S: AsRef<[u8]>>(streams: &[S]) -> Vec<u8> {
    let total = streams
        .iter()
        .map(|s| STREAM_LEN_PREFIX + s.as_ref().len())
        .sum();
    let mut out = Vec::with_capacity(total);
    for stream in streams {
        let bytes = stream.as_ref();
        let len = u32::try_from(bytes.len()).expect("stream longer than u32::MAX");
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(bytes);
    }
    out
}
