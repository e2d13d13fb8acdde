//! src/batch_ops.rs
//! Parallel decryption of many files sharing one local key.
//!
//! A profile holds hundreds of small files (media index, stickers, drafts), all
//! encrypted with the same [`LocalKey`]. These helpers fan the work out over the
//! rayon pool; results keep the input order.

use rayon::prelude::*;
use std::io::Read;

use crate::aliases::LocalKey;
use crate::container::{read_container, Container};
use crate::decryptor::decrypt_local;
use crate::error::TdataError;

/// Decrypt every blob with `key`. Each blob fails or succeeds on its own.
pub fn decrypt_batch(
    encrypted: &[&[u8]],
    key: &LocalKey,
) -> Vec<Result<Vec<u8>, TdataError>> {
    encrypted
        .par_iter()
        .map(|blob| decrypt_local(blob, key))
        .collect()
}

/// Read a container from every reader.
pub fn read_containers_batch<R>(readers: Vec<R>) -> Vec<Result<Container, TdataError>>
where
    R: Read + Send,
{
    readers.into_par_iter().map(read_container).collect()
}
