// src/crypto/rng.rs
//! OS randomness for encryption padding and fresh salts.

use crate::error::TdataError;
use rand::{rngs::OsRng, TryRngCore};
use std::cell::RefCell;
use std::io;

thread_local! {
    static RNG: RefCell<OsRng> = const { RefCell::new(OsRng) };
}

/// Fill `dest` from the thread-local OS RNG.
///
/// # Errors
///
/// [`TdataError::Io`] when the OS RNG cannot be read; `dest` is then unspecified
/// and must not be used.
#[inline(always)]
pub fn fill_random(dest: &mut [u8]) -> Result<(), TdataError> {
    RNG.with(|rng_cell| {
        let mut rng = rng_cell.borrow_mut();
        rng.try_fill_bytes(dest).map_err(|e| {
            tracing::warn!(len = dest.len(), error = %e, "OS RNG unavailable");
            TdataError::Io(io::Error::other(e))
        })
    })
}
