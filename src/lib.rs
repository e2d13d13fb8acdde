// src/lib.rs

//! Reader and decryptor for the `tdata` local-storage directory of the desktop
//! messenger client.
//!
//! The layers, bottom up:
//!
//! 1. [`container`] - `TDF$` envelope with an MD5 integrity digest
//! 2. [`streams`] - length-prefixed byte streams inside the envelope
//! 3. [`crypto`] - passkey derivation and AES-256-IGE local encryption
//! 4. [`decryptor`] - settings and map files, local-key recovery
//! 5. [`decoded`] - tag registries turning plaintexts into [`Record`]s
//!
//! ```no_run
//! use std::fs::File;
//! use tdata_rs::{read_container, read_dmap, EMap, PasswordString};
//!
//! let container = read_container(File::open("tdata/key_datas")?)?;
//! let map = EMap::from_container(&container)?;
//! let key = map.get_key(&PasswordString::new(String::new()))?;
//! for file in read_dmap(&map.decrypt_map(&key)?)?.files {
//!     println!("{} {}", file.identifier, file.kind);
//! }
//! # Ok::<(), tdata_rs::TdataError>(())
//! ```

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod builders;
pub mod consts;
pub mod container;
pub mod crypto;
pub mod decoded;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod streams;
pub mod utils;

// Recovery path
pub use container::{read_container, read_version, Container, Magic};
pub use decryptor::{decrypt_local, decrypt_stream, ContainerDecoder, EMap, ESettings};
pub use decoded::{parse_cache, read_dmap, DirectoryMap, Record, Registry, Value};
pub use error::TdataError;
pub use streams::read_streams;

// Key material
pub use aliases::{LocalKey, Passkey, PasswordString};
pub use builders::PasskeyBuilder;
pub use crypto::kdf::{derive_passkey, KdfScheme};

// Writing side
pub use container::write_container;
pub use encryptor::encrypt_local;
pub use streams::write_streams;

pub use utils::to_file_part;

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decrypt_batch, read_containers_batch};
