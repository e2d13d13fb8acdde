//! # Builders
//!
//! Fluent configuration for key derivation.
//!
//! - [`passkey_builder`] - passkey derivation with a chosen salt and scheme

pub mod passkey_builder;

pub use passkey_builder::PasskeyBuilder;
