//! Cryptographic primitives for Vaultr.
//!
//! This module provides:
//! - Versioned cipher suite lists (`suite`)
//! - Argon2id key derivation (`kdf`)
//! - AES-GCM sealing and opening of self-describing blobs (`encryption`)
//! - The in-memory data-encryption key (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod suite;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, Dek, HARDENED, LIGHT, ...};
pub use encryption::{open, seal, SealedBlob};
pub use keys::Dek;
pub use suite::{CipherSuite, SuiteSet, HARDENED, LIGHT};
