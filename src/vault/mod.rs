//! Vault module: envelope-encrypted secret storage.
//!
//! This module provides:
//! - The line-oriented vault file codec (`format`)
//! - The `Vault` state and its password/entry operations (`store`)

pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use format::VaultFile;
pub use store::Vault;
