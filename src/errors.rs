use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Vaultr.
#[derive(Debug, Error)]
pub enum VaultrError {
    // --- Crypto errors ---
    #[error("Random source failure: {0}")]
    RandomSource(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Authentication errors ---
    /// Wrong password, tampered blob, or unsupported cipher version.
    /// The causes are indistinguishable to the caller.
    #[error("bad credentials")]
    BadCredentials,

    // --- Lookup errors ---
    #[error("key not found")]
    KeyNotFound(String),

    // --- State errors ---
    #[error("vault is locked, authenticate first")]
    VaultLocked,

    #[error("cannot remove last password")]
    LastPassword,

    // --- Vault file errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("{0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

impl VaultrError {
    /// Randomness or cipher-construction failure.
    pub fn is_crypto_error(&self) -> bool {
        matches!(
            self,
            Self::RandomSource(_) | Self::EncryptionFailed(_) | Self::KeyDerivationFailed(_)
        )
    }

    pub fn is_authentication_error(&self) -> bool {
        matches!(self, Self::BadCredentials)
    }

    /// Operation attempted without a live DEK, or removal of the last password.
    pub fn is_state_error(&self) -> bool {
        matches!(self, Self::VaultLocked | Self::LastPassword)
    }
}

/// Convenience type alias for Vaultr results.
pub type Result<T> = std::result::Result<T, VaultrError>;
