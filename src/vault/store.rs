//! High-level vault operations used by CLI commands.
//!
//! A [`Vault`] holds one DEK wrapped once per registered password, plus
//! a map of entries each sealed under that DEK.  Typical use:
//!
//! ```no_run
//! # fn main() -> vaultr::errors::Result<()> {
//! use vaultr::vault::Vault;
//!
//! let mut vault = Vault::new("secrets.vaultr");
//! vault.read()?;
//! vault.authenticate("correct horse")?;
//! vault.set_value("API_KEY", "secret123")?;
//! vault.write()?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use zeroize::Zeroize;

use crate::crypto::{open, seal, Dek, SealedBlob, SuiteSet};
use crate::errors::{Result, VaultrError};

use super::format;

/// The main vault handle.
pub struct Vault {
    /// Path to the vault file on disk.
    path: PathBuf,

    /// Cipher suites for wrapping the DEK and sealing entries.
    suites: SuiteSet,

    /// Present after `initialize` or a successful `authenticate`.
    dek: Option<Dek>,

    /// The DEK wrapped under each password, in storage order.
    passwords: Vec<SealedBlob>,

    /// Entry key -> value sealed under the DEK.
    entries: HashMap<String, SealedBlob>,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// An empty, locked vault bound to `path` using the default suites.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_suites(path, SuiteSet::default())
    }

    /// An empty, locked vault using an explicit pair of suite lists.
    pub fn with_suites(path: impl Into<PathBuf>, suites: SuiteSet) -> Self {
        Self {
            path: path.into(),
            suites,
            dek: None,
            passwords: Vec::new(),
            entries: HashMap::new(),
        }
    }

    /// Start a brand-new vault: fresh DEK, no passwords, no entries.
    ///
    /// Any previous in-memory state (including an unwritten DEK) is
    /// discarded.
    pub fn initialize(&mut self) -> Result<()> {
        let dek = Dek::generate()?;

        self.dek = Some(dek);
        self.passwords.clear();
        self.entries.clear();

        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Load passwords and entries from disk.  Nothing is decrypted and
    /// the vault is left locked.
    pub fn read(&mut self) -> Result<()> {
        let file = format::read_vault(&self.path)?;

        self.dek = None;
        self.passwords = file.passwords;
        self.entries = file.entries.into_iter().collect();

        Ok(())
    }

    /// Write passwords and entries to disk, replacing the file atomically.
    pub fn write(&self) -> Result<()> {
        format::write_vault(&self.path, &self.passwords, &self.entries)
    }

    // ------------------------------------------------------------------
    // Password operations
    // ------------------------------------------------------------------

    /// Unlock the vault by unwrapping the DEK with `password`.
    ///
    /// Tries every wrapped DEK in storage order and keeps the first one
    /// that opens.  Failure never reveals how many were tried.
    pub fn authenticate(&mut self, password: &str) -> Result<()> {
        for wrapped in &self.passwords {
            if let Ok(plaintext) = open(password.as_bytes(), wrapped, self.suites.hardened) {
                self.dek = Some(Dek::from_unwrapped(plaintext));
                return Ok(());
            }
        }

        Err(VaultrError::BadCredentials)
    }

    /// Wrap the live DEK under `password` and register it.
    pub fn add_password(&mut self, password: &str) -> Result<()> {
        let dek = self.dek()?;
        let wrapped = seal(password.as_bytes(), dek.as_bytes(), self.suites.hardened)?;

        self.passwords.push(wrapped);
        Ok(())
    }

    /// Unregister the first wrapped DEK that `password` opens.
    ///
    /// The last remaining password can never be removed, whatever the
    /// password given.
    pub fn remove_password(&mut self, password: &str) -> Result<()> {
        self.dek()?;

        if self.passwords.len() == 1 {
            return Err(VaultrError::LastPassword);
        }

        let position = self
            .passwords
            .iter()
            .position(|wrapped| open(password.as_bytes(), wrapped, self.suites.hardened).is_ok())
            .ok_or(VaultrError::BadCredentials)?;

        self.passwords.remove(position);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Add or replace an entry.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let dek = self.dek()?;
        let sealed = seal(dek.as_bytes(), value.as_bytes(), self.suites.light)?;

        self.entries.insert(key.to_string(), sealed);
        Ok(())
    }

    /// Remove an entry.
    pub fn remove_value(&mut self, key: &str) -> Result<()> {
        self.dek()?;

        if self.entries.remove(key).is_none() {
            return Err(VaultrError::KeyNotFound(key.to_string()));
        }
        Ok(())
    }

    /// Decrypt and return a single entry.
    pub fn get_value(&self, key: &str) -> Result<String> {
        let sealed = self
            .entries
            .get(key)
            .ok_or_else(|| VaultrError::KeyNotFound(key.to_string()))?;

        self.open_entry(sealed)
    }

    /// Decrypt every entry.  Fails on the first entry that won't open.
    pub fn get_values(&self) -> Result<HashMap<String, String>> {
        self.dek()?;

        let mut map = HashMap::with_capacity(self.entries.len());

        for (key, sealed) in &self.entries {
            map.insert(key.clone(), self.open_entry(sealed)?);
        }

        Ok(map)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` once a DEK is held in memory.
    pub fn is_unlocked(&self) -> bool {
        self.dek.is_some()
    }

    /// Number of registered passwords.
    pub fn password_count(&self) -> usize {
        self.passwords.len()
    }

    /// Number of stored entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Metadata-only check, no decryption.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entry keys in sorted order, no decryption.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn dek(&self) -> Result<&Dek> {
        self.dek.as_ref().ok_or(VaultrError::VaultLocked)
    }

    fn open_entry(&self, sealed: &SealedBlob) -> Result<String> {
        let dek = self.dek()?;
        let mut plaintext = open(dek.as_bytes(), sealed, self.suites.light)?;

        // Take the bytes out of the zeroizing buffer without copying.
        String::from_utf8(std::mem::take(&mut *plaintext)).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            VaultrError::InvalidVaultFormat("entry value is not valid UTF-8".to_string())
        })
    }
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("path", &self.path)
            .field("unlocked", &self.dek.is_some())
            .field("passwords", &self.passwords.len())
            .field("entries", &self.entries.len())
            .finish()
    }
}
