//! Versioned cipher suite registry.
//!
//! A suite list is an ordered slice of [`CipherSuite`]s.  Sealing always
//! uses the last entry; opening looks up the entry whose `version`
//! matches the first byte of the blob.  New versions are appended so old
//! blobs keep decrypting.

use crate::errors::{Result, VaultrError};

/// AES-GCM only accepts 96-bit nonces in this crate.
pub const GCM_NONCE_LEN: usize = 12;

/// One versioned set of KDF and AEAD parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherSuite {
    /// Wire tag written as the first byte of every blob. `0` is reserved.
    pub version: u8,
    pub salt_len: usize,
    pub nonce_len: usize,
    /// Bytes of Argon2id output fed to AES-GCM (16, 24 or 32).
    pub key_len: usize,
    /// Argon2 iterations.
    pub time_cost: u32,
    /// Argon2 memory in KiB.
    pub memory_kib: u32,
    /// Argon2 lanes.
    pub parallelism: u32,
}

impl CipherSuite {
    /// Length of `version || salt || nonce`.
    pub const fn header_len(&self) -> usize {
        1 + self.salt_len + self.nonce_len
    }

    /// Check the parameters this crate can actually run with.
    pub fn validate(&self) -> Result<()> {
        if self.version == 0 {
            return Err(VaultrError::EncryptionFailed(
                "cipher suite version 0 is reserved".into(),
            ));
        }
        if self.nonce_len != GCM_NONCE_LEN {
            return Err(VaultrError::EncryptionFailed(format!(
                "unsupported nonce length {} (expected {GCM_NONCE_LEN})",
                self.nonce_len
            )));
        }
        if !matches!(self.key_len, 16 | 24 | 32) {
            return Err(VaultrError::EncryptionFailed(format!(
                "unsupported AES key length {}",
                self.key_len
            )));
        }
        Ok(())
    }
}

/// Suites used to wrap the DEK under user passwords.
pub static HARDENED: &[CipherSuite] = &[CipherSuite {
    version: 1,
    salt_len: 16,
    nonce_len: GCM_NONCE_LEN,
    key_len: 32,
    time_cost: 10,
    memory_kib: 512 * 1024,
    parallelism: 4,
}];

/// Suites used to seal entry values under the DEK.
///
/// The "password" here is the 64-byte DEK, so the cost is kept low.
pub static LIGHT: &[CipherSuite] = &[CipherSuite {
    version: 1,
    salt_len: 16,
    nonce_len: GCM_NONCE_LEN,
    key_len: 24,
    time_cost: 5,
    memory_kib: 32 * 1024,
    parallelism: 4,
}];

/// Return the suite new blobs are sealed with.
pub fn current(suites: &[CipherSuite]) -> Result<&CipherSuite> {
    suites
        .last()
        .ok_or_else(|| VaultrError::EncryptionFailed("empty cipher suite list".into()))
}

/// Find the suite registered under `version`, if any.
pub fn lookup(suites: &[CipherSuite], version: u8) -> Option<&CipherSuite> {
    suites.iter().find(|s| s.version == version)
}

/// The pair of suite lists a vault works with.
#[derive(Debug, Clone, Copy)]
pub struct SuiteSet {
    /// Wraps the DEK under each password.
    pub hardened: &'static [CipherSuite],
    /// Seals entry values under the DEK.
    pub light: &'static [CipherSuite],
}

impl Default for SuiteSet {
    fn default() -> Self {
        Self {
            hardened: HARDENED,
            light: LIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_suites_are_valid() {
        for suite in HARDENED.iter().chain(LIGHT.iter()) {
            suite.validate().unwrap();
        }
    }

    #[test]
    fn builtin_parameters_match_format_v1() {
        let hardened = current(HARDENED).unwrap();
        assert_eq!(hardened.version, 1);
        assert_eq!(hardened.key_len, 32);
        assert_eq!(hardened.memory_kib, 524_288);
        assert_eq!(hardened.time_cost, 10);

        let light = current(LIGHT).unwrap();
        assert_eq!(light.key_len, 24);
        assert_eq!(light.memory_kib, 32_768);
        assert_eq!(light.time_cost, 5);
        assert_eq!(light.header_len(), 29);
    }

    #[test]
    fn current_is_last_entry() {
        let two = [
            CipherSuite { version: 1, ..HARDENED[0] },
            CipherSuite { version: 2, ..HARDENED[0] },
        ];
        assert_eq!(current(&two).unwrap().version, 2);
        assert!(current(&[]).is_err());
    }

    #[test]
    fn lookup_by_version() {
        assert_eq!(lookup(LIGHT, 1).map(|s| s.key_len), Some(24));
        assert!(lookup(LIGHT, 0).is_none());
        assert!(lookup(LIGHT, 7).is_none());
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        let base = HARDENED[0];
        assert!(CipherSuite { version: 0, ..base }.validate().is_err());
        assert!(CipherSuite { nonce_len: 16, ..base }.validate().is_err());
        assert!(CipherSuite { key_len: 20, ..base }.validate().is_err());
    }
}
