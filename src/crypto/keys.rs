//! The data-encryption key and the random source behind it.

use rand::TryRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::{Result, VaultrError};

/// Length of the data-encryption key in bytes.
pub const DEK_LEN: usize = 64;

/// Fill `buf` from the operating system CSPRNG.
pub fn fill_random(buf: &mut [u8]) -> Result<()> {
    rand::rngs::OsRng
        .try_fill_bytes(buf)
        .map_err(|e| VaultrError::RandomSource(e.to_string()))
}

/// Allocate `len` random bytes.
pub fn random_bytes(len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    fill_random(&mut buf)?;
    Ok(buf)
}

/// The key every entry is sealed under.
///
/// Lives only in memory and is wiped when dropped.  It is wrapped once
/// per registered password before it ever touches disk.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Dek {
    bytes: Vec<u8>,
}

impl Dek {
    /// Generate a fresh random DEK.
    pub fn generate() -> Result<Self> {
        let mut bytes = vec![0u8; DEK_LEN];
        fill_random(&mut bytes)?;
        Ok(Self { bytes })
    }

    /// Adopt an unwrapped DEK.  The buffer is moved, not copied.
    pub fn from_unwrapped(mut plaintext: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bytes: std::mem::take(&mut *plaintext),
        }
    }

    /// Access the raw key bytes (e.g. to feed the entry KDF).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Dek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Dek(..)")
    }
}
