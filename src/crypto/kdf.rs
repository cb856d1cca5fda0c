//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  The cost parameters come from the [`CipherSuite`]
//! a blob was (or will be) sealed with.

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

use super::suite::CipherSuite;
use crate::errors::{Result, VaultrError};

/// Derive `suite.key_len` bytes from `secret` and `salt` using Argon2id.
///
/// The same secret + salt + suite always produce the same key.  The
/// returned buffer is wiped when dropped.
pub fn derive_key(secret: &[u8], salt: &[u8], suite: &CipherSuite) -> Result<Zeroizing<Vec<u8>>> {
    let params = Params::new(
        suite.memory_kib,
        suite.time_cost,
        suite.parallelism,
        Some(suite.key_len),
    )
    .map_err(|e| VaultrError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new(vec![0u8; suite.key_len]);
    argon2
        .hash_password_into(secret, salt, &mut key)
        .map_err(|e| VaultrError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}
