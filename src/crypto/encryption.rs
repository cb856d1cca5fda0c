//! AES-GCM authenticated encryption under an Argon2id-derived key.
//!
//! Every call to [`seal`] draws a fresh salt and nonce, so the derived
//! key and the nonce are never reused together.
//!
//! Layout of a sealed blob:
//!   [ version: 1 | salt: salt_len | nonce: nonce_len | ciphertext + 16-byte tag ]
//!
//! The version byte selects which [`CipherSuite`] re-derives the key on
//! [`open`].  Any failure while opening collapses into
//! [`VaultrError::BadCredentials`].

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit, Nonce};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use zeroize::Zeroizing;

use super::kdf::derive_key;
use super::keys::random_bytes;
use super::suite::{self, CipherSuite};
use crate::errors::{Result, VaultrError};

/// AES-192 in GCM mode with a 96-bit nonce.
type Aes192Gcm = AesGcm<Aes192, U12>;

/// A self-describing ciphertext produced by [`seal`].
#[derive(Clone, PartialEq, Eq)]
pub struct SealedBlob(Vec<u8>);

impl SealedBlob {
    /// Wrap bytes read from storage.  No validation happens until [`open`].
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The suite version tag, if the blob is non-empty.
    pub fn version(&self) -> Option<u8> {
        self.0.first().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SealedBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealedBlob")
            .field("version", &self.version())
            .field("len", &self.0.len())
            .finish()
    }
}

/// Encrypt `plaintext` under a key derived from `secret`, using the last
/// suite in `suites`.
pub fn seal(secret: &[u8], plaintext: &[u8], suites: &[CipherSuite]) -> Result<SealedBlob> {
    let suite = suite::current(suites)?;
    suite.validate()?;

    let salt = random_bytes(suite.salt_len)?;
    let nonce = random_bytes(suite.nonce_len)?;
    let key = derive_key(secret, &salt, suite)?;

    let ciphertext = match suite.key_len {
        16 => aead_encrypt::<Aes128Gcm>(&key, &nonce, plaintext),
        24 => aead_encrypt::<Aes192Gcm>(&key, &nonce, plaintext),
        32 => aead_encrypt::<Aes256Gcm>(&key, &nonce, plaintext),
        other => Err(VaultrError::EncryptionFailed(format!(
            "unsupported AES key length {other}"
        ))),
    }?;

    let mut output = Vec::with_capacity(suite.header_len() + ciphertext.len());
    output.push(suite.version);
    output.extend_from_slice(&salt);
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(SealedBlob(output))
}

/// Decrypt a blob produced by [`seal`] with any suite still present in
/// `suites`.
///
/// Wrong secret, tampering, truncation and unknown versions all yield
/// the same [`VaultrError::BadCredentials`].
pub fn open(secret: &[u8], blob: &SealedBlob, suites: &[CipherSuite]) -> Result<Zeroizing<Vec<u8>>> {
    if blob.is_empty() {
        return Err(VaultrError::BadCredentials);
    }
    let data = blob.as_bytes();
    let version = data[0];

    let suite = suite::lookup(suites, version).ok_or(VaultrError::BadCredentials)?;
    suite
        .validate()
        .map_err(|_| VaultrError::BadCredentials)?;

    if data.len() < suite.header_len() {
        return Err(VaultrError::BadCredentials);
    }

    let salt = &data[1..1 + suite.salt_len];
    let nonce = &data[1 + suite.salt_len..suite.header_len()];
    let ciphertext = &data[suite.header_len()..];

    let key = derive_key(secret, salt, suite).map_err(|_| VaultrError::BadCredentials)?;

    let plaintext = match suite.key_len {
        16 => aead_decrypt::<Aes128Gcm>(&key, nonce, ciphertext),
        24 => aead_decrypt::<Aes192Gcm>(&key, nonce, ciphertext),
        32 => aead_decrypt::<Aes256Gcm>(&key, nonce, ciphertext),
        _ => Err(VaultrError::BadCredentials),
    }?;

    Ok(Zeroizing::new(plaintext))
}

// `nonce` must already match the cipher's nonce size; `CipherSuite::validate`
// pins it to 12 bytes before we get here.
fn aead_encrypt<C: Aead + KeyInit>(key: &[u8], nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key)
        .map_err(|e| VaultrError::EncryptionFailed(format!("invalid key length: {e}")))?;

    cipher
        .encrypt(Nonce::<C>::from_slice(nonce), plaintext)
        .map_err(|e| VaultrError::EncryptionFailed(format!("encryption error: {e}")))
}

fn aead_decrypt<C: Aead + KeyInit>(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key).map_err(|_| VaultrError::BadCredentials)?;

    cipher
        .decrypt(Nonce::<C>::from_slice(nonce), ciphertext)
        .map_err(|_| VaultrError::BadCredentials)
}
