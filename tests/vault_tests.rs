//! Integration tests for the Vaultr vault module.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use vaultr::crypto::{CipherSuite, SealedBlob, SuiteSet};
use vaultr::errors::VaultrError;
use vaultr::vault::{format, Vault};

static FAST: &[CipherSuite] = &[CipherSuite {
    version: 1,
    salt_len: 16,
    nonce_len: 12,
    key_len: 32,
    time_cost: 1,
    memory_kib: 64,
    parallelism: 1,
}];

static FAST_LIGHT: &[CipherSuite] = &[CipherSuite {
    version: 1,
    salt_len: 16,
    nonce_len: 12,
    key_len: 24,
    time_cost: 1,
    memory_kib: 64,
    parallelism: 1,
}];

fn suites() -> SuiteSet {
    SuiteSet {
        hardened: FAST,
        light: FAST_LIGHT,
    }
}

/// Helper: create a temporary vault file path inside a fresh temp dir.
fn vault_path() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.vaultr");
    (dir, path)
}

fn open_vault(path: &Path) -> Vault {
    let mut vault = Vault::with_suites(path, suites());
    vault.read().expect("read vault");
    vault
}

fn create_vault(path: &Path, passwords: &[&str]) -> Vault {
    let mut vault = Vault::with_suites(path, suites());
    vault.initialize().unwrap();
    for pw in passwords {
        vault.add_password(pw).unwrap();
    }
    vault.write().unwrap();
    vault
}

// ---------------------------------------------------------------------------
// Create, reload, authenticate
// ---------------------------------------------------------------------------

#[test]
fn create_and_authenticate() {
    let (_dir, path) = vault_path();
    create_vault(&path, &["password1"]);

    let mut vault = open_vault(&path);
    assert!(!vault.is_unlocked());
    assert_eq!(vault.password_count(), 1);

    vault.authenticate("password1").expect("right password");
    assert!(vault.is_unlocked());

    let mut vault = open_vault(&path);
    let err = vault.authenticate("wrongpass").unwrap_err();
    assert_eq!(err.to_string(), "bad credentials");
    assert!(!vault.is_unlocked());
}

#[test]
fn set_value_survives_reload() {
    let (_dir, path) = vault_path();
    create_vault(&path, &["password1"]);

    let mut vault = open_vault(&path);
    vault.authenticate("password1").unwrap();
    vault.set_value("API_KEY", "secret123").unwrap();
    vault.write().unwrap();

    let mut vault = open_vault(&path);
    vault.authenticate("password1").unwrap();
    assert_eq!(vault.get_value("API_KEY").unwrap(), "secret123");
}

#[test]
fn empty_and_multiline_values_roundtrip() {
    let (_dir, path) = vault_path();
    let mut vault = create_vault(&path, &["password1"]);
    vault.set_value("EMPTY", "").unwrap();
    vault.set_value("PEM", "-----BEGIN-----\nabc\n-----END-----\n").unwrap();
    vault.set_value("UNICODE", "pässwörd ✓").unwrap();
    vault.write().unwrap();

    let mut vault = open_vault(&path);
    vault.authenticate("password1").unwrap();
    assert_eq!(vault.get_value("EMPTY").unwrap(), "");
    assert_eq!(
        vault.get_value("PEM").unwrap(),
        "-----BEGIN-----\nabc\n-----END-----\n"
    );
    assert_eq!(vault.get_value("UNICODE").unwrap(), "pässwörd ✓");
}

#[test]
fn read_missing_file_fails() {
    let (_dir, path) = vault_path();
    let mut vault = Vault::with_suites(&path, suites());
    assert!(matches!(vault.read(), Err(VaultrError::VaultNotFound(_))));
}

// ---------------------------------------------------------------------------
// Entry operations
// ---------------------------------------------------------------------------

#[test]
fn missing_keys_report_not_found() {
    let (_dir, path) = vault_path();
    let mut vault = create_vault(&path, &["password1"]);

    let err = vault.remove_value("missing").unwrap_err();
    assert_eq!(err.to_string(), "key not found");
    assert!(matches!(vault.get_value("missing"), Err(VaultrError::KeyNotFound(_))));
}

#[test]
fn get_values_on_empty_vault_is_empty() {
    let (_dir, path) = vault_path();
    let vault = create_vault(&path, &["password1"]);
    assert!(vault.get_values().unwrap().is_empty());
}

#[test]
fn remove_value_persists() {
    let (_dir, path) = vault_path();
    let mut vault = create_vault(&path, &["password1"]);
    vault.set_value("A", "1").unwrap();
    vault.set_value("B", "2").unwrap();
    vault.remove_value("A").unwrap();
    vault.write().unwrap();

    let mut vault = open_vault(&path);
    vault.authenticate("password1").unwrap();
    assert_eq!(vault.keys(), vec!["B"]);
}

#[test]
fn locked_vault_cannot_decrypt_or_mutate() {
    let (_dir, path) = vault_path();
    let mut vault = create_vault(&path, &["password1"]);
    vault.set_value("A", "1").unwrap();
    vault.write().unwrap();

    let mut vault = open_vault(&path);
    assert!(matches!(vault.get_value("A"), Err(VaultrError::VaultLocked)));
    assert!(matches!(vault.get_values(), Err(VaultrError::VaultLocked)));
    assert!(matches!(vault.set_value("B", "2"), Err(VaultrError::VaultLocked)));
    assert!(matches!(vault.add_password("password2"), Err(VaultrError::VaultLocked)));
    assert!(matches!(vault.remove_value("A"), Err(VaultrError::VaultLocked)));
    assert!(matches!(
        vault.remove_password("password1"),
        Err(VaultrError::VaultLocked)
    ));

    vault.authenticate("password1").unwrap();
    vault.remove_value("A").unwrap();
}

#[test]
fn locked_empty_vault_still_refuses_get_values() {
    let (_dir, path) = vault_path();
    create_vault(&path, &["password1"]);

    let vault = open_vault(&path);
    assert!(matches!(vault.get_values(), Err(VaultrError::VaultLocked)));
}

#[test]
fn get_values_fails_fast_on_corrupt_entry() {
    let (_dir, path) = vault_path();
    let mut vault = create_vault(&path, &["password1"]);
    vault.set_value("GOOD", "fine").unwrap();
    vault.set_value("BAD", "soon broken").unwrap();
    vault.write().unwrap();

    // Flip a ciphertext byte of one entry on disk.
    let file = format::read_vault(&path).unwrap();
    let mut entries: HashMap<String, SealedBlob> = HashMap::new();
    for (key, blob) in file.entries {
        let blob = if key == "BAD" {
            let mut bytes = blob.as_bytes().to_vec();
            let last = bytes.len() - 1;
            bytes[last] ^= 0xFF;
            SealedBlob::from_bytes(bytes)
        } else {
            blob
        };
        entries.insert(key, blob);
    }
    format::write_vault(&path, &file.passwords, &entries).unwrap();

    let mut vault = open_vault(&path);
    vault.authenticate("password1").unwrap();
    assert_eq!(vault.get_value("GOOD").unwrap(), "fine");
    assert!(matches!(vault.get_value("BAD"), Err(VaultrError::BadCredentials)));
    assert!(matches!(vault.get_values(), Err(VaultrError::BadCredentials)));
}

// ---------------------------------------------------------------------------
// Password operations
// ---------------------------------------------------------------------------

#[test]
fn any_registered_password_unlocks_the_same_entries() {
    let (_dir, path) = vault_path();
    let mut vault = create_vault(&path, &["alpha-pass", "bravo-pass", "charlie-pass"]);
    vault.set_value("SHARED", "one dek").unwrap();
    vault.write().unwrap();

    for pw in ["alpha-pass", "bravo-pass", "charlie-pass"] {
        let mut vault = open_vault(&path);
        vault.authenticate(pw).unwrap();
        assert_eq!(vault.get_value("SHARED").unwrap(), "one dek");
    }
}

#[test]
fn password_added_after_reload_unlocks_existing_entries() {
    let (_dir, path) = vault_path();
    let mut vault = create_vault(&path, &["password1"]);
    vault.set_value("K", "V").unwrap();
    vault.write().unwrap();

    let mut vault = open_vault(&path);
    vault.authenticate("password1").unwrap();
    vault.add_password("password2").unwrap();
    vault.write().unwrap();

    let mut vault = open_vault(&path);
    vault.authenticate("password2").unwrap();
    assert_eq!(vault.get_value("K").unwrap(), "V");
}

#[test]
fn remove_password_then_reload() {
    let (_dir, path) = vault_path();
    create_vault(&path, &["password-a", "password-b"]);

    let mut vault = open_vault(&path);
    vault.authenticate("password-a").unwrap();
    vault.remove_password("password-a").unwrap();
    vault.write().unwrap();

    let mut vault = open_vault(&path);
    assert_eq!(vault.password_count(), 1);
    assert!(matches!(
        vault.authenticate("password-a"),
        Err(VaultrError::BadCredentials)
    ));
    vault.authenticate("password-b").unwrap();

    let err = vault.remove_password("password-b").unwrap_err();
    assert!(err.is_state_error());
    assert_eq!(err.to_string(), "cannot remove last password");
}

#[test]
fn last_password_guard_ignores_credentials() {
    let (_dir, path) = vault_path();
    let mut vault = create_vault(&path, &["password1"]);

    for pw in ["password1", "wrongpass", ""] {
        assert!(matches!(
            vault.remove_password(pw),
            Err(VaultrError::LastPassword)
        ));
    }
    assert_eq!(vault.password_count(), 1);
}

#[test]
fn remove_unknown_password_is_bad_credentials() {
    let (_dir, path) = vault_path();
    let mut vault = create_vault(&path, &["password1", "password2"]);

    assert!(matches!(
        vault.remove_password("password3"),
        Err(VaultrError::BadCredentials)
    ));
    assert_eq!(vault.password_count(), 2);
}

#[test]
fn remove_password_preserves_order_of_remaining() {
    let (_dir, path) = vault_path();
    create_vault(&path, &["first-pass", "second-pass", "third-pass"]);

    let before = format::read_vault(&path).unwrap().passwords;

    let mut vault = open_vault(&path);
    vault.authenticate("third-pass").unwrap();
    vault.remove_password("second-pass").unwrap();
    vault.write().unwrap();

    let after = format::read_vault(&path).unwrap().passwords;
    assert_eq!(after, vec![before[0].clone(), before[2].clone()]);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn write_read_write_is_byte_identical() {
    let (dir, path) = vault_path();
    let mut vault = create_vault(&path, &["password1", "password2"]);
    for (k, v) in [("ZETA", "z"), ("ALPHA", "a"), ("MIKE", "m")] {
        vault.set_value(k, v).unwrap();
    }
    vault.write().unwrap();
    let first = fs::read(&path).unwrap();

    let copy = dir.path().join("copy.vaultr");
    let mut reloaded = open_vault(&path);
    reloaded.authenticate("password2").unwrap();
    let values = reloaded.get_values().unwrap();

    let mut rewritten = Vault::with_suites(&copy, suites());
    fs::copy(&path, &copy).unwrap();
    rewritten.read().unwrap();
    rewritten.write().unwrap();

    assert_eq!(first, fs::read(&copy).unwrap());
    assert_eq!(values.len(), 3);
    assert_eq!(values["ALPHA"], "a");
}

#[test]
fn entries_are_written_sorted_by_key() {
    let (_dir, path) = vault_path();
    let mut vault = create_vault(&path, &["password1"]);
    for k in ["c", "a", "b"] {
        vault.set_value(k, "v").unwrap();
    }
    vault.write().unwrap();

    let keys: Vec<String> = format::read_vault(&path)
        .unwrap()
        .entries
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn encoding_ignores_insertion_order() {
    let blobs: Vec<(String, SealedBlob)> = (0..20)
        .map(|i| (format!("KEY_{i:02}"), SealedBlob::from_bytes(vec![1, i as u8])))
        .collect();

    let forward: HashMap<_, _> = blobs.iter().cloned().collect();
    let backward: HashMap<_, _> = blobs.iter().rev().cloned().collect();

    let mut a = Vec::new();
    let mut b = Vec::new();
    format::encode(&mut a, &[], &forward).unwrap();
    format::encode(&mut b, &[], &backward).unwrap();
    assert_eq!(a, b);
}

#[test]
fn dangling_key_in_file_is_rejected() {
    let (_dir, path) = vault_path();
    fs::write(&path, "\nQVBJX0tFWQ==\n").unwrap();

    let mut vault = Vault::with_suites(&path, suites());
    assert!(matches!(
        vault.read(),
        Err(VaultrError::InvalidVaultFormat(_))
    ));
}

#[test]
fn read_discards_live_dek() {
    let (_dir, path) = vault_path();
    let mut vault = create_vault(&path, &["password1"]);
    assert!(vault.is_unlocked());

    vault.read().unwrap();
    assert!(!vault.is_unlocked());
}

#[cfg(unix)]
#[test]
fn vault_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = vault_path();
    create_vault(&path, &["password1"]);

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
