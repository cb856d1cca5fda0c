//! Line-oriented vault file format.
//!
//! Every line is the standard (padded) base64 of some bytes, terminated
//! by `\n`:
//!
//! ```text
//! <wrapped DEK #1>
//! <wrapped DEK #2>
//! ...
//! <empty line>            end of the passwords section
//! <key #1>  <sealed value #1>
//! <key #2>  <sealed value #2>
//! ...
//! ```
//!
//! Keys and values alternate one per line.  Entries are always written
//! sorted by key so identical state produces identical bytes.  Nothing
//! here decrypts anything.

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::crypto::SealedBlob;
use crate::errors::{Result, VaultrError};

/// The structural contents of a vault file.
#[derive(Debug, Default)]
pub struct VaultFile {
    /// Wrapped DEKs, in file order.
    pub passwords: Vec<SealedBlob>,
    /// Key / sealed value pairs, in file order.
    pub entries: Vec<(String, SealedBlob)>,
}

/// Serialize passwords and entries into `writer`.
pub fn encode<W: Write>(
    writer: &mut W,
    passwords: &[SealedBlob],
    entries: &HashMap<String, SealedBlob>,
) -> Result<()> {
    for password in passwords {
        write_line(writer, password.as_bytes())?;
    }

    // Section separator: base64 of nothing is an empty line.
    write_line(writer, &[])?;

    let mut keys: Vec<&String> = entries.keys().collect();
    keys.sort();

    for key in keys {
        write_line(writer, key.as_bytes())?;
        write_line(writer, entries[key].as_bytes())?;
    }

    Ok(())
}

/// Parse a vault file from `reader` without decrypting anything.
pub fn decode<R: BufRead>(reader: &mut R) -> Result<VaultFile> {
    let mut file = VaultFile::default();

    // --- Passwords, up to EOF or the empty separator line ---
    while let Some(blob) = read_line(reader)? {
        if blob.is_empty() {
            break;
        }
        file.passwords.push(SealedBlob::from_bytes(blob));
    }

    // --- Key/value pairs up to EOF ---
    while let Some(key_bytes) = read_line(reader)? {
        let key = String::from_utf8(key_bytes)
            .map_err(|_| VaultrError::InvalidVaultFormat("entry key is not valid UTF-8".into()))?;

        let value = read_line(reader)?.ok_or_else(|| {
            VaultrError::InvalidVaultFormat(format!("entry '{key}' has no value line"))
        })?;

        file.entries.push((key, SealedBlob::from_bytes(value)));
    }

    Ok(file)
}

/// Write a vault file to disk **atomically**.
///
/// The bytes go to a temp file in the same directory which is then
/// renamed over `path`, so readers never see a half-written file.  On
/// unix the temp file is owner-only from the moment it exists.
pub fn write_vault(
    path: &Path,
    passwords: &[SealedBlob],
    entries: &HashMap<String, SealedBlob>,
) -> Result<()> {
    let mut buf = Vec::new();
    encode(&mut buf, passwords, entries)?;

    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let mut file = create_private(&tmp_path)?;

    let result = file
        .write_all(&buf)
        .and_then(|()| file.sync_all())
        .and_then(|()| fs::rename(&tmp_path, path));

    if let Err(e) = result {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Create (or truncate) `path` for writing with mode 0600 on unix.
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options.open(path)?;

    // A stale temp file keeps its old mode, so tighten it explicitly.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    Ok(file)
}

/// Read and parse a vault file from disk.
pub fn read_vault(path: &Path) -> Result<VaultFile> {
    if !path.exists() {
        return Err(VaultrError::VaultNotFound(path.to_path_buf()));
    }

    let file = fs::File::open(path)?;
    decode(&mut BufReader::new(file))
}

fn write_line<W: Write>(writer: &mut W, data: &[u8]) -> Result<()> {
    let mut line = BASE64.encode(data).into_bytes();
    line.push(b'\n');
    writer.write_all(&line)?;
    Ok(())
}

/// Read one line and base64-decode it.  `None` means clean EOF.
///
/// A final line without a trailing newline is still returned.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut raw = Vec::new();
    if reader.read_until(b'\n', &mut raw)? == 0 {
        return Ok(None);
    }

    if raw.last() == Some(&b'\n') {
        raw.pop();
    }

    BASE64
        .decode(&raw)
        .map(Some)
        .map_err(|e| VaultrError::InvalidVaultFormat(format!("bad base64 line: {e}")))
}
