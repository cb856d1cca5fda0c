//! Audit log: SQLite-based operation history.
//!
//! Stores a record of every vault operation (create, entry:set,
//! password:remove, etc.) in a local SQLite database next to the vault
//! file, at `<vault dir>/.vaultr-audit.db`.  Only operation names, key
//! names and counts are recorded; values and passwords never are.
//!
//! Designed for graceful degradation: if the database can't be opened or
//! written to, operations silently continue without logging.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::errors::{Result, VaultrError};

/// File name of the audit database.
const DB_FILE: &str = ".vaultr-audit.db";

/// A single audit log entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub vault: String,
    pub key_name: Option<String>,
    pub details: Option<String>,
}

/// SQLite-backed audit log.
pub struct AuditLog {
    conn: Connection,
}

impl AuditLog {
    /// Open (or create) the audit database in `dir`.
    ///
    /// Returns `None` if the database can't be opened, and callers should
    /// treat this as "audit logging unavailable" and continue normally.
    pub fn open(dir: &Path) -> Option<Self> {
        let db_path = Self::db_path(dir);
        let conn = Connection::open(&db_path).ok()?;

        // Owner-only permissions on the audit database.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&db_path, perms);
        }

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit_log (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                operation TEXT NOT NULL,
                vault     TEXT NOT NULL,
                key_name  TEXT,
                details   TEXT
            );",
        )
        .ok()?;

        Some(Self { conn })
    }

    /// Record an operation. Fire-and-forget: errors are silently ignored.
    pub fn log(&self, operation: &str, vault: &str, key_name: Option<&str>, details: Option<&str>) {
        let now = Utc::now().to_rfc3339();
        let _ = self.conn.execute(
            "INSERT INTO audit_log (timestamp, operation, vault, key_name, details)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![now, operation, vault, key_name, details],
        );
    }

    /// Query the most recent `limit` entries, newest first.
    pub fn query(&self, limit: usize) -> Result<Vec<AuditEntry>> {
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, vault, key_name, details
                 FROM audit_log
                 ORDER BY id DESC
                 LIMIT ?1",
            )
            .map_err(|e| VaultrError::AuditError(format!("query prepare: {e}")))?;

        let rows = stmt
            .query_map([limit_i64], |row| {
                let ts_str: String = row.get(1)?;
                let timestamp = DateTime::parse_from_rfc3339(&ts_str)
                    .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

                Ok(AuditEntry {
                    id: row.get(0)?,
                    timestamp,
                    operation: row.get(2)?,
                    vault: row.get(3)?,
                    key_name: row.get(4)?,
                    details: row.get(5)?,
                })
            })
            .map_err(|e| VaultrError::AuditError(format!("query exec: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| VaultrError::AuditError(format!("row parse: {e}")))?);
        }

        Ok(entries)
    }

    /// Path of the audit database inside `dir`.
    pub fn db_path(dir: &Path) -> PathBuf {
        dir.join(DB_FILE)
    }
}

/// Directory that holds the audit database for a given vault file.
pub fn audit_dir(vault_path: &Path) -> PathBuf {
    match vault_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Log an event for `vault_path`, ignoring every failure.
pub fn log_event(vault_path: &Path, op: &str, key: Option<&str>, details: Option<&str>) {
    if let Some(audit) = AuditLog::open(&audit_dir(vault_path)) {
        audit.log(op, &vault_path.to_string_lossy(), key, details);
    }
}
