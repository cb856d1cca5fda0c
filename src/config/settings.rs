use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultrError};

/// Hard floor for CLI passwords.  Settings may raise it, never lower it.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Project-level configuration, loaded from `.vaultr.toml`.
///
/// Every field has a sensible default so Vaultr works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file used when neither `--path` nor `VAULTR_PATH` is given.
    #[serde(default = "default_path")]
    pub default_path: String,

    /// Minimum password length enforced by the CLI (at least 8).
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Record operations in the audit database.
    #[serde(default = "default_audit_log")]
    pub audit_log: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_path() -> String {
    "vault.vaultr".to_string()
}

fn default_min_password_length() -> usize {
    MIN_PASSWORD_LEN
}

fn default_audit_log() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_path: default_path(),
            min_password_length: default_min_password_length(),
            audit_log: default_audit_log(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".vaultr.toml";

    /// Load settings from `<project_dir>/.vaultr.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultrError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.min_password_length < MIN_PASSWORD_LEN {
            return Err(VaultrError::ConfigError(format!(
                "min_password_length must be at least {MIN_PASSWORD_LEN} (got {})",
                self.min_password_length
            )));
        }
        if self.default_path.trim().is_empty() {
            return Err(VaultrError::ConfigError(
                "default_path cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the vault path: explicit value first, then the configured
    /// default relative to `project_dir`.
    pub fn vault_path(&self, project_dir: &Path, explicit: Option<&str>) -> PathBuf {
        match explicit {
            Some(p) => PathBuf::from(p),
            None => project_dir.join(&self.default_path),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
