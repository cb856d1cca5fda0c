//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultrError};
use crate::vault::Vault;

/// Environment variable read when `--password` is absent.
const PASSWORD_ENV: &str = "VAULTR_PASSWORD";

/// Vaultr CLI: password-protected local secret store.
#[derive(Parser)]
#[command(
    name = "vaultr",
    about = "Password-protected local secret store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the vault file (default: from .vaultr.toml, else vault.vaultr)
    #[arg(long, env = "VAULTR_PATH", global = true)]
    pub path: Option<String>,

    /// Vault password (prompted when omitted)
    #[arg(long, env = "VAULTR_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new empty vault file
    Create,

    /// Add a new vault password
    #[command(name = "password:add")]
    PasswordAdd {
        /// Password to add to the vault (prompted when omitted)
        #[arg(long)]
        new_password: Option<String>,
    },

    /// Remove a vault password (the one given with --password)
    #[command(name = "password:remove")]
    PasswordRemove,

    /// List stored vault entries in dotenv format
    #[command(name = "entry:list")]
    EntryList,

    /// Add or update vault entries
    #[command(name = "entry:set")]
    EntrySet {
        /// Entry key (repeatable, paired with --value by position)
        #[arg(long = "key", required = true)]
        keys: Vec<String>,
        /// Entry value (repeatable)
        #[arg(long = "value", required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Print the value of a vault entry
    #[command(name = "entry:get")]
    EntryGet {
        /// Entry key
        #[arg(long)]
        key: String,
    },

    /// Remove vault entries
    #[command(name = "entry:remove")]
    EntryRemove {
        /// Entry key (repeatable)
        #[arg(long = "key", required = true)]
        keys: Vec<String>,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.vaultr.toml` from the working directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the vault file path from `--path` / `VAULTR_PATH` / settings.
pub fn vault_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    if let Some(p) = cli.path.as_deref() {
        if p.is_empty() {
            return Err(VaultrError::CommandFailed("--path is required".into()));
        }
    }
    let cwd = std::env::current_dir()?;
    Ok(settings.vault_path(&cwd, cli.path.as_deref()))
}

/// Get the vault password, trying in order:
/// 1. `--password` / `VAULTR_PASSWORD` (an empty value still counts)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn vault_password(cli: &Cli, settings: &Settings) -> Result<Zeroizing<String>> {
    let from_env = std::env::var(PASSWORD_ENV).ok().map(Zeroizing::new);
    let given = cli.password.as_deref().or(from_env.as_deref().map(String::as_str));

    if let Some(password) = given_password(given, settings)? {
        return Ok(password);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| VaultrError::CommandFailed(format!("password prompt: {e}")))?;
    let password = Zeroizing::new(pw);

    check_password_length("--password", &password, settings)?;
    Ok(password)
}

/// Length-check a non-interactively supplied password.  `None` means
/// nothing was supplied and the caller should prompt.
fn given_password(given: Option<&str>, settings: &Settings) -> Result<Option<Zeroizing<String>>> {
    match given {
        Some(pw) => {
            check_password_length("--password", pw, settings)?;
            Ok(Some(Zeroizing::new(pw.to_string())))
        }
        None => Ok(None),
    }
}

/// Get a password that is about to be registered.
///
/// Uses `provided` when given, otherwise prompts with confirmation.
pub fn new_password(
    flag: &str,
    provided: Option<&str>,
    settings: &Settings,
) -> Result<Zeroizing<String>> {
    if let Some(pw) = provided {
        let pw = Zeroizing::new(pw.to_string());
        check_password_length(flag, &pw, settings)?;
        return Ok(pw);
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose vault password")
            .with_confirmation(
                "Confirm vault password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| VaultrError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < settings.min_password_length {
            output::warning(&format!(
                "Password must be at least {} characters. Try again.",
                settings.min_password_length
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Enforce the configured minimum password length.
pub fn check_password_length(flag: &str, password: &str, settings: &Settings) -> Result<()> {
    if password.len() < settings.min_password_length {
        return Err(VaultrError::CommandFailed(format!(
            "{flag} must be at least {} characters",
            settings.min_password_length
        )));
    }
    Ok(())
}

/// Entry keys must be non-empty.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(VaultrError::CommandFailed("--key cannot be empty".into()));
    }
    Ok(())
}

/// Read the vault at `path` and authenticate with `password`.
pub fn unlock_vault(path: &Path, password: &str) -> Result<Vault> {
    let mut vault = Vault::new(path);
    vault.read()?;
    vault.authenticate(password)?;
    Ok(vault)
}

/// Record an audit event when enabled.  Never fails the command.
pub fn log_audit(
    settings: &Settings,
    vault_path: &Path,
    op: &str,
    key: Option<&str>,
    details: Option<&str>,
) {
    if !settings.audit_log {
        return;
    }

    #[cfg(feature = "audit-log")]
    crate::audit::log_event(vault_path, op, key, details);

    #[cfg(not(feature = "audit-log"))]
    let _ = (vault_path, op, key, details);
}
