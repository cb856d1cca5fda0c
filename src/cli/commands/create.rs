//! `vaultr create`: create a new vault protected by one password.

use std::fs;

use crate::cli::output;
use crate::cli::{load_settings, log_audit, new_password, vault_path, Cli};
use crate::errors::{Result, VaultrError};
use crate::vault::Vault;

/// Execute the `create` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    // 1. Never overwrite an existing vault.
    if path.exists() {
        return Err(VaultrError::VaultAlreadyExists(path));
    }

    // 2. Create the parent directory if it doesn't exist.
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    // 3. Pick the first password (from --password or a confirmed prompt).
    let password = new_password("--password", cli.password.as_deref(), &settings)?;

    // 4. Fresh DEK, wrap it once, persist.
    let mut vault = Vault::new(&path);
    vault.initialize()?;
    vault.add_password(&password)?;
    vault.write()?;

    log_audit(&settings, &path, "create", None, Some("vault created"));

    output::success(&format!("Vault initialized at {}", path.display()));
    output::tip("Run `vaultr entry:set --key <KEY> --value <VALUE>` to add an entry.");

    Ok(())
}
