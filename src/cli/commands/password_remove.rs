//! `vaultr password:remove`: unregister the password used to unlock.
//!
//! The password passed with `--password` both unlocks the vault and is
//! the one removed.  The last remaining password is never removed.

use crate::cli::output;
use crate::cli::{load_settings, log_audit, unlock_vault, vault_password, vault_path, Cli};
use crate::errors::Result;

/// Execute the `password:remove` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    let password = vault_password(cli, &settings)?;
    let mut vault = unlock_vault(&path, &password)?;

    vault.remove_password(&password)?;
    vault.write()?;

    let detail = format!("{} passwords", vault.password_count());
    log_audit(&settings, &path, "password:remove", None, Some(&detail));

    output::success(&format!(
        "Password removed from vault ({} remaining)",
        vault.password_count()
    ));

    Ok(())
}
