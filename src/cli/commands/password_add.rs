//! `vaultr password:add`: register another password for the vault.

use crate::cli::output;
use crate::cli::{
    load_settings, log_audit, new_password, unlock_vault, vault_password, vault_path, Cli,
};
use crate::errors::Result;

/// Execute the `password:add` command.
pub fn execute(cli: &Cli, provided: Option<&str>) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    // Validate the new password before paying for the unlock.
    let new = match provided {
        Some(_) => Some(new_password("--new-password", provided, &settings)?),
        None => None,
    };

    let password = vault_password(cli, &settings)?;
    let mut vault = unlock_vault(&path, &password)?;

    let new = match new {
        Some(pw) => pw,
        None => {
            output::info("Choose the password to add.");
            new_password("--new-password", None, &settings)?
        }
    };

    vault.add_password(&new)?;
    vault.write()?;

    let detail = format!("{} passwords", vault.password_count());
    log_audit(&settings, &path, "password:add", None, Some(&detail));

    output::success(&format!(
        "Password added to vault ({} total)",
        vault.password_count()
    ));

    Ok(())
}
