//! `vaultr entry:remove`: delete one or more entries.

use crate::cli::output;
use crate::cli::{
    load_settings, log_audit, unlock_vault, validate_key, vault_password, vault_path, Cli,
};
use crate::errors::Result;

/// Execute the `entry:remove` command.
///
/// All keys must exist; nothing is written if any is missing.
pub fn execute(cli: &Cli, keys: &[String]) -> Result<()> {
    for key in keys {
        validate_key(key)?;
    }

    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    let password = vault_password(cli, &settings)?;
    let mut vault = unlock_vault(&path, &password)?;

    for key in keys {
        vault.remove_value(key)?;
    }

    vault.write()?;

    for key in keys {
        log_audit(&settings, &path, "entry:remove", Some(key), None);
    }

    output::success(&format!(
        "Removed {} entr{} ({} remaining)",
        keys.len(),
        if keys.len() == 1 { "y" } else { "ies" },
        vault.entry_count()
    ));

    Ok(())
}
