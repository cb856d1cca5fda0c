//! `vaultr entry:set`: add or update one or more entries.

use crate::cli::output;
use crate::cli::{
    load_settings, log_audit, unlock_vault, validate_key, vault_password, vault_path, Cli,
};
use crate::config::Settings;
use crate::errors::{Result, VaultrError};
use crate::vault::Vault;

/// Execute the `entry:set` command.
pub fn execute(cli: &Cli, keys: &[String], values: &[String]) -> Result<()> {
    if keys.len() != values.len() {
        return Err(VaultrError::CommandFailed(
            "--key and --value must be used equal number of times".into(),
        ));
    }
    for key in keys {
        validate_key(key)?;
    }

    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    let password = vault_password(cli, &settings)?;
    let mut vault = unlock_vault(&path, &password)?;

    set_and_save(&mut vault, keys, values, &settings)?;

    output::success(&format!(
        "{} entr{} set in vault ({} total)",
        keys.len(),
        if keys.len() == 1 { "y" } else { "ies" },
        vault.entry_count()
    ));

    Ok(())
}

/// Seal every pair, write the vault, then record one audit row per key.
///
/// Nothing is logged unless the write succeeded.
fn set_and_save(
    vault: &mut Vault,
    keys: &[String],
    values: &[String],
    settings: &Settings,
) -> Result<()> {
    let mut changes = Vec::with_capacity(keys.len());
    for (key, value) in keys.iter().zip(values) {
        let detail = if vault.contains_key(key) { "updated" } else { "added" };
        vault.set_value(key, value)?;
        changes.push((key.as_str(), detail));
    }

    vault.write()?;

    for (key, detail) in changes {
        log_audit(settings, vault.path(), "entry:set", Some(key), Some(detail));
    }

    Ok(())
}
