//! `vaultr entry:get`: print a single entry's value.

use std::io::{self, Write};

use zeroize::Zeroizing;

use crate::cli::{load_settings, unlock_vault, validate_key, vault_password, vault_path, Cli};
use crate::errors::Result;

/// Execute the `entry:get` command.
///
/// The value is written verbatim, with no trailing newline, so it can be
/// captured by `$(vaultr entry:get ...)` unchanged.
pub fn execute(cli: &Cli, key: &str) -> Result<()> {
    validate_key(key)?;

    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    let password = vault_password(cli, &settings)?;
    let vault = unlock_vault(&path, &password)?;

    let value = Zeroizing::new(vault.get_value(key)?);

    let mut stdout = io::stdout().lock();
    stdout.write_all(value.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
