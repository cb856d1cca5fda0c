//! `vaultr entry:list`: print every entry as a dotenv line.
//!
//! Output looks like:
//!   API_KEY="secret123"
//!   MOTD="line one\nline two"

use std::io::{self, Write};

use crate::cli::{load_settings, unlock_vault, vault_password, vault_path, Cli};
use crate::errors::Result;

/// Execute the `entry:list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    let password = vault_password(cli, &settings)?;
    let vault = unlock_vault(&path, &password)?;

    let values = vault.get_values()?;

    let mut keys: Vec<&String> = values.keys().collect();
    keys.sort();

    let mut stdout = io::stdout().lock();
    for key in keys {
        writeln!(stdout, "{}", dotenv_line(key, &values[key]))?;
    }

    Ok(())
}

/// Render `KEY="value"` with the value escaped for double quotes.
pub fn dotenv_line(key: &str, value: &str) -> String {
    format!("{key}=\"{}\"", escape_value(value))
}

fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}
