//! `vaultr audit`: display the audit log kept next to the vault.
//!
//! Usage:
//!   vaultr audit               # show last 50 entries
//!   vaultr audit --last 20     # show last 20

use crate::cli::Cli;
use crate::errors::Result;

#[cfg(feature = "audit-log")]
use crate::audit::{audit_dir, AuditEntry, AuditLog};
#[cfg(feature = "audit-log")]
use crate::cli::{load_settings, output, vault_path};
#[cfg(feature = "audit-log")]
use crate::errors::VaultrError;

/// Execute the `audit` command.
#[cfg(feature = "audit-log")]
pub fn execute(cli: &Cli, last: usize) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    let audit = AuditLog::open(&audit_dir(&path))
        .ok_or_else(|| VaultrError::AuditError("failed to open audit database".into()))?;

    let entries = audit.query(last)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);

    Ok(())
}

#[cfg(not(feature = "audit-log"))]
pub fn execute(_cli: &Cli, _last: usize) -> Result<()> {
    Err(crate::errors::VaultrError::AuditError(
        "this build was compiled without the `audit-log` feature".into(),
    ))
}

/// Print audit entries in a formatted table.
#[cfg(feature = "audit-log")]
pub fn print_audit_table(entries: &[AuditEntry]) {
    use comfy_table::{ContentArrangement, Table};
    use console::style;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Vault", "Key", "Details"]);

    for entry in entries {
        let time = entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        let key = entry.key_name.as_deref().unwrap_or("-");
        let details = entry.details.as_deref().unwrap_or("-");

        table.add_row(vec![
            time,
            colorize_operation(&entry.operation),
            entry.vault.clone(),
            key.to_string(),
            details.to_string(),
        ]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

/// Colorize operation names for display.
#[cfg(feature = "audit-log")]
fn colorize_operation(op: &str) -> String {
    use console::style;

    match op {
        "create" => style(op).green().to_string(),
        "entry:set" => style(op).blue().to_string(),
        "entry:remove" => style(op).red().to_string(),
        "password:add" | "password:remove" => style(op).yellow().to_string(),
        _ => op.to_string(),
    }
}
