//! One module per subcommand.

pub mod audit_cmd;
pub mod completions;
pub mod create;
pub mod entry_get;
pub mod entry_list;
pub mod entry_remove;
pub mod entry_set;
pub mod password_add;
pub mod password_remove;
