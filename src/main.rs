use clap::Parser;
use vaultr::cli::{commands, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Create => commands::create::execute(&cli),
        Commands::PasswordAdd { ref new_password } => {
            commands::password_add::execute(&cli, new_password.as_deref())
        }
        Commands::PasswordRemove => commands::password_remove::execute(&cli),
        Commands::EntryList => commands::entry_list::execute(&cli),
        Commands::EntrySet {
            ref keys,
            ref values,
        } => commands::entry_set::execute(&cli, keys, values),
        Commands::EntryGet { ref key } => commands::entry_get::execute(&cli, key),
        Commands::EntryRemove { ref keys } => commands::entry_remove::execute(&cli, keys),
        Commands::Audit { last } => commands::audit_cmd::execute(&cli, last),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        vaultr::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
