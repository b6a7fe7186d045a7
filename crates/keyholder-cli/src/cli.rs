use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use keyholder_core::VERSION;

use crate::constants::env;

/// Keyholder - passphrase-sealed secret storage
#[derive(Parser)]
#[command(name = "keyholder")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the database file
    #[arg(short, long, global = true, env = env::DATABASE)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the config file and create the database
    Init(InitArgs),

    /// Seal and store a new secret
    Add(AddArgs),

    /// List stored labels
    List(ListArgs),

    /// Rename a key or re-seal its secret
    Update(UpdateArgs),

    /// Delete a key
    Delete(DeleteArgs),

    /// Decrypt and print a secret
    Decrypt(DecryptArgs),

    /// Manage the admin account
    Admin(AdminArgs),

    /// Check database integrity
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Unique label for the secret
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Secret value (overrides stdin/prompt)
    #[arg(long)]
    pub secret: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive label filter
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Show newest keys first
    #[arg(long)]
    pub newest_first: bool,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `update` command
#[derive(Args)]
pub struct UpdateArgs {
    /// Label of the key to update
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// New label
    #[arg(long, value_name = "NEW")]
    pub rename: Option<String>,

    /// New secret value; prompts for a passphrase to re-seal it
    #[arg(long)]
    pub secret: Option<String>,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Label of the key to delete
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `decrypt` command
#[derive(Args)]
pub struct DecryptArgs {
    /// Label of the key to decrypt
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `admin` command group
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminSubcommand,
}

#[derive(Subcommand)]
pub enum AdminSubcommand {
    /// Create the admin account (no-op if it exists)
    Init,

    /// Delete the admin account
    Delete,

    /// Check a password against the admin account
    Verify,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_database_flag_reads_env_var() {
        let cmd = Cli::command();
        let arg = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "database")
            .expect("database arg should exist");
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new(env::DATABASE)));
    }

    #[test]
    fn test_update_flags_parse() {
        let cli = Cli::try_parse_from([
            "keyholder", "update", "api", "--rename", "api-v2", "--secret", "s3",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Update(args)) => {
                assert_eq!(args.label, "api");
                assert_eq!(args.rename.as_deref(), Some("api-v2"));
                assert_eq!(args.secret.as_deref(), Some("s3"));
            }
            _ => panic!("expected update"),
        }
    }
}
