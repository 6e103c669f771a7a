use crate::app::input::{LineItemArg, RowRef};
use crate::app::pages::ExportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "hr-admin")]
#[command(about = "HR administration client for employee and contract records")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to hr-admin.toml")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "API base URL, overrides the config file")]
    pub api_base_url: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Employee records
    #[command(subcommand)]
    Users(UsersCommand),
    /// Employment contracts
    #[command(subcommand)]
    Contracts(ContractsCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum UsersCommand {
    /// List all users
    List {
        #[arg(long, default_value = "table", help = "table, csv or json")]
        format: ExportFormat,
    },
    /// Show one user with contracts
    Show { id: u64 },
    /// Create a user from a TOML file
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Edit a user (profile and contracts) from a TOML file
    Edit {
        id: u64,
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ContractsCommand {
    /// Contract summary for all users
    List,
    /// Contracts of one user
    Show { user_id: u64 },
    /// Edit the contracts of one user
    Edit(ContractEditArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ContractEditArgs {
    pub user_id: u64,

    #[arg(long, help = "TOML file whose [[kontraks]] replace the current contracts")]
    pub file: Option<PathBuf>,

    #[arg(long, value_name = "C", help = "Remove contract number C (from 1)")]
    pub remove_contract: Vec<usize>,

    #[arg(long, value_name = "C:NAMA:TIPE:NOMINAL")]
    pub add_pendapatan: Vec<LineItemArg>,

    #[arg(long, value_name = "C:R")]
    pub remove_pendapatan: Vec<RowRef>,

    #[arg(long, value_name = "C:NAMA:TIPE:NOMINAL")]
    pub add_potongan: Vec<LineItemArg>,

    #[arg(long, value_name = "C:R")]
    pub remove_potongan: Vec<RowRef>,

    #[arg(long, help = "Print the edited contracts without saving")]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contract_edit() {
        let cli = CliConfig::try_parse_from([
            "hr-admin",
            "--api-base-url",
            "http://localhost:8000",
            "contracts",
            "edit",
            "4",
            "--add-pendapatan",
            "1:1:1:5000000",
            "--remove-potongan",
            "1:2",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Command::Contracts(ContractsCommand::Edit(args)) => {
                assert_eq!(args.user_id, 4);
                assert_eq!(args.add_pendapatan[0].nominal, 5_000_000);
                assert_eq!(args.remove_potongan[0], RowRef { contract: 1, row: 2 });
                assert!(args.dry_run);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_users_list_format() {
        let cli =
            CliConfig::try_parse_from(["hr-admin", "users", "list", "--format", "csv"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Users(UsersCommand::List {
                format: ExportFormat::Csv
            })
        ));
    }
}
