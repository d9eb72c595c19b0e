//! CLI argument definitions using clap derive

use crate::paging::{ConnectionArgs, Cursor};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// lbr - LabBook resolver toolkit
///
/// Lists local and remote LabBooks with cursor pagination, creates
/// LabBooks and reports the status of their environments.
#[derive(Parser, Debug)]
#[command(name = "lbr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LBR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Acting user (defaults to general.username)
    #[arg(short, long, global = true, env = "LBR_USER")]
    pub user: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with local LabBooks
    #[command(name = "labbook")]
    LabBook(LabBookArgs),

    /// Show the image and container status of a LabBook
    Environment(EnvironmentArgs),

    /// Work with LabBooks on the default remote
    Remote(RemoteArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
    /// Plain text (one name per line)
    Plain,
}

/// Ordering and cursor options shared by listing commands
#[derive(Parser, Debug, Clone)]
pub struct PageOptions {
    /// Field to order by: name, created_on, modified_on
    #[arg(long, default_value = "name")]
    pub order_by: String,

    /// Sort direction: asc, desc
    #[arg(long, default_value = "asc")]
    pub sort: String,

    /// Return the first N items of the window
    #[arg(long)]
    pub first: Option<usize>,

    /// Return the last N items of the window
    #[arg(long)]
    pub last: Option<usize>,

    /// Only items after this cursor
    #[arg(long)]
    pub after: Option<String>,

    /// Only items before this cursor
    #[arg(long)]
    pub before: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl PageOptions {
    /// Connection arguments as given on the command line
    pub fn connection_args(&self) -> ConnectionArgs {
        ConnectionArgs {
            after: self.after.as_deref().map(Cursor::from),
            before: self.before.as_deref().map(Cursor::from),
            first: self.first,
            last: self.last,
        }
    }
}

/// Arguments for the labbook command
#[derive(Parser, Debug)]
pub struct LabBookArgs {
    #[command(subcommand)]
    pub action: LabBookAction,
}

/// LabBook actions
#[derive(Subcommand, Debug)]
pub enum LabBookAction {
    /// List local LabBooks
    List(PageOptions),

    /// Create a new LabBook owned by the acting user
    Create {
        /// LabBook name
        name: String,

        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Owner namespace (defaults to the acting user)
        #[arg(long)]
        owner: Option<String>,
    },
}

/// Arguments for the environment command
#[derive(Parser, Debug)]
pub struct EnvironmentArgs {
    /// LabBook owner
    pub owner: String,

    /// LabBook name
    pub name: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the remote command
#[derive(Parser, Debug)]
pub struct RemoteArgs {
    /// Bearer token for the remote API
    #[arg(long, global = true, env = "LBR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub action: RemoteAction,
}

/// Remote actions
#[derive(Subcommand, Debug)]
pub enum RemoteAction {
    /// List LabBooks on the remote
    List(PageOptions),

    /// Delete a LabBook from the remote
    Delete {
        /// LabBook owner
        owner: String,

        /// LabBook name
        name: String,

        /// Actually delete (otherwise a dry run)
        #[arg(long)]
        confirm: bool,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
