//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manage accounts in the configured database backend.
#[derive(Parser, Debug)]
#[command(name = "db-client", version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file. `DB_*` environment variables override it.
    #[arg(short, long, env = "DB_CLIENT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List every stored account
    List,
    /// Create or overwrite an account
    Add {
        /// Account id
        acct_id: i64,
        /// Account password
        password: String,
    },
    /// Delete an account (missing ids are not an error)
    Remove {
        /// Account id
        acct_id: i64,
    },
    /// Print the stored flow record
    Flow,
    /// Print the backends compiled into this build
    Backends,
}

/// A command that runs against a connected backend.
#[derive(Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Add { acct_id: i64, password: String },
    Remove { acct_id: i64 },
    Flow,
}

impl Command {
    /// The backend operation this command runs, or `None` when it needs no connection.
    pub fn into_operation(self) -> Option<Operation> {
        match self {
            Self::List => Some(Operation::List),
            Self::Add { acct_id, password } => Some(Operation::Add { acct_id, password }),
            Self::Remove { acct_id } => Some(Operation::Remove { acct_id }),
            Self::Flow => Some(Operation::Flow),
            Self::Backends => None,
        }
    }
}
