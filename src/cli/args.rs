//! Command-line grammar.
//!
//! [`Cli`] is the parsed-arguments record: one field per recognized flag,
//! built once per invocation and read-only afterwards. Scalar flags
//! (`--threshold`) are validated while parsing; JSON-shaped flags are kept as
//! raw strings and decoded during config assembly.

use crate::config::{ConnectionConfig, ValidationType, DEFAULT_SCORE_CUTOFF};
use crate::error::{DataValidationError, Result, StoreErrorKind};
use crate::store::dirs::{self, CONFIG_HOME_ENV};
use crate::store::{ConnectionLookup, ConnectionStore};
use crate::validators::threshold_float;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "data-validation")]
#[command(version, about = "Validate data across sources and targets", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Storage or I/O failure
    2  Usage or validation error

EXAMPLES:
    # Store a BigQuery connection
    data-validation connections add --connection-name bq BigQuery --project-id my-project

    # Column validation between two stored connections
    data-validation run --type Column --source-conn bq --target-conn bq \\
        --tables-list '[{\"schema_name\":\"ds\",\"table_name\":\"t\"}]'")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding stored connections
    #[arg(long, global = true, env = CONFIG_HOME_ENV, value_name = "DIR")]
    pub config_home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a validation between a source and a target
    Run(RunArgs),

    /// Manage stored connections
    Connections {
        #[command(subcommand)]
        connect_cmd: ConnectionsCommand,
    },

    /// Find candidate table pairs across two connections
    FindTables(FindTablesArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the `run` subcommand
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Type of validation to run
    #[arg(short = 't', long = "type", value_enum, ignore_case = true)]
    pub validation_type: ValidationType,

    /// Source connection: a JSON object or the name of a stored connection
    #[arg(long)]
    pub source_conn: String,

    /// Target connection: a JSON object or the name of a stored connection
    #[arg(long)]
    pub target_conn: String,

    /// JSON list of {"schema_name", "table_name"} objects
    #[arg(long)]
    pub tables_list: String,

    /// JSON list of columns to sum
    #[arg(long)]
    pub sum: Option<String>,

    /// JSON list of columns to count
    #[arg(long)]
    pub count: Option<String>,

    /// Save the validation as YAML to this path instead of running it
    #[arg(long, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Comma-separated key=value labels attached to the run
    #[arg(long)]
    pub labels: Option<String>,

    /// Allowed difference between source and target values
    #[arg(long, default_value = "0", value_parser = threshold_float, allow_negative_numbers = true)]
    pub threshold: f64,

    /// Enable beta features
    #[arg(long)]
    pub beta: bool,
}

/// Sub-subcommands for the `connections` command
#[derive(Subcommand, Debug, Clone)]
pub enum ConnectionsCommand {
    /// Store a connection, replacing any existing one with the same name
    Add(ConnectionsAddArgs),
    /// List stored connections
    List,
}

/// Arguments for `connections add`
#[derive(Args, Debug, Clone)]
pub struct ConnectionsAddArgs {
    /// Name to store the connection under
    #[arg(short = 'c', long)]
    pub connection_name: String,

    #[command(subcommand)]
    pub connection: ConnectionTypeArgs,
}

/// Connector type and its type-specific settings
#[derive(Subcommand, Debug, Clone)]
pub enum ConnectionTypeArgs {
    /// Google BigQuery
    #[command(name = "BigQuery")]
    BigQuery {
        /// GCP project holding the datasets
        #[arg(long)]
        project_id: String,

        /// Service account key file (application default credentials if omitted)
        #[arg(long)]
        google_service_account_key_path: Option<PathBuf>,
    },

    /// Teradata
    #[command(name = "Teradata")]
    Teradata {
        #[arg(long)]
        host: String,
        #[arg(long, default_value = "1025")]
        port: u16,
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        password: String,
    },

    /// MySQL
    #[command(name = "MySQL")]
    MySql {
        #[arg(long)]
        host: String,
        #[arg(long, default_value = "3306")]
        port: u16,
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        database: Option<String>,
    },

    /// PostgreSQL
    #[command(name = "Postgres")]
    Postgres {
        #[arg(long)]
        host: String,
        #[arg(long, default_value = "5432")]
        port: u16,
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        database: String,
    },

    /// Snowflake
    #[command(name = "Snowflake")]
    Snowflake {
        #[arg(long)]
        user: String,
        #[arg(long)]
        password: String,
        /// Account identifier, e.g. `xy12345.us-east-1`
        #[arg(long)]
        account: String,
        /// Database, optionally with schema as `DATABASE/SCHEMA`
        #[arg(long)]
        database: String,
    },

    /// Local or object-store file treated as a single table
    #[command(name = "FileSystem")]
    FileSystem {
        #[arg(long)]
        table_name: String,
        #[arg(long)]
        file_path: String,
        /// File format (csv, json, parquet)
        #[arg(long)]
        file_type: String,
    },
}

impl ConnectionTypeArgs {
    /// The connector name as typed on the command line and stored as `source_type`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::BigQuery { .. } => "BigQuery",
            Self::Teradata { .. } => "Teradata",
            Self::MySql { .. } => "MySQL",
            Self::Postgres { .. } => "Postgres",
            Self::Snowflake { .. } => "Snowflake",
            Self::FileSystem { .. } => "FileSystem",
        }
    }
}

/// Arguments for the `find-tables` subcommand
#[derive(Args, Debug, Clone)]
pub struct FindTablesArgs {
    /// Source connection: a JSON object or the name of a stored connection
    #[arg(long)]
    pub source_conn: String,

    /// Target connection: a JSON object or the name of a stored connection
    #[arg(long)]
    pub target_conn: String,

    /// JSON list of schema names to restrict the search to
    #[arg(long)]
    pub allowed_schemas: Option<String>,

    /// Minimum name similarity (0.0-1.0) for a table pair to be reported
    #[arg(long, default_value_t = DEFAULT_SCORE_CUTOFF)]
    pub score_cutoff: f64,
}

/// Parse a full argument vector (program name first).
pub fn parse_args<I, T>(args: I) -> std::result::Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

impl Cli {
    /// Name of the selected top-level command.
    #[must_use]
    pub fn command_name(&self) -> &'static str {
        match self.command {
            Commands::Run(_) => "run",
            Commands::Connections { .. } => "connections",
            Commands::FindTables(_) => "find-tables",
            Commands::Completions { .. } => "completions",
        }
    }

    /// Name of the selected subcommand, for commands that have one.
    #[must_use]
    pub fn subcommand_name(&self) -> Option<&'static str> {
        match self.command {
            Commands::Connections {
                connect_cmd: ConnectionsCommand::Add(_),
            } => Some("add"),
            Commands::Connections {
                connect_cmd: ConnectionsCommand::List,
            } => Some("list"),
            _ => None,
        }
    }

    /// Open the connection store selected by `--config-home`, or the
    /// platform default.
    pub fn connection_store(&self) -> Result<ConnectionStore> {
        let home = match &self.config_home {
            Some(path) => path.clone(),
            None => dirs::config_home().ok_or_else(|| {
                DataValidationError::store("resolving config home", StoreErrorKind::NoConfigDir)
            })?,
        };
        Ok(ConnectionStore::new(home))
    }
}

/// Stored connections are looked up through the store selected on the
/// command line, which is only located when a name needs resolving.
impl ConnectionLookup for Cli {
    fn lookup(&self, name: &str) -> Result<ConnectionConfig> {
        self.connection_store()?.load(name)
    }
}
