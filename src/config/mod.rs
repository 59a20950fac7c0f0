//! Configuration module for data-validation.
//!
//! This module turns parsed command-line arguments into the typed objects the
//! rest of the system consumes:
//! - [`ConnectionConfig`]: a named connection's flat key/value settings
//! - [`RunConfig`]: everything the validation engine needs for one `run`
//! - [`FindTablesConfig`]: inputs for table discovery across two connections
//!
//! # Quick Start
//!
//! ```rust
//! use data_validation::cli::{parse_args, Commands, ConnectionsCommand};
//! use data_validation::config::get_connection_config_from_args;
//!
//! let cli = parse_args([
//!     "data-validation", "connections", "add",
//!     "--connection-name", "test", "BigQuery", "--project-id", "example-project",
//! ])
//! .unwrap();
//!
//! if let Commands::Connections { connect_cmd: ConnectionsCommand::Add(args) } = &cli.command {
//!     let conn = get_connection_config_from_args(args);
//!     assert_eq!(conn["project_id"], "example-project");
//! }
//! ```

mod assembly;
pub mod file;
mod types;
mod validation;

pub use assembly::{
    build_find_tables_config, build_run_config, get_connection_config_from_args,
    resolve_connection,
};
pub use types::{
    Aggregate, AggregateKind, ConnectionConfig, FindTablesConfig, RunConfig, TableRef,
    ValidationType, DEFAULT_SCORE_CUTOFF, SOURCE_TYPE_KEY,
};
pub use validation::{ConfigError, Validatable};

pub use file::{render_config_file, write_config_file};
