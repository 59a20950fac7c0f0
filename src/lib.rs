//! **Command-line front-end for cross-source data validation.**
//!
//! `data-validation` parses the tool's fixed command grammar, validates the
//! scalar values users pass on the command line, assembles the typed
//! configuration objects the validation engine consumes, and keeps a small
//! on-disk store of named connections.
//!
//! ## Core Concepts & Modules
//!
//! - **[`cli`]**: The [`Cli`] grammar (`run`, `connections add|list`,
//!   `find-tables`) and one handler per command.
//! - **[`validators`]**: Pure scalar validators: difference thresholds,
//!   strict JSON flag decoding and `key=value` label strings.
//! - **[`config`]**: [`ConnectionConfig`], [`RunConfig`] and
//!   [`FindTablesConfig`], plus the assembly functions that build them from
//!   parsed arguments.
//! - **[`store`]**: [`ConnectionStore`], a directory of JSON connection
//!   records keyed by name.
//! - **[`matching`]**: Candidate table pairing used by `find-tables`.
//!
//! ## Getting Started
//!
//! ```no_run
//! use data_validation::cli::{list_connections, parse_args};
//! use data_validation::store::ConnectionStore;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cli = parse_args(["data-validation", "connections", "list"])?;
//!     assert_eq!(cli.command_name(), "connections");
//!     assert_eq!(cli.subcommand_name(), Some("list"));
//!
//!     let store = ConnectionStore::new("/tmp/data-validation");
//!     list_connections(&store, &mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Validating Scalars
//!
//! ```
//! use data_validation::validators::{get_labels, threshold_float};
//!
//! assert_eq!(threshold_float("50").unwrap(), 50.0);
//! assert!(threshold_float("-4").is_err());
//!
//! let labels = get_labels("team=data,run=").unwrap();
//! assert_eq!(labels[1].as_pair(), ("run", ""));
//! ```

#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod store;
pub mod validators;

// Re-export main types for convenience
pub use cli::{parse_args, Cli, Commands};
pub use config::{
    ConfigError, ConnectionConfig, FindTablesConfig, RunConfig, TableRef, Validatable,
    ValidationType,
};
pub use error::{DataValidationError, ErrorContext, Result};
pub use matching::{match_tables, TableCatalog};
pub use store::{ConnectionLookup, ConnectionStore};
pub use validators::{get_json_arg, get_labels, threshold_float, Label};
