//! CLI grammar and command handlers.
//!
//! [`args`] declares the grammar; the handlers here implement each command
//! against an explicit [`ConnectionStore`](crate::store::ConnectionStore) and
//! output writer so they can be driven from tests.

pub mod args;
mod connections;
mod find_tables;
mod run;

pub use args::{
    parse_args, Cli, Commands, ConnectionTypeArgs, ConnectionsAddArgs, ConnectionsCommand,
    FindTablesArgs, RunArgs,
};
pub use connections::{list_connections, run_connections_add};
pub use find_tables::run_find_tables;
pub use run::run_validation;
