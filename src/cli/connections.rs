//! `connections` command handlers.

use crate::cli::ConnectionsAddArgs;
use crate::config::get_connection_config_from_args;
use crate::error::Result;
use crate::store::ConnectionStore;
use std::io::Write;

/// Assemble and persist the connection described by `connections add`.
pub fn run_connections_add(store: &ConnectionStore, args: &ConnectionsAddArgs) -> Result<()> {
    let conn = get_connection_config_from_args(args);
    store.store(&args.connection_name, &conn)?;
    Ok(())
}

/// Write one `Connection Name: <name>` line per stored connection.
pub fn list_connections<W: Write>(store: &ConnectionStore, out: &mut W) -> Result<()> {
    for name in store.list()? {
        writeln!(out, "Connection Name: {name}")?;
    }
    Ok(())
}
