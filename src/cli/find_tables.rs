//! `find-tables` command handler.

use crate::config::FindTablesConfig;
use crate::error::Result;
use std::io::Write;

/// Write the assembled find-tables request to `out` as pretty JSON.
///
/// Table listings come from connectors, which consume this request and
/// answer through [`crate::matching::find_tables`].
pub fn run_find_tables<W: Write>(config: &FindTablesConfig, out: &mut W) -> Result<()> {
    tracing::debug!(
        "find-tables over {} allowed schema(s), cutoff {}",
        config.allowed_schemas.len(),
        config.score_cutoff
    );
    serde_json::to_writer_pretty(&mut *out, config)?;
    writeln!(out)?;
    Ok(())
}
