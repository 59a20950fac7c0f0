//! Config assembly: parsed arguments to typed configuration objects.
//!
//! JSON flags are decoded here, labels are parsed here, and connection
//! arguments that name a stored connection are resolved against the store.
//! Nothing is persisted; storing a connection is the caller's explicit step.

use super::types::{ConnectionConfig, FindTablesConfig, RunConfig, TableRef};
use super::validation::{ConfigError, Validatable};
use crate::cli::{ConnectionTypeArgs, ConnectionsAddArgs, FindTablesArgs, RunArgs};
use crate::error::{DataValidationError, ErrorContext, Result};
use crate::store::{ConnectionLookup, JSON_LEADERS};
use crate::validators::{decode_json_arg, get_labels};
use serde::de::DeserializeOwned;

/// Build the connection record for `connections add`.
///
/// `source_type` comes from the connector subcommand; every other field is
/// copied verbatim from its flag. Unset optional flags are omitted.
#[must_use]
pub fn get_connection_config_from_args(args: &ConnectionsAddArgs) -> ConnectionConfig {
    let conn = ConnectionConfig::new(args.connection.type_name());

    match &args.connection {
        ConnectionTypeArgs::BigQuery {
            project_id,
            google_service_account_key_path,
        } => conn.with("project_id", project_id.as_str()).with_opt(
            "google_service_account_key_path",
            google_service_account_key_path
                .as_ref()
                .map(|p| p.display().to_string()),
        ),
        ConnectionTypeArgs::Teradata {
            host,
            port,
            user_name,
            password,
        } => conn
            .with("host", host.as_str())
            .with("port", *port)
            .with("user_name", user_name.as_str())
            .with("password", password.as_str()),
        ConnectionTypeArgs::MySql {
            host,
            port,
            user_name,
            password,
            database,
        } => conn
            .with("host", host.as_str())
            .with("port", *port)
            .with("user_name", user_name.as_str())
            .with("password", password.as_str())
            .with_opt("database", database.clone()),
        ConnectionTypeArgs::Postgres {
            host,
            port,
            user_name,
            password,
            database,
        } => conn
            .with("host", host.as_str())
            .with("port", *port)
            .with("user_name", user_name.as_str())
            .with("password", password.as_str())
            .with("database", database.as_str()),
        ConnectionTypeArgs::Snowflake {
            user,
            password,
            account,
            database,
        } => conn
            .with("user", user.as_str())
            .with("password", password.as_str())
            .with("account", account.as_str())
            .with("database", database.as_str()),
        ConnectionTypeArgs::FileSystem {
            table_name,
            file_path,
            file_type,
        } => conn
            .with("table_name", table_name.as_str())
            .with("file_path", file_path.as_str())
            .with("file_type", file_type.as_str()),
    }
}

/// Resolve a `--source-conn`/`--target-conn` value.
///
/// Values that look like JSON (`{`, `[` or `"` first) are decoded as a
/// connection object; anything else is the name of a stored connection.
/// `store` is consulted only in the second case.
pub fn resolve_connection<L: ConnectionLookup + ?Sized>(
    raw: &str,
    store: &L,
) -> Result<ConnectionConfig> {
    if raw.trim_start().starts_with(JSON_LEADERS) {
        decode_flag(raw, "a JSON connection object")
    } else {
        store
            .lookup(raw.trim())
            .context("resolving stored connection")
    }
}

/// Assemble the configuration for `run`.
pub fn build_run_config<L: ConnectionLookup + ?Sized>(
    args: &RunArgs,
    verbose: bool,
    store: &L,
) -> Result<RunConfig> {
    let source_conn = resolve_connection(&args.source_conn, store).context("--source-conn")?;
    let target_conn = resolve_connection(&args.target_conn, store).context("--target-conn")?;
    let tables: Vec<TableRef> = decode_flag(&args.tables_list, "a JSON list of tables")
        .context("--tables-list")?;
    let sum_columns = decode_optional_list(args.sum.as_deref()).context("--sum")?;
    let count_columns = decode_optional_list(args.count.as_deref()).context("--count")?;
    let labels = match args.labels.as_deref() {
        Some(raw) => get_labels(raw)?,
        None => Vec::new(),
    };

    let config = RunConfig {
        validation_type: args.validation_type,
        source_conn,
        target_conn,
        tables,
        sum_columns,
        count_columns,
        labels,
        threshold: args.threshold,
        verbose,
        beta: args.beta,
    };
    ensure_valid(&config)?;

    tracing::debug!(
        "assembled {:?} validation over {} table(s)",
        config.validation_type,
        config.tables.len()
    );
    Ok(config)
}

/// Assemble the configuration for `find-tables`.
pub fn build_find_tables_config<L: ConnectionLookup + ?Sized>(
    args: &FindTablesArgs,
    store: &L,
) -> Result<FindTablesConfig> {
    let config = FindTablesConfig {
        source_conn: resolve_connection(&args.source_conn, store).context("--source-conn")?,
        target_conn: resolve_connection(&args.target_conn, store).context("--target-conn")?,
        allowed_schemas: decode_optional_list(args.allowed_schemas.as_deref())
            .context("--allowed-schemas")?,
        score_cutoff: args.score_cutoff,
    };
    ensure_valid(&config)?;
    Ok(config)
}

fn decode_flag<T: DeserializeOwned>(raw: &str, expected: &str) -> Result<T> {
    decode_json_arg(raw).map_err(|e| DataValidationError::argument(format!("expected {expected}"), e))
}

fn decode_optional_list(raw: Option<&str>) -> Result<Vec<String>> {
    raw.map_or_else(|| Ok(Vec::new()), |r| decode_flag(r, "a JSON list of strings"))
}

fn ensure_valid(config: &impl Validatable) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let joined = errors
        .iter()
        .map(ConfigError::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(DataValidationError::config(joined))
}
