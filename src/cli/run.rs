//! `run` command handler.

use crate::config::{write_config_file, RunConfig};
use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Hand an assembled run to its destination.
///
/// With `config_file`, the run is saved as YAML for later replay. Otherwise
/// the config is written to `out` as pretty JSON, the validation engine's
/// input format.
pub fn run_validation<W: Write>(
    config: &RunConfig,
    config_file: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    if let Some(path) = config_file {
        write_config_file(path, config)?;
        tracing::info!("Saved validation config to {}", path.display());
        return Ok(());
    }

    for label in &config.labels {
        tracing::debug!("label {label}");
    }
    serde_json::to_writer_pretty(&mut *out, config)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConnectionConfig, TableRef, ValidationType};
    use tempfile::TempDir;

    fn config() -> RunConfig {
        RunConfig {
            validation_type: ValidationType::Row,
            source_conn: ConnectionConfig::new("Example"),
            target_conn: ConnectionConfig::new("Example"),
            tables: vec![TableRef::new("my_schema", "my_table")],
            sum_columns: Vec::new(),
            count_columns: Vec::new(),
            labels: Vec::new(),
            threshold: 0.0,
            verbose: false,
            beta: true,
        }
    }

    #[test]
    fn test_run_writes_json_to_output() {
        let mut out = Vec::new();
        run_validation(&config(), None, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["validation_type"], "Row");
        assert_eq!(value["tables"][0]["table_name"], "my_table");
        assert_eq!(value["beta"], true);
    }

    #[test]
    fn test_run_with_config_file_writes_yaml_only() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("example_test.yaml");

        let mut out = Vec::new();
        run_validation(&config(), Some(&path), &mut out).unwrap();

        assert!(out.is_empty());
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("validation_type: Row"));
    }
}
