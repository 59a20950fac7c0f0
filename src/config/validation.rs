//! Configuration validation for assembled config objects.
//!
//! Scalars are already validated at parse time; these checks cover the
//! structure that only exists once JSON flags have been decoded.

use super::types::{ConnectionConfig, FindTablesConfig, RunConfig, TableRef};
use serde_json::Value;
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for ConnectionConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        match self.source_type() {
            Some(t) if !t.trim().is_empty() => {}
            _ => errors.push(ConfigError::new(
                "source_type",
                "connection must declare a non-empty source_type",
            )),
        }

        for (key, value) in self.iter() {
            if matches!(value, Value::Array(_) | Value::Object(_)) {
                errors.push(ConfigError::new(
                    key.as_str(),
                    "connection fields must be scalar values",
                ));
            }
        }

        errors
    }
}

impl Validatable for RunConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(prefixed("source_conn", self.source_conn.validate()));
        errors.extend(prefixed("target_conn", self.target_conn.validate()));
        errors.extend(validate_tables(&self.tables));
        errors.extend(validate_names("sum", &self.sum_columns));
        errors.extend(validate_names("count", &self.count_columns));

        if !self.threshold.is_finite() || self.threshold < 0.0 {
            errors.push(ConfigError::new(
                "threshold",
                format!("must be a non-negative finite number, got {}", self.threshold),
            ));
        }

        errors
    }
}

impl Validatable for FindTablesConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(prefixed("source_conn", self.source_conn.validate()));
        errors.extend(prefixed("target_conn", self.target_conn.validate()));
        errors.extend(validate_names("allowed_schemas", &self.allowed_schemas));

        if !(0.0..=1.0).contains(&self.score_cutoff) {
            errors.push(ConfigError::new(
                "score_cutoff",
                format!("must be between 0.0 and 1.0, got {}", self.score_cutoff),
            ));
        }

        errors
    }
}

fn validate_tables(tables: &[TableRef]) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    if tables.is_empty() {
        errors.push(ConfigError::new("tables_list", "at least one table is required"));
    }

    let mut seen = HashSet::new();
    for (idx, table) in tables.iter().enumerate() {
        if table.schema_name.trim().is_empty() || table.table_name.trim().is_empty() {
            errors.push(ConfigError::new(
                format!("tables_list[{idx}]"),
                "schema_name and table_name must be non-empty",
            ));
        }
        if !seen.insert(table.qualified_name()) {
            errors.push(ConfigError::new(
                format!("tables_list[{idx}]"),
                format!("duplicate table {}", table.qualified_name()),
            ));
        }
    }
    errors
}

fn validate_names(field: &str, names: &[String]) -> Vec<ConfigError> {
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| name.trim().is_empty())
        .map(|(idx, _)| ConfigError::new(format!("{field}[{idx}]"), "name must be non-empty"))
        .collect()
}

fn prefixed(prefix: &str, errors: Vec<ConfigError>) -> impl Iterator<Item = ConfigError> + '_ {
    errors.into_iter().map(move |mut e| {
        e.field = format!("{prefix}.{}", e.field);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::ValidationType;

    fn run_config() -> RunConfig {
        RunConfig {
            validation_type: ValidationType::Column,
            source_conn: ConnectionConfig::new("Example"),
            target_conn: ConnectionConfig::new("Example"),
            tables: vec![TableRef::new("my_schema", "my_table")],
            sum_columns: vec!["col_a".into()],
            count_columns: Vec::new(),
            labels: Vec::new(),
            threshold: 30.0,
            verbose: false,
            beta: false,
        }
    }

    #[test]
    fn test_valid_run_config() {
        assert!(run_config().is_valid());
    }

    #[test]
    fn test_run_config_requires_tables() {
        let mut config = run_config();
        config.tables.clear();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "tables_list");
    }

    #[test]
    fn test_run_config_rejects_duplicates_and_blank_columns() {
        let mut config = run_config();
        config.tables.push(TableRef::new("my_schema", "my_table"));
        config.sum_columns.push("  ".into());

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, ["tables_list[1]", "sum[1]"]);
    }

    #[test]
    fn test_connection_requires_source_type() {
        let conn: ConnectionConfig =
            serde_json::from_str(r#"{"project_id":"p","nested":{"a":1}}"#).unwrap();
        let errors = conn.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "source_type");
        assert_eq!(errors[1].field, "nested");

        let mut config = run_config();
        config.target_conn = conn;
        assert!(config
            .validate()
            .iter()
            .any(|e| e.field == "target_conn.source_type"));
    }

    #[test]
    fn test_find_tables_score_cutoff_range() {
        let config = FindTablesConfig {
            source_conn: ConnectionConfig::new("Example"),
            target_conn: ConnectionConfig::new("Example"),
            allowed_schemas: vec!["my_schema".into()],
            score_cutoff: 1.5,
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "score_cutoff: must be between 0.0 and 1.0, got 1.5");
    }
}
