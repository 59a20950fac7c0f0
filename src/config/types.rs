//! Configuration type definitions.
//!
//! These are the typed objects handed to the validation engine and the
//! connection store. They are assembled from parsed arguments in
//! [`super::assembly`] and never mutated afterwards.

use crate::validators::Label;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Index;

// ============================================================================
// Connections
// ============================================================================

/// Key under which every connection records its connector type.
pub const SOURCE_TYPE_KEY: &str = "source_type";

/// Flat key/value settings describing how to reach a data source.
///
/// Keys keep insertion order so stored records read the way they were
/// entered (`source_type` first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionConfig(IndexMap<String, Value>);

impl ConnectionConfig {
    /// Start a config for the given connector type.
    #[must_use]
    pub fn new(source_type: impl Into<String>) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(SOURCE_TYPE_KEY.to_string(), Value::String(source_type.into()));
        Self(fields)
    }

    /// Add a field, replacing any previous value under the same key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Add a field only when a value is present.
    #[must_use]
    pub fn with_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String field lookup; `None` if absent or not a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn source_type(&self) -> Option<&str> {
        self.get_str(SOURCE_TYPE_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<&str> for ConnectionConfig {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.0.get(key).unwrap_or(&NULL)
    }
}

// ============================================================================
// Run configuration
// ============================================================================

/// Kind of comparison the engine performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ValidationType {
    /// Aggregate comparison over whole columns
    #[value(name = "Column")]
    Column,
    /// Aggregates grouped by one or more key columns
    #[value(name = "GroupedColumn")]
    GroupedColumn,
    /// Row-by-row comparison
    #[value(name = "Row")]
    Row,
    /// Column names and types only
    #[value(name = "Schema")]
    Schema,
}

/// A table to validate, optionally mapped to a differently named target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub schema_name: String,
    pub table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_schema_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_table_name: Option<String>,
}

impl TableRef {
    pub fn new(schema_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            schema_name: schema_name.into(),
            table_name: table_name.into(),
            target_schema_name: None,
            target_table_name: None,
        }
    }

    /// Fully qualified source name, `schema.table`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema_name, self.table_name)
    }

    /// Target schema, falling back to the source schema.
    #[must_use]
    pub fn target_schema(&self) -> &str {
        self.target_schema_name.as_deref().unwrap_or(&self.schema_name)
    }

    /// Target table, falling back to the source table.
    #[must_use]
    pub fn target_table(&self) -> &str {
        self.target_table_name.as_deref().unwrap_or(&self.table_name)
    }
}

/// Aggregate function applied on both sides of a column validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateKind {
    Count,
    Sum,
}

/// One aggregate to compute; `column: None` means `count(*)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    #[serde(rename = "type")]
    pub kind: AggregateKind,
    pub column: Option<String>,
}

/// Everything the engine needs to execute one `run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub validation_type: ValidationType,
    pub source_conn: ConnectionConfig,
    pub target_conn: ConnectionConfig,
    pub tables: Vec<TableRef>,
    #[serde(default)]
    pub sum_columns: Vec<String>,
    #[serde(default)]
    pub count_columns: Vec<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub threshold: f64,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub beta: bool,
}

impl RunConfig {
    /// Aggregates in evaluation order: `count(*)`, then `--count`, then `--sum`.
    #[must_use]
    pub fn aggregates(&self) -> Vec<Aggregate> {
        let star = std::iter::once(Aggregate {
            kind: AggregateKind::Count,
            column: None,
        });
        let counts = self.count_columns.iter().map(|c| Aggregate {
            kind: AggregateKind::Count,
            column: Some(c.clone()),
        });
        let sums = self.sum_columns.iter().map(|c| Aggregate {
            kind: AggregateKind::Sum,
            column: Some(c.clone()),
        });
        star.chain(counts).chain(sums).collect()
    }
}

// ============================================================================
// find-tables configuration
// ============================================================================

/// Default minimum similarity for a table pair to be reported.
pub const DEFAULT_SCORE_CUTOFF: f64 = 0.8;

/// Inputs for discovering candidate table pairs across two connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindTablesConfig {
    pub source_conn: ConnectionConfig,
    pub target_conn: ConnectionConfig,
    #[serde(default)]
    pub allowed_schemas: Vec<String>,
    pub score_cutoff: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connection_config_keeps_insertion_order() {
        let conn = ConnectionConfig::new("BigQuery")
            .with("project_id", "example-project")
            .with_opt("google_service_account_key_path", None::<String>);

        assert_eq!(conn.source_type(), Some("BigQuery"));
        assert_eq!(conn["project_id"], "example-project");
        assert_eq!(conn["missing"], Value::Null);
        assert_eq!(conn.len(), 2);

        let keys: Vec<&str> = conn.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["source_type", "project_id"]);
    }

    #[test]
    fn test_connection_config_serializes_flat() {
        let conn = ConnectionConfig::new("Postgres").with("port", 5432);
        let value = serde_json::to_value(&conn).unwrap();
        assert_eq!(value, json!({"source_type": "Postgres", "port": 5432}));
    }

    #[test]
    fn test_table_ref_target_fallback() {
        let table: TableRef = serde_json::from_value(json!({
            "schema_name": "my_schema",
            "table_name": "my_table",
            "target_table_name": "my_table_v2"
        }))
        .unwrap();

        assert_eq!(table.qualified_name(), "my_schema.my_table");
        assert_eq!(table.target_schema(), "my_schema");
        assert_eq!(table.target_table(), "my_table_v2");
    }

    #[test]
    fn test_aggregates_order() {
        let config = RunConfig {
            validation_type: ValidationType::Column,
            source_conn: ConnectionConfig::new("Example"),
            target_conn: ConnectionConfig::new("Example"),
            tables: vec![TableRef::new("my_schema", "my_table")],
            sum_columns: vec!["col_a".into()],
            count_columns: vec!["col_b".into()],
            labels: Vec::new(),
            threshold: 0.0,
            verbose: false,
            beta: false,
        };

        let aggregates = config.aggregates();
        assert_eq!(aggregates.len(), 3);
        assert_eq!(aggregates[0].column, None);
        assert_eq!(aggregates[1].kind, AggregateKind::Count);
        assert_eq!(aggregates[1].column.as_deref(), Some("col_b"));
        assert_eq!(aggregates[2].kind, AggregateKind::Sum);
    }
}
