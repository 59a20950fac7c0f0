//! Candidate table matching for `find-tables`.
//!
//! Listing the tables behind a connection is a connector concern, so it sits
//! behind the [`TableCatalog`] trait. Given both listings, source tables are
//! paired with the most similar target table by normalized Levenshtein
//! similarity of their lowercased `schema.table` names.

use crate::config::{ConnectionConfig, FindTablesConfig, TableRef};
use crate::error::Result;

/// Lists the tables reachable through a connection.
pub trait TableCatalog {
    fn list_tables(&self, conn: &ConnectionConfig) -> Result<Vec<TableRef>>;
}

/// Similarity of two tables' qualified names, in `0.0..=1.0`.
#[must_use]
pub fn table_similarity(a: &TableRef, b: &TableRef) -> f64 {
    strsim::normalized_levenshtein(
        &a.qualified_name().to_lowercase(),
        &b.qualified_name().to_lowercase(),
    )
}

/// Pair each source table with its best-scoring target table.
///
/// When `allowed_schemas` is non-empty, tables on either side outside those
/// schemas are ignored. Pairs scoring below `score_cutoff` are dropped. The
/// result follows source order; ties go to the earlier target.
#[must_use]
pub fn match_tables(
    source: &[TableRef],
    target: &[TableRef],
    allowed_schemas: &[String],
    score_cutoff: f64,
) -> Vec<TableRef> {
    let allowed = |t: &&TableRef| {
        allowed_schemas.is_empty() || allowed_schemas.iter().any(|s| *s == t.schema_name)
    };
    let candidates: Vec<&TableRef> = target.iter().filter(allowed).collect();

    source
        .iter()
        .filter(allowed)
        .filter_map(|src| {
            let mut best: Option<(&TableRef, f64)> = None;
            for tgt in &candidates {
                let score = table_similarity(src, tgt);
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some((*tgt, score));
                }
            }
            best.filter(|(_, score)| *score >= score_cutoff)
                .map(|(tgt, score)| {
                    tracing::debug!(
                        "matched {} -> {} (score {:.3})",
                        src.qualified_name(),
                        tgt.qualified_name(),
                        score
                    );
                    TableRef {
                        schema_name: src.schema_name.clone(),
                        table_name: src.table_name.clone(),
                        target_schema_name: Some(tgt.schema_name.clone()),
                        target_table_name: Some(tgt.table_name.clone()),
                    }
                })
        })
        .collect()
}

/// List both sides through `catalog` and match them per `config`.
pub fn find_tables(config: &FindTablesConfig, catalog: &dyn TableCatalog) -> Result<Vec<TableRef>> {
    let source = catalog.list_tables(&config.source_conn)?;
    let target = catalog.list_tables(&config.target_conn)?;
    tracing::info!(
        "comparing {} source and {} target tables",
        source.len(),
        target.len()
    );
    Ok(match_tables(
        &source,
        &target,
        &config.allowed_schemas,
        config.score_cutoff,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(names: &[(&str, &str)]) -> Vec<TableRef> {
        names.iter().map(|(s, t)| TableRef::new(*s, *t)).collect()
    }

    #[test]
    fn test_exact_names_match() {
        let source = tables(&[("sales", "orders"), ("sales", "customers")]);
        let target = tables(&[("sales", "customers"), ("sales", "orders")]);

        let matched = match_tables(&source, &target, &[], 1.0);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].table_name, "orders");
        assert_eq!(matched[0].target_table(), "orders");
        assert_eq!(matched[1].target_table(), "customers");
    }

    #[test]
    fn test_case_insensitive_similarity() {
        let a = TableRef::new("Sales", "ORDERS");
        let b = TableRef::new("sales", "orders");
        assert!((table_similarity(&a, &b) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cutoff_drops_weak_pairs() {
        let source = tables(&[("sales", "orders"), ("sales", "zz")]);
        let target = tables(&[("sales", "orders_v2")]);

        let matched = match_tables(&source, &target, &[], 0.7);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].target_table_name.as_deref(), Some("orders_v2"));
    }

    #[test]
    fn test_allowed_schemas_filter() {
        let source = tables(&[("my_schema", "orders"), ("other", "orders")]);
        let target = tables(&[("my_schema", "orders"), ("other", "orders")]);

        let matched = match_tables(&source, &target, &["my_schema".to_string()], 0.5);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].schema_name, "my_schema");
        assert_eq!(matched[0].target_schema(), "my_schema");
    }

    struct StaticCatalog;

    impl TableCatalog for StaticCatalog {
        fn list_tables(&self, conn: &ConnectionConfig) -> Result<Vec<TableRef>> {
            Ok(match conn.source_type() {
                Some("Source") => tables(&[("my_schema", "orders")]),
                _ => tables(&[("my_schema", "orders"), ("my_schema", "refunds")]),
            })
        }
    }

    #[test]
    fn test_find_tables_uses_catalog() {
        let config = FindTablesConfig {
            source_conn: ConnectionConfig::new("Source"),
            target_conn: ConnectionConfig::new("Target"),
            allowed_schemas: vec!["my_schema".into()],
            score_cutoff: 0.8,
        };

        let matched = find_tables(&config, &StaticCatalog).unwrap();
        assert_eq!(matched, vec![TableRef {
            schema_name: "my_schema".into(),
            table_name: "orders".into(),
            target_schema_name: Some("my_schema".into()),
            target_table_name: Some("orders".into()),
        }]);
    }
}
