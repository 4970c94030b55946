use super::*;
use crate::DuckDbBackend;
use async_trait::async_trait;

fn index(pairs: &[(&str, &str)]) -> ObjectDatabaseIndex {
    let mut index = ObjectDatabaseIndex::new();
    for (object, database) in pairs {
        index.insert(object, database);
    }
    index
}

async fn two_copies() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        r#"
        CREATE SCHEMA DB1;
        CREATE SCHEMA DB2;
        CREATE TABLE DB1.T (ID INTEGER, NAME VARCHAR, ctl_id INTEGER, ONLY_A INTEGER);
        CREATE TABLE DB2.T (id INTEGER, name VARCHAR, ctl_id INTEGER);
        INSERT INTO DB1.T VALUES (1, 'a', 9, 0), (2, 'b', 9, 0), (3, 'c', 9, 0);
        INSERT INTO DB2.T VALUES (2, 'b', 8), (3, 'x', 8), (4, 'd', 8);
        "#,
    )
    .await
    .unwrap();
    db
}

#[tokio::test]
async fn test_queries_use_shared_columns_and_keys() {
    let db = two_copies().await;

    let script = build_data_checks(&db, &index(&[("T", "DB1"), ("T", "DB2")]))
        .await
        .unwrap();

    assert!(script.skipped.is_empty());
    assert_eq!(script.queries.len(), 2);
    assert_eq!(
        script.queries[0],
        "SELECT CAST('DB1.T' AS VARCHAR(50)), CAST(\"ID\" AS VARCHAR(50)), CAST(\"NAME\" AS VARCHAR(50)) FROM DB1.T WHERE ID = '2' UNION ALL\n\
         SELECT CAST('DB2.T' AS VARCHAR(50)), CAST(\"ID\" AS VARCHAR(50)), CAST(\"NAME\" AS VARCHAR(50)) FROM DB2.T WHERE ID = '2';"
    );
    assert!(script.queries[1].contains("WHERE ID = '3'"));
}

#[tokio::test]
async fn test_generated_queries_run_against_catalog() {
    let db = two_copies().await;
    let script = build_data_checks(&db, &index(&[("T", "DB1"), ("T", "DB2")]))
        .await
        .unwrap();

    db.execute_batch(&script.render()).await.unwrap();
}

#[tokio::test]
async fn test_missing_copy_is_skipped() {
    let db = two_copies().await;

    let script = build_data_checks(&db, &index(&[("T", "DB1"), ("V", "DB1")]))
        .await
        .unwrap();

    assert_eq!(script.skipped, vec!["V"]);
    assert_eq!(script.queries.len(), 3);
}

#[tokio::test]
async fn test_duckdb_column_names_and_samples() {
    let db = two_copies().await;

    assert_eq!(
        db.column_names("db2", "t").await.unwrap(),
        vec!["id", "name", "ctl_id"]
    );
    assert!(db.column_names("DB2", "NOPE").await.unwrap().is_empty());
    assert_eq!(
        db.sample_values("DB2", "T", "NAME", 2).await.unwrap(),
        vec![Some("b".to_string()), Some("d".to_string())]
    );
}

/// Catalog whose copies hold a NULL key and nothing else in common
struct NullKeyCatalog;

#[async_trait]
impl Database for NullKeyCatalog {
    async fn execute_batch(&self, _sql: &str) -> DbResult<()> {
        Ok(())
    }

    async fn find_databases(&self, name: &str) -> DbResult<Vec<String>> {
        Ok(vec![name.to_string()])
    }

    async fn column_names(&self, _database: &str, _object: &str) -> DbResult<Vec<String>> {
        Ok(vec!["PROCESS_ID".to_string(), "KEY_CD".to_string()])
    }

    async fn sample_values(
        &self,
        database: &str,
        _object: &str,
        _column: &str,
        _limit: usize,
    ) -> DbResult<Vec<Option<String>>> {
        Ok(vec![Some(database.to_string()), None])
    }

    fn db_type(&self) -> &'static str {
        "null-key"
    }
}

#[tokio::test]
async fn test_null_key_matches_is_null_and_audit_columns_are_ignored() {
    let script = build_data_checks(&NullKeyCatalog, &index(&[("T", "DB1"), ("T", "DB2")]))
        .await
        .unwrap();

    assert_eq!(script.queries.len(), 1);
    assert!(script.queries[0].ends_with("FROM DB2.T WHERE KEY_CD IS NULL;"));
    assert!(!script.queries[0].contains("PROCESS_ID"));
}

#[test]
fn test_render_separates_queries() {
    let script = DataCheckScript {
        queries: vec!["SELECT 1;".to_string(), "SELECT 2;".to_string()],
        skipped: Vec::new(),
    };
    assert_eq!(script.render(), "SELECT 1;\n\nSELECT 2;\n\n");
}
