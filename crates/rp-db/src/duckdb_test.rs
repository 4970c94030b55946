use super::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

#[tokio::test]
async fn test_find_databases_is_case_insensitive() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(r#"CREATE SCHEMA "DWT05T_ODS"; CREATE SCHEMA "DWT05V_ODS";"#)
        .await
        .unwrap();

    let found = db.find_databases("dwt05t_ods").await.unwrap();
    assert_eq!(found, vec!["DWT05T_ODS".to_string()]);
}

#[tokio::test]
async fn test_find_databases_missing() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(db.find_databases("NOPE").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_databases_sees_builtin_schema() {
    let db = DuckDbBackend::new(":memory:").unwrap();
    assert_eq!(db.find_databases("MAIN").await.unwrap(), vec!["main".to_string()]);
}

#[tokio::test]
async fn test_from_path_persists_schemas() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.duckdb");

    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.execute_batch(r#"CREATE SCHEMA "DB1";"#).await.unwrap();
    }

    let db = DuckDbBackend::from_path(&path).unwrap();
    assert_eq!(db.find_databases("db1").await.unwrap(), vec!["DB1".to_string()]);
}

#[tokio::test]
async fn test_execute_batch_error() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.execute_batch("NOT VALID SQL").await.unwrap_err();
    assert!(matches!(err, DbError::ExecutionError(_)));
}
