//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn bare_db() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    db
}

#[tokio::test]
async fn migration_defines_customer_table() {
    let db = bare_db().await;

    let applied = clientele_db::run_migrations(&db).await.unwrap();
    assert_eq!(applied, 1);

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info_str = format!("{:?}", info.expect("INFO FOR DB should return a value"));

    assert!(info_str.contains("customer"), "missing customer table");
    assert!(info_str.contains("_migration"), "missing _migration table");
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = bare_db().await;

    assert_eq!(clientele_db::run_migrations(&db).await.unwrap(), 1);
    assert_eq!(clientele_db::run_migrations(&db).await.unwrap(), 0);

    let mut result = db.query("SELECT * FROM _migration").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1, "expected exactly one migration record");
}

#[tokio::test]
async fn schema_rejects_duplicate_member_numbers() {
    let db = bare_db().await;
    db.query(clientele_db::schema_v1())
        .await
        .unwrap()
        .check()
        .unwrap();

    db.query(
        "CREATE customer SET name = 'Jane Doe', \
         date_of_birth = d'1990-05-01T00:00:00Z', \
         member_number = 42, interests = 'reading'",
    )
    .await
    .unwrap()
    .check()
    .unwrap();

    let result = db
        .query(
            "CREATE customer SET name = 'John Roe', \
             date_of_birth = d'1985-01-01T00:00:00Z', \
             member_number = 42, interests = 'golf'",
        )
        .await
        .unwrap()
        .check();
    assert!(result.is_err(), "duplicate member_number should be rejected");

    let mut result = db.query("SELECT * FROM customer").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn schema_rejects_missing_and_blank_fields() {
    let db = bare_db().await;
    clientele_db::run_migrations(&db).await.unwrap();

    let missing_interests = db
        .query(
            "CREATE customer SET name = 'Jane Doe', \
             date_of_birth = d'1990-05-01T00:00:00Z', member_number = 1",
        )
        .await
        .unwrap()
        .check();
    assert!(missing_interests.is_err());

    let blank_name = db
        .query(
            "CREATE customer SET name = '  ', \
             date_of_birth = d'1990-05-01T00:00:00Z', \
             member_number = 2, interests = 'reading'",
        )
        .await
        .unwrap()
        .check();
    assert!(blank_name.is_err());

    let wrong_type = db
        .query(
            "CREATE customer SET name = 'Jane Doe', \
             date_of_birth = d'1990-05-01T00:00:00Z', \
             member_number = 'forty-two', interests = 'reading'",
        )
        .await
        .unwrap()
        .check();
    assert!(wrong_type.is_err());
}
