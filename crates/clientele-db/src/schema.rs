//! Schema definitions and migration runner for SurrealDB.
//!
//! Tables are SCHEMAFULL: every field is typed, required text is
//! asserted non-empty, and record ids are UUID strings. The schema is
//! the second line of defence behind the validation the models run
//! before each write.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};

use crate::error::DbError;

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct AppliedVersion {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "customer",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// v1: customers
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
DEFINE TABLE customer SCHEMAFULL;
DEFINE FIELD name ON TABLE customer TYPE string \
    ASSERT string::len(string::trim($value)) > 0;
DEFINE FIELD date_of_birth ON TABLE customer TYPE datetime;
DEFINE FIELD member_number ON TABLE customer TYPE int;
DEFINE FIELD interests ON TABLE customer TYPE string \
    ASSERT string::len(string::trim($value)) > 0;
DEFINE FIELD created_at ON TABLE customer TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE customer TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_customer_member_number ON TABLE customer \
    COLUMNS member_number UNIQUE;
";

/// Bring the schema of `db` up to date.
///
/// Applies, in version order, every migration newer than the highest
/// version recorded in `_migration`, and returns how many were applied.
/// Calling it on an up-to-date database is a no-op.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<usize, DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let applied: Vec<AppliedVersion> = result.take(0)?;
    let current = applied.first().map(|row| row.version).unwrap_or(0);
    debug!(current, "Current schema version");

    let mut count = 0;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );

        let statements = format!(
            "{}\nCREATE _migration SET version = $version, name = $name;",
            migration.sql
        );
        db.query(statements)
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "v{} '{}': {e}",
                    migration.version, migration.name
                ))
            })?;

        count += 1;
    }

    if count > 0 {
        info!(applied = count, "Schema up to date");
    }

    Ok(count)
}

/// The customer table DDL, for tests that set up a bare database
/// without the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
