//! Database-specific error types and conversions.

use clientele_core::error::ClienteleError;

use crate::connection::ConnectError;

// SurrealDB 3.3 reports index and field-check failures with the
// `Internal` kind and no structured details, so writes are classified by
// message text. Checked against surrealdb-core 3.3.4.

/// Markers of field type checks (`FieldCoerce`) and `ASSERT` clauses
/// (`FieldValue`).
const FIELD_CHECK_MARKERS: &[&str] = &["for field `", "Couldn't coerce"];

/// Marker of a UNIQUE index rejecting a write (`IndexExists`).
const UNIQUE_INDEX_MARKER: &str = "already contains";

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Connection failed: {0}")]
    Connection(#[from] ConnectError),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Duplicate {field} {value} for {entity}")]
    UniqueViolation {
        entity: String,
        field: String,
        value: String,
    },

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Malformed record: {0}")]
    InvalidRecord(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl DbError {
    /// Classify a statement error raised by a write on `entity`.
    ///
    /// `unique` names the uniquely indexed field and the value the
    /// write tried to store, when the write touched it.
    pub(crate) fn from_write(
        err: surrealdb::Error,
        entity: &str,
        unique: Option<(&str, String)>,
    ) -> Self {
        let message = err.to_string();
        if message.contains(UNIQUE_INDEX_MARKER) {
            let (field, value) = unique.unwrap_or(("unique field", String::new()));
            return DbError::UniqueViolation {
                entity: entity.into(),
                field: field.into(),
                value,
            };
        }
        if FIELD_CHECK_MARKERS.iter().any(|m| message.contains(m)) {
            return DbError::Constraint(message);
        }
        DbError::Surreal(err)
    }
}

impl From<DbError> for ClienteleError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ClienteleError::NotFound { entity, id },
            DbError::UniqueViolation {
                entity,
                field,
                value,
            } => ClienteleError::AlreadyExists {
                entity,
                field,
                value,
            },
            DbError::Constraint(message) => ClienteleError::Validation { message },
            DbError::Connection(e) => ClienteleError::Unavailable(e.to_string()),
            other => ClienteleError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn not_found_maps_to_core_not_found() {
        let err: ClienteleError = DbError::NotFound {
            entity: "customer".into(),
            id: "abc".into(),
        }
        .into();
        assert!(err.is_not_found());
    }

    #[test]
    fn unique_violation_maps_to_already_exists() {
        let err: ClienteleError = DbError::UniqueViolation {
            entity: "customer".into(),
            field: "memberNumber".into(),
            value: "42".into(),
        }
        .into();
        match err {
            ClienteleError::AlreadyExists { field, value, .. } => {
                assert_eq!(field, "memberNumber");
                assert_eq!(value, "42");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn connection_failure_maps_to_unavailable() {
        let err: ClienteleError =
            DbError::Connection(ConnectError::TimedOut(Duration::from_secs(5))).into();
        assert!(matches!(err, ClienteleError::Unavailable(_)));
    }

    #[test]
    fn duplicate_index_entry_is_a_unique_violation() {
        let err = surrealdb::Error::internal(
            "Database index `idx_customer_member_number` already contains 42, \
             with record `customer:abc`"
                .into(),
        );
        match DbError::from_write(err, "customer", Some(("memberNumber", "42".into()))) {
            DbError::UniqueViolation { field, value, .. } => {
                assert_eq!(field, "memberNumber");
                assert_eq!(value, "42");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn field_check_failures_are_constraints() {
        let assert_failure = surrealdb::Error::internal(
            "Found '' for field `name`, with record `customer:abc`, \
             but field must conform to: string::len(string::trim($value)) > 0"
                .into(),
        );
        let coerce_failure = surrealdb::Error::internal(
            "Couldn't coerce value for field `member_number` of `customer:abc`: \
             Expected `int` but found `'x'`"
                .into(),
        );
        for err in [assert_failure, coerce_failure] {
            assert!(matches!(
                DbError::from_write(err, "customer", None),
                DbError::Constraint(_)
            ));
        }
    }

    #[test]
    fn other_write_failures_stay_database_errors() {
        let err = surrealdb::Error::internal("Transaction conflict".into());
        assert!(matches!(
            DbError::from_write(err, "customer", None),
            DbError::Surreal(_)
        ));
    }

    #[test]
    fn constraint_maps_to_validation() {
        let err: ClienteleError = DbError::Constraint("bad name".into()).into();
        assert!(matches!(err, ClienteleError::Validation { .. }));
    }
}
