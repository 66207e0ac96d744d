//! Error taxonomy for store operations.

use std::fmt;

use timeslot_core::types::DbId;

/// SQLSTATE class for integrity constraint violations (unique, foreign key,
/// not-null, check).
const INTEGRITY_CONSTRAINT_CLASS: &str = "23";

/// `not_null_violation` and `check_violation`: the row itself is invalid,
/// independent of any other row.
const INVALID_ROW_CODES: [&str; 2] = ["23502", "23514"];

/// Which step of a transaction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStage {
    Begin,
    Commit,
    Rollback,
}

impl fmt::Display for TxStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStage::Begin => f.write_str("begin"),
            TxStage::Commit => f.write_str("commit"),
            TxStage::Rollback => f.write_str("rollback"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// An update input carried no fields. Raised before any statement is built.
    #[error("Update input has no fields set")]
    EmptyUpdate,

    /// A NOT NULL or CHECK constraint rejected the row's values.
    #[error("Validation failed ({constraint}): {message}")]
    Validation { constraint: String, message: String },

    /// The ownership join yielded no row.
    #[error("{entity} not found")]
    NotFound {
        entity: &'static str,
        id: Option<DbId>,
    },

    #[error("Constraint violation ({constraint}): {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// Begin, commit or rollback itself failed. Never retried.
    #[error("Transaction {stage} failed: {source}")]
    TransactionFailure {
        stage: TxStage,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    Query(sqlx::Error),
}

impl DbError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        DbError::NotFound {
            entity,
            id: Some(id),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Row",
                id: None,
            },
            sqlx::Error::Database(db_err) => {
                let classified = db_err.code().and_then(|code| {
                    classify_constraint(&code, db_err.constraint(), db_err.message())
                });
                match classified {
                    Some(err) => err,
                    None => DbError::Query(sqlx::Error::Database(db_err)),
                }
            }
            other => DbError::Query(other),
        }
    }
}

/// Map an integrity-class SQLSTATE to a typed error. `None` for any other class.
fn classify_constraint(code: &str, constraint: Option<&str>, message: &str) -> Option<DbError> {
    if !code.starts_with(INTEGRITY_CONSTRAINT_CLASS) {
        return None;
    }
    let constraint = constraint.unwrap_or("unknown").to_string();
    let message = message.to_string();
    if INVALID_ROW_CODES.contains(&code) {
        Some(DbError::Validation { constraint, message })
    } else {
        Some(DbError::ConstraintViolation { constraint, message })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert_matches!(err, DbError::NotFound { id: None, .. });
    }

    #[test]
    fn pool_errors_stay_query_errors() {
        let err = DbError::from(sqlx::Error::PoolTimedOut);
        assert_matches!(err, DbError::Query(sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn transaction_failure_names_stage() {
        let err = DbError::TransactionFailure {
            stage: TxStage::Rollback,
            source: sqlx::Error::PoolClosed,
        };
        assert!(err.to_string().starts_with("Transaction rollback failed"));
    }

    #[test]
    fn check_and_not_null_violations_are_validation_errors() {
        for code in ["23514", "23502"] {
            let err = classify_constraint(
                code,
                Some("ck_timeslots_lists_title_not_empty"),
                "bad row",
            );
            assert_matches!(err, Some(DbError::Validation { .. }));
        }
    }

    #[test]
    fn unique_and_foreign_key_violations_stay_conflicts() {
        for code in ["23505", "23503"] {
            let err = classify_constraint(code, Some("uq_users_username"), "duplicate");
            assert_matches!(
                err,
                Some(DbError::ConstraintViolation { ref constraint, .. })
                    if constraint == "uq_users_username"
            );
        }
        assert!(classify_constraint("42P01", None, "no such table").is_none());
    }
}
