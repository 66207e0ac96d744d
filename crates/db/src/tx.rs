//! Transaction helpers shared by the multi-statement creates and deletes.
//!
//! sqlx rolls a dropped transaction back silently. These helpers roll back
//! explicitly so a failed rollback is reported instead of swallowed.

use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{DbError, TxStage};

pub(crate) async fn begin(pool: &PgPool) -> Result<Transaction<'static, Postgres>, DbError> {
    pool.begin()
        .await
        .map_err(|source| DbError::TransactionFailure {
            stage: TxStage::Begin,
            source,
        })
}

pub(crate) async fn commit(tx: Transaction<'_, Postgres>) -> Result<(), DbError> {
    tx.commit()
        .await
        .map_err(|source| DbError::TransactionFailure {
            stage: TxStage::Commit,
            source,
        })
}

/// Roll back after `err` and return the error to surface.
///
/// The original statement error is returned when the rollback succeeds. A
/// rollback failure takes precedence, since the connection state is unknown.
pub(crate) async fn abort(tx: Transaction<'_, Postgres>, err: sqlx::Error) -> DbError {
    match tx.rollback().await {
        Ok(()) => {
            tracing::debug!(error = %err, "Transaction rolled back");
            err.into()
        }
        Err(source) => {
            tracing::error!(error = %source, original = %err, "Transaction rollback failed");
            DbError::TransactionFailure {
                stage: TxStage::Rollback,
                source,
            }
        }
    }
}
