//! Scoped transaction helper.
//!
//! Every read-decide-write flow that relies on row locks goes through
//! [`with_transaction`] so commit/rollback handling lives in one place.

use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};

/// Run `body` inside a single database transaction.
///
/// - `Ok` from the body commits; a commit failure is returned as an error.
/// - `Err` from the body rolls back explicitly before the error propagates.
/// - If the future is dropped or panics mid-body, the transaction guard is
///   dropped and sqlx rolls it back before the connection returns to the pool.
///
/// Row locks taken by the body (`SELECT ... FOR UPDATE`) are held until the
/// commit or rollback.
///
/// The body receives the transaction's connection and must own everything it
/// captures:
///
/// ```ignore
/// let id = with_transaction(&pool, move |conn| {
///     Box::pin(async move {
///         let row: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&mut *conn).await?;
///         Ok::<_, DbError>(row.0)
///     })
/// })
/// .await?;
/// ```
pub async fn with_transaction<T, E, F>(pool: &PgPool, body: F) -> Result<T, E>
where
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, E>> + Send,
    T: Send,
    E: From<sqlx::Error> + Send,
{
    let mut tx = pool.begin().await?;

    match body(&mut *tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                // The connection is closed by the pool when the rollback
                // itself fails; the original error is what the caller needs.
                tracing::warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}
