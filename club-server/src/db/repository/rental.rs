//! Rental Repository
//!
//! The only writer of `station.status` and `station.rental_end_time`.
//! [`begin`] performs the check-and-set and the history append as one
//! transaction; [`reclaim_expired`] is the sweeper's single guarded update.

use super::{RepoError, RepoResult, station};
use shared::models::RentalLog;
use sqlx::SqlitePool;

/// Atomically claim an available station and append the rental record.
///
/// The claim is an UPDATE guarded on `status = 'available'`: of two
/// concurrent claims on the same station exactly one sees an affected row.
/// The loser (and any claim against a rented or out-of-order unit) gets
/// `InvalidState`; a missing or retired station is `NotFound`.
pub async fn begin(
    pool: &SqlitePool,
    station_id: i64,
    user_id: i64,
    start_time: i64,
    end_time: i64,
) -> RepoResult<RentalLog> {
    let mut tx = pool.begin().await?;

    let claimed = sqlx::query(
        "UPDATE station SET status = 'rented', rental_end_time = ?1 \
         WHERE id = ?2 AND is_active = 1 AND status = 'available'",
    )
    .bind(end_time)
    .bind(station_id)
    .execute(&mut *tx)
    .await?;

    if claimed.rows_affected() == 0 {
        // Release the write transaction before the diagnostic read.
        tx.rollback().await?;
        return Err(match station::find_by_id(pool, station_id).await? {
            None => RepoError::NotFound(format!("Station {station_id} not found")),
            Some(s) if !s.is_active => {
                RepoError::NotFound(format!("Station {station_id} not found"))
            }
            Some(s) => RepoError::InvalidState(format!("Station '{}' is not available", s.name)),
        });
    }

    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO rental_log (id, station_id, user_id, start_time, end_time) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(station_id)
    .bind(user_id)
    .bind(start_time)
    .bind(end_time)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(RentalLog {
        id,
        station_id,
        user_id,
        start_time,
        end_time,
    })
}

/// Return every rented station whose lease expired by `now` to the pool.
///
/// One guarded UPDATE over all matching rows: the expiry is cleared in
/// the same statement that flips the status, so a rented station always
/// carries an expiry and an available one never does. Running it again
/// without new rentals touches nothing. Historical rental rows are left
/// alone. Returns the number of stations released.
pub async fn reclaim_expired(pool: &SqlitePool, now: i64) -> RepoResult<u64> {
    let done = sqlx::query(
        "UPDATE station SET status = 'available', rental_end_time = NULL \
         WHERE status = 'rented' AND rental_end_time IS NOT NULL AND rental_end_time <= ?1",
    )
    .bind(now)
    .execute(pool)
    .await?;
    Ok(done.rows_affected())
}
