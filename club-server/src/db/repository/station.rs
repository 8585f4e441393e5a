//! Station Repository
//!
//! Owns the station table. Status changes go through guarded single-row
//! updates so concurrent writers (rent requests and the sweeper) serialize
//! at the row instead of overwriting each other; the rent/reclaim side of
//! that lives in [`super::rental`].

use super::{RepoError, RepoResult};
use shared::models::{Station, StationCreate, StationStatus};
use sqlx::SqlitePool;

const STATION_SELECT: &str =
    "SELECT id, name, configuration, status, rental_end_time, is_active FROM station";

/// All active stations regardless of status
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Station>> {
    let sql = format!("{STATION_SELECT} WHERE is_active = 1 ORDER BY name");
    let stations = sqlx::query_as::<_, Station>(&sql).fetch_all(pool).await?;
    Ok(stations)
}

/// Active stations currently free to rent
pub async fn find_available(pool: &SqlitePool) -> RepoResult<Vec<Station>> {
    let sql = format!("{STATION_SELECT} WHERE is_active = 1 AND status = ? ORDER BY name");
    let stations = sqlx::query_as::<_, Station>(&sql)
        .bind(StationStatus::Available)
        .fetch_all(pool)
        .await?;
    Ok(stations)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Station>> {
    let sql = format!("{STATION_SELECT} WHERE id = ?");
    let station = sqlx::query_as::<_, Station>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(station)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Station>> {
    let sql = format!("{STATION_SELECT} WHERE name = ? LIMIT 1");
    let station = sqlx::query_as::<_, Station>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(station)
}

/// The station whose open lease belongs to `user_id`, if any.
///
/// A lease is open while the station is still rented; ownership is read
/// from the most recent rental row of that station.
pub async fn find_rented_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<Station>> {
    let sql = format!(
        "{STATION_SELECT} s WHERE s.is_active = 1 AND s.status = 'rented' AND ( \
           SELECT r.user_id FROM rental_log r \
           WHERE r.station_id = s.id \
           ORDER BY r.start_time DESC, r.id DESC LIMIT 1 \
         ) = ? LIMIT 1"
    );
    let station = sqlx::query_as::<_, Station>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(station)
}

/// Create a new station in the available state
pub async fn create(pool: &SqlitePool, data: StationCreate) -> RepoResult<Station> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Station '{}' already exists",
            data.name
        )));
    }

    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO station (id, name, configuration, status, is_active) VALUES (?1, ?2, ?3, ?4, 1)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.configuration)
    .bind(StationStatus::Available)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create station".into()))
}

/// Update the hardware descriptor of a station that is not in use.
///
/// The update is guarded on `status <> 'rented'` so a rent racing in
/// between the caller's read and this write still loses cleanly.
pub async fn update_configuration(
    pool: &SqlitePool,
    id: i64,
    configuration: &str,
) -> RepoResult<Station> {
    let rows = sqlx::query(
        "UPDATE station SET configuration = ?1 WHERE id = ?2 AND is_active = 1 AND status <> 'rented'",
    )
    .bind(configuration)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(classify_guarded_miss(pool, id).await?);
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Station {id} not found")))
}

/// Soft-delete a station that is not in use.
///
/// The row and its rental history are retained; the station just stops
/// appearing in availability queries.
pub async fn retire(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE station SET is_active = 0 WHERE id = ?1 AND is_active = 1 AND status <> 'rented'",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(classify_guarded_miss(pool, id).await?);
    }

    Ok(true)
}

/// A guarded update touched nothing: decide between NotFound (absent or
/// retired) and InvalidState (currently rented).
async fn classify_guarded_miss(pool: &SqlitePool, id: i64) -> RepoResult<RepoError> {
    Ok(match find_by_id(pool, id).await? {
        None => RepoError::NotFound(format!("Station {id} not found")),
        Some(s) if !s.is_active => RepoError::NotFound(format!("Station {id} not found")),
        Some(s) => RepoError::InvalidState(format!("Station '{}' is currently rented", s.name)),
    })
}
