//! Rental engine
//!
//! Time-boxed exclusive leases over stations. A lease starts with an
//! atomic claim of the station row and ends only when the sweeper
//! reclaims the unit after `rental_end_time` passes; there is no explicit
//! end-rental entry point.

pub mod sweeper;

pub use sweeper::RentalSweeper;

use shared::models::{RentalLog, Station};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{rental, station};
use crate::utils::{AppError, AppResult};

/// Lease manager over the station pool
#[derive(Clone)]
pub struct RentalService {
    pool: SqlitePool,
}

impl RentalService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stations the caller may rent: only their own unit while they hold
    /// an open lease, the free pool otherwise.
    pub async fn list_available_or_mine(&self, user: &CurrentUser) -> AppResult<Vec<Station>> {
        if let Some(mine) = station::find_rented_by_user(&self.pool, user.id).await? {
            return Ok(vec![mine]);
        }
        Ok(station::find_available(&self.pool).await?)
    }

    /// Start a lease on `station_id` for the duration given as a compact
    /// token (`"10m"`, `"2h"`).
    ///
    /// The station claim and the history append commit atomically; of two
    /// concurrent calls on the same free station exactly one succeeds and
    /// the other observes `InvalidState`.
    pub async fn start_rental(
        &self,
        station_id: i64,
        user: &CurrentUser,
        duration: &str,
    ) -> AppResult<RentalLog> {
        let duration = parse_duration(duration)?;
        let start_time = shared::util::now_millis();
        let end_time = start_time + duration.num_milliseconds();

        let log = rental::begin(&self.pool, station_id, user.id, start_time, end_time).await?;

        tracing::info!(
            station_id,
            user_id = user.id,
            end_time,
            "Station rented"
        );
        Ok(log)
    }

    /// One sweep cycle: release every lease that has expired by now.
    ///
    /// Returns the number of stations reclaimed. Safe to call at any
    /// frequency; a cycle that finds nothing changes nothing.
    pub async fn sweep(&self) -> AppResult<u64> {
        let released = rental::reclaim_expired(&self.pool, shared::util::now_millis()).await?;
        if released > 0 {
            tracing::info!(released, "Reclaimed expired rentals");
        }
        Ok(released)
    }
}

/// Parse a compact rental duration token: `"<integer>m"` (minutes) or
/// `"<integer>h"` (hours). Anything else, including a non-positive
/// integer, is rejected.
pub fn parse_duration(token: &str) -> AppResult<chrono::Duration> {
    let parsed = if let Some(minutes) = token.strip_suffix('m') {
        minutes.parse::<i64>().ok().map(chrono::Duration::minutes)
    } else if let Some(hours) = token.strip_suffix('h') {
        hours.parse::<i64>().ok().map(chrono::Duration::hours)
    } else {
        None
    };

    match parsed {
        Some(duration) if duration > chrono::Duration::zero() => Ok(duration),
        _ => Err(AppError::validation(format!(
            "Invalid rental duration '{token}'; expected forms like '10m' or '2h'"
        ))),
    }
}
