//! Rental Log Model

use serde::{Deserialize, Serialize};

/// Immutable record of one station lease.
///
/// Appended when a rental starts and never updated afterwards; the sweep
/// only touches the station row, so this table is the full history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RentalLog {
    pub id: i64,
    pub station_id: i64,
    pub user_id: i64,
    /// Unix millis
    pub start_time: i64,
    /// Unix millis; computed at creation as start + duration
    pub end_time: i64,
}
