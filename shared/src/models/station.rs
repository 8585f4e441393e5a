//! Station Model

use serde::{Deserialize, Serialize};

/// Lifecycle status of a rentable station.
///
/// Persisted as a lowercase string at the storage boundary; `Rented`
/// always travels together with a non-null `rental_end_time` on the
/// owning row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum StationStatus {
    Available,
    Rented,
    OutOfOrder,
}

impl StationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StationStatus::Available => "available",
            StationStatus::Rented => "rented",
            StationStatus::OutOfOrder => "out_of_order",
        }
    }
}

/// Station entity (rentable computer seat)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Station {
    pub id: i64,
    pub name: String,
    /// Free-text hardware descriptor shown to clients
    pub configuration: String,
    pub status: StationStatus,
    /// Unix millis; set exactly while `status == Rented`
    pub rental_end_time: Option<i64>,
    pub is_active: bool,
}

/// Create station payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationCreate {
    pub name: String,
    pub configuration: String,
}

/// Update configuration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfigUpdate {
    pub configuration: String,
}
