//! Station API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use shared::client::{RentRequest, RentReceipt};
use shared::models::{Station, StationConfigUpdate, StationCreate};

use crate::auth::{CurrentUser, Operation, policy};
use crate::core::ServerState;
use crate::db::repository::station;
use crate::rentals::RentalService;
use crate::utils::AppResult;

/// GET /api/stations - all active stations
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Station>>> {
    let stations = station::find_all(&state.db).await?;
    Ok(Json(stations))
}

/// GET /api/stations/available - stations free to rent
pub async fn list_available(State(state): State<ServerState>) -> AppResult<Json<Vec<Station>>> {
    let stations = station::find_available(&state.db).await?;
    Ok(Json(stations))
}

/// GET /api/stations/available_or_mine - the caller's rented station, or
/// the free pool when they hold no lease
pub async fn list_available_or_mine(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Station>>> {
    policy::require(&user, Operation::ListAvailableOrMine)?;
    let service = RentalService::new(state.get_db());
    let stations = service.list_available_or_mine(&user).await?;
    Ok(Json(stations))
}

/// POST /api/stations/rent - start a lease
pub async fn rent(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<RentRequest>,
) -> AppResult<Json<RentReceipt>> {
    policy::require(&user, Operation::RentStation)?;
    let service = RentalService::new(state.get_db());
    let log = service
        .start_rental(payload.station_id, &user, &payload.duration)
        .await?;
    Ok(Json(RentReceipt {
        station_id: log.station_id,
        rental_end_time: log.end_time,
    }))
}

/// POST /api/stations - add a station
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<StationCreate>,
) -> AppResult<Json<Station>> {
    policy::require(&user, Operation::CreateStation)?;
    let created = station::create(&state.db, payload).await?;
    Ok(Json(created))
}

/// PUT /api/stations/:id/configuration - update the hardware descriptor
pub async fn update_configuration(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<StationConfigUpdate>,
) -> AppResult<Json<Station>> {
    policy::require(&user, Operation::UpdateStationConfig)?;
    let updated = station::update_configuration(&state.db, id, &payload.configuration).await?;
    Ok(Json(updated))
}

/// DELETE /api/stations/:id - retire a station (soft delete)
pub async fn retire(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    policy::require(&user, Operation::RetireStation)?;
    let result = station::retire(&state.db, id).await?;
    Ok(Json(result))
}
