//! Menu API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use shared::models::{MenuItem, MenuItemCreate, MenuItemPriceUpdate};

use crate::auth::{CurrentUser, Operation, policy};
use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::utils::AppResult;

/// GET /api/menu - current menu
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = menu_item::find_all(&state.db).await?;
    Ok(Json(items))
}

/// POST /api/menu - add an item
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    policy::require(&user, Operation::ManageMenu)?;
    let created = menu_item::create(&state.db, payload).await?;
    Ok(Json(created))
}

/// PUT /api/menu/:id/price - change the current price
pub async fn update_price(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemPriceUpdate>,
) -> AppResult<Json<MenuItem>> {
    policy::require(&user, Operation::ManageMenu)?;
    let updated = menu_item::update_price(&state.db, id, payload.price).await?;
    Ok(Json(updated))
}

/// DELETE /api/menu/:id - hide an item from the menu
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    policy::require(&user, Operation::ManageMenu)?;
    let result = menu_item::delete(&state.db, id).await?;
    Ok(Json(result))
}
