//! Order API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use shared::client::{StatusUpdateReceipt, StatusUpdateRequest};
use shared::models::{Order, OrderCreate, OrderDetail};

use crate::auth::{CurrentUser, Operation, policy};
use crate::core::ServerState;
use crate::orders::OrderLedger;
use crate::utils::AppResult;

/// POST /api/orders - place an order
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    policy::require(&user, Operation::CreateOrder)?;
    let ledger = OrderLedger::new(state.get_db());
    let order = ledger.create_order(&user, &payload.items).await?;
    Ok(Json(order))
}

/// GET /api/orders - the caller's orders with joined details
pub async fn list_own(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    policy::require(&user, Operation::ListOwnOrders)?;
    let ledger = OrderLedger::new(state.get_db());
    let orders = ledger.list_for(&user).await?;
    Ok(Json(orders))
}

/// GET /api/orders/pending - all undelivered orders, for fulfillment
pub async fn list_pending(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    policy::require(&user, Operation::ListPendingOrders)?;
    let ledger = OrderLedger::new(state.get_db());
    let orders = ledger.list_pending().await?;
    Ok(Json(orders))
}

/// PUT /api/orders/:id/status - move an order along the status graph
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<StatusUpdateReceipt>> {
    policy::require(&user, Operation::UpdateOrderStatus)?;
    let ledger = OrderLedger::new(state.get_db());
    let (order_id, status) = ledger.update_status(id, payload.status).await?;
    Ok(Json(StatusUpdateReceipt { order_id, status }))
}
