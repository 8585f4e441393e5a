//! Order ledger
//!
//! Owns cafe orders and their line items and enforces the forward-only
//! status graph. Totals are derived from the menu's current prices at
//! read time rather than captured at order creation.

use shared::models::{Order, OrderDetail, OrderItemInput, OrderStatus};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{menu_item, order};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct OrderLedger {
    pool: SqlitePool,
}

impl OrderLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an order in the `paid` state.
    ///
    /// Rejects an empty item list, non-positive quantities, and
    /// references to missing or soft-deleted menu items before anything
    /// is persisted; the rows then land in one transaction.
    pub async fn create_order(
        &self,
        user: &CurrentUser,
        items: &[OrderItemInput],
    ) -> AppResult<Order> {
        if items.is_empty() {
            return Err(AppError::validation(
                "Order must contain at least one item",
            ));
        }
        for item in items {
            if item.quantity <= 0 {
                return Err(AppError::validation(format!(
                    "Quantity for menu item {} must be a positive integer",
                    item.item_id
                )));
            }
            if menu_item::find_active_by_id(&self.pool, item.item_id)
                .await?
                .is_none()
            {
                return Err(AppError::validation(format!(
                    "Menu item {} is not on the menu",
                    item.item_id
                )));
            }
        }

        let created = order::create(&self.pool, user.id, items).await?;
        tracing::info!(
            order_id = created.id,
            user_id = user.id,
            lines = items.len(),
            "Order created"
        );
        Ok(created)
    }

    /// The caller's own orders, with line details and derived totals
    pub async fn list_for(&self, user: &CurrentUser) -> AppResult<Vec<OrderDetail>> {
        let orders = order::find_by_user(&self.pool, user.id).await?;
        self.with_details(orders).await
    }

    /// Every order not yet delivered, for the staff fulfillment view
    pub async fn list_pending(&self) -> AppResult<Vec<OrderDetail>> {
        let orders = order::find_pending(&self.pool).await?;
        self.with_details(orders).await
    }

    /// Move an order along the status graph.
    ///
    /// Validates the transition against the order's current status, then
    /// commits it with a compare-and-set on that status so a concurrent
    /// transition cannot be silently overwritten.
    pub async fn update_status(
        &self,
        order_id: i64,
        new_status: OrderStatus,
    ) -> AppResult<(i64, OrderStatus)> {
        let current = order::find_by_id(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        if !current.status.can_transition_to(new_status) {
            return Err(AppError::invalid_state(format!(
                "Order {order_id} cannot move from '{}' to '{}'",
                current.status.as_str(),
                new_status.as_str()
            )));
        }

        order::set_status(&self.pool, order_id, current.status, new_status).await?;

        tracing::info!(
            order_id,
            from = current.status.as_str(),
            to = new_status.as_str(),
            "Order status updated"
        );
        Ok((order_id, new_status))
    }

    async fn with_details(&self, orders: Vec<Order>) -> AppResult<Vec<OrderDetail>> {
        let mut detailed = Vec::with_capacity(orders.len());
        for o in orders {
            let items = order::load_item_details(&self.pool, o.id).await?;
            let total_price = OrderDetail::total_of(&items);
            detailed.push(OrderDetail {
                id: o.id,
                user_id: o.user_id,
                status: o.status,
                items,
                total_price,
            });
        }
        Ok(detailed)
    }
}
