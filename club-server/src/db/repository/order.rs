//! Order Repository

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderItemDetail, OrderItemInput, OrderStatus};
use sqlx::SqlitePool;

const ORDER_SELECT: &str = "SELECT id, user_id, status FROM cafe_order";

/// Insert the order row and its line items in one transaction.
///
/// Line items are assumed validated by the caller; nothing is persisted
/// if any insert fails.
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    items: &[OrderItemInput],
) -> RepoResult<Order> {
    let mut tx = pool.begin().await?;

    let order_id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO cafe_order (id, user_id, status) VALUES (?1, ?2, ?3)")
        .bind(order_id)
        .bind(user_id)
        .bind(OrderStatus::Paid)
        .execute(&mut *tx)
        .await?;

    let now = shared::util::now_millis();
    for item in items {
        sqlx::query(
            "INSERT INTO order_item (id, order_id, item_id, quantity, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(shared::util::snowflake_id())
        .bind(order_id)
        .bind(item.item_id)
        .bind(item.quantity)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(Order {
        id: order_id,
        user_id,
        status: OrderStatus::Paid,
    })
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE user_id = ? ORDER BY id");
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(orders)
}

/// All orders still in flight (status ≠ delivered)
pub async fn find_pending(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE status <> 'delivered' ORDER BY id");
    let orders = sqlx::query_as::<_, Order>(&sql).fetch_all(pool).await?;
    Ok(orders)
}

/// Line details joined with the menu's *current* row.
///
/// The join deliberately ignores `menu_item.is_active`: lines of past
/// orders must keep resolving after the item leaves the menu.
pub async fn load_item_details(
    pool: &SqlitePool,
    order_id: i64,
) -> RepoResult<Vec<OrderItemDetail>> {
    let details = sqlx::query_as::<_, OrderItemDetail>(
        "SELECT oi.item_id, m.name, m.price, oi.quantity \
         FROM order_item oi JOIN menu_item m ON m.id = oi.item_id \
         WHERE oi.order_id = ? ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(details)
}

/// Compare-and-set the order status.
///
/// Guarded on the expected previous status, so two staff racing on the
/// same order cannot both win; the loser observes `InvalidState`.
pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE cafe_order SET status = ?1 WHERE id = ?2 AND status = ?3")
        .bind(to)
        .bind(id)
        .bind(from)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::InvalidState(format!(
            "Order {id} is no longer '{}'",
            from.as_str()
        )));
    }
    Ok(())
}
