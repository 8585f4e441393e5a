//! Order ledger integration tests
//!
//! Covers order creation and validation, derived (non-snapshotted)
//! totals, the pending view, and the forward-only status graph.

use club_server::CurrentUser;
use club_server::db::DbService;
use club_server::db::repository::menu_item;
use club_server::orders::OrderLedger;
use club_server::utils::AppError;
use shared::models::{MenuItem, MenuItemCreate, OrderItemInput, OrderStatus, UserRole};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("club.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("Failed to initialize database");
    (dir, db.pool)
}

async fn client(pool: &SqlitePool, login: &str) -> CurrentUser {
    let email = format!("{login}@example.com");
    let user = club_server::db::repository::user::create(
        pool,
        login,
        &email,
        None,
        UserRole::Client,
        "not-a-real-hash",
    )
    .await
    .expect("Failed to create user");
    CurrentUser {
        id: user.id,
        login: user.login,
        role: user.role,
    }
}

async fn add_item(pool: &SqlitePool, name: &str, price: f64) -> MenuItem {
    menu_item::create(
        pool,
        MenuItemCreate {
            name: name.to_string(),
            price,
        },
    )
    .await
    .expect("Failed to create menu item")
}

fn line(item: &MenuItem, quantity: i64) -> OrderItemInput {
    OrderItemInput {
        item_id: item.id,
        quantity,
    }
}

#[tokio::test]
async fn total_is_price_times_quantity_over_lines() {
    let (_dir, pool) = test_pool().await;
    let ledger = OrderLedger::new(pool.clone());
    let user = client(&pool, "alice").await;
    let coffee = add_item(&pool, "Cappuccino", 400.0).await;
    let tea = add_item(&pool, "Tea", 200.0).await;

    let order = ledger
        .create_order(&user, &[line(&coffee, 2), line(&tea, 1)])
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Paid);

    let orders = ledger.list_for(&user).await.unwrap();
    assert_eq!(orders.len(), 1);
    let detail = &orders[0];
    assert_eq!(detail.id, order.id);
    assert_eq!(detail.total_price, 1000.0);
    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.items[0].name, "Cappuccino");
    assert_eq!(detail.items[0].quantity, 2);
    assert_eq!(detail.items[1].name, "Tea");
    assert_eq!(detail.items[1].price, 200.0);
}

#[tokio::test]
async fn invalid_line_items_are_rejected_before_persisting() {
    let (_dir, pool) = test_pool().await;
    let ledger = OrderLedger::new(pool.clone());
    let user = client(&pool, "alice").await;
    let tea = add_item(&pool, "Tea", 200.0).await;

    // Empty order
    let err = ledger.create_order(&user, &[]).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Non-positive quantities
    for qty in [0, -3] {
        let err = ledger
            .create_order(&user, &[line(&tea, qty)])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "quantity {qty}");
    }

    // Unknown menu item
    let err = ledger
        .create_order(
            &user,
            &[OrderItemInput {
                item_id: 12345,
                quantity: 1,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // A bad line anywhere poisons the whole order
    let err = ledger
        .create_order(&user, &[line(&tea, 1), line(&tea, 0)])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert!(ledger.list_for(&user).await.unwrap().is_empty());
}

#[tokio::test]
async fn soft_deleted_items_block_new_orders_but_keep_history() {
    let (_dir, pool) = test_pool().await;
    let ledger = OrderLedger::new(pool.clone());
    let user = client(&pool, "alice").await;
    let sandwich = add_item(&pool, "Sandwich", 300.0).await;

    ledger
        .create_order(&user, &[line(&sandwich, 1)])
        .await
        .unwrap();

    menu_item::delete(&pool, sandwich.id).await.unwrap();

    // Hidden from the menu and from new orders
    assert!(menu_item::find_all(&pool).await.unwrap().is_empty());
    let err = ledger
        .create_order(&user, &[line(&sandwich, 1)])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // The old order still resolves name and price
    let orders = ledger.list_for(&user).await.unwrap();
    assert_eq!(orders[0].items[0].name, "Sandwich");
    assert_eq!(orders[0].total_price, 300.0);
}

#[tokio::test]
async fn pending_lists_everything_except_delivered() {
    let (_dir, pool) = test_pool().await;
    let ledger = OrderLedger::new(pool.clone());
    let alice = client(&pool, "alice").await;
    let bob = client(&pool, "bob").await;
    let tea = add_item(&pool, "Tea", 200.0).await;

    let first = ledger.create_order(&alice, &[line(&tea, 1)]).await.unwrap();
    let second = ledger.create_order(&bob, &[line(&tea, 2)]).await.unwrap();

    // Both in flight: pending spans all clients
    let pending = ledger.list_pending().await.unwrap();
    assert_eq!(pending.len(), 2);

    ledger
        .update_status(first.id, OrderStatus::Delivered)
        .await
        .unwrap();

    let pending = ledger.list_pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, second.id);
}

#[tokio::test]
async fn status_moves_forward_only() {
    let (_dir, pool) = test_pool().await;
    let ledger = OrderLedger::new(pool.clone());
    let user = client(&pool, "alice").await;
    let tea = add_item(&pool, "Tea", 200.0).await;
    let order = ledger.create_order(&user, &[line(&tea, 1)]).await.unwrap();

    // Self-transition is not a transition
    let err = ledger
        .update_status(order.id, OrderStatus::Paid)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    // Walk the full chain
    for status in [
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ] {
        let (id, new_status) = ledger.update_status(order.id, status).await.unwrap();
        assert_eq!(id, order.id);
        assert_eq!(new_status, status);
    }

    // Terminal: every move out of delivered is rejected and changes nothing
    for status in [
        OrderStatus::Paid,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ] {
        let err = ledger.update_status(order.id, status).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }
    let detail = &ledger.list_for(&user).await.unwrap()[0];
    assert_eq!(detail.status, OrderStatus::Delivered);
}

#[tokio::test]
async fn skipping_intermediate_statuses_is_allowed() {
    let (_dir, pool) = test_pool().await;
    let ledger = OrderLedger::new(pool.clone());
    let user = client(&pool, "alice").await;
    let tea = add_item(&pool, "Tea", 200.0).await;

    let order = ledger.create_order(&user, &[line(&tea, 1)]).await.unwrap();
    ledger
        .update_status(order.id, OrderStatus::Delivered)
        .await
        .unwrap();

    let order = ledger.create_order(&user, &[line(&tea, 1)]).await.unwrap();
    ledger
        .update_status(order.id, OrderStatus::Ready)
        .await
        .unwrap();
    let err = ledger
        .update_status(order.id, OrderStatus::Preparing)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let (_dir, pool) = test_pool().await;
    let ledger = OrderLedger::new(pool.clone());

    let err = ledger
        .update_status(424242, OrderStatus::Ready)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn totals_follow_the_current_menu_price() {
    // Totals are derived at read time, not snapshotted at order time: a
    // price change rewrites history. Deliberate (if debatable) behavior,
    // pinned down here so it cannot drift silently.
    let (_dir, pool) = test_pool().await;
    let ledger = OrderLedger::new(pool.clone());
    let user = client(&pool, "alice").await;
    let tea = add_item(&pool, "Tea", 200.0).await;

    let order = ledger.create_order(&user, &[line(&tea, 2)]).await.unwrap();
    assert_eq!(ledger.list_for(&user).await.unwrap()[0].total_price, 400.0);

    menu_item::update_price(&pool, tea.id, 250.0).await.unwrap();

    let detail = &ledger.list_for(&user).await.unwrap()[0];
    assert_eq!(detail.id, order.id);
    assert_eq!(detail.total_price, 500.0);
}
