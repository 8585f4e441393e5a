//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate};
use sqlx::SqlitePool;

const MENU_SELECT: &str = "SELECT id, name, price, is_active FROM menu_item";

/// All items currently on the menu
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_SELECT} WHERE is_active = 1 ORDER BY name");
    let items = sqlx::query_as::<_, MenuItem>(&sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{MENU_SELECT} WHERE id = ?");
    let item = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

/// An item that may still be ordered (exists and not soft-deleted)
pub async fn find_active_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{MENU_SELECT} WHERE id = ? AND is_active = 1");
    let item = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{MENU_SELECT} WHERE name = ? LIMIT 1");
    let item = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Menu item '{}' already exists",
            data.name
        )));
    }

    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO menu_item (id, name, price, is_active) VALUES (?1, ?2, ?3, 1)")
        .bind(id)
        .bind(&data.name)
        .bind(data.price)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

/// Change the current price; past order lines pick it up at read time
pub async fn update_price(pool: &SqlitePool, id: i64, price: f64) -> RepoResult<MenuItem> {
    let rows = sqlx::query("UPDATE menu_item SET price = ?1 WHERE id = ?2")
        .bind(price)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Hide an item from the menu; historical order lines keep referencing it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE menu_item SET is_active = 0 WHERE id = ? AND is_active = 1")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    Ok(true)
}
