//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity.
///
/// Soft-deleted items disappear from the menu and from new orders but
/// stay referenced by historical order lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub is_active: bool,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub price: f64,
}

/// Price update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemPriceUpdate {
    pub price: f64,
}
