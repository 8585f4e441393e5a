//! First-run seed data
//!
//! Mirrors what a fresh club installation needs to be usable: one staff
//! account, a few stations, and a minimal menu. Each block only runs when
//! its table is empty, so restarts never duplicate rows.

use crate::auth::password;
use crate::db::repository::{menu_item, station, user};
use crate::utils::AppError;
use shared::models::{MenuItemCreate, StationCreate, UserRole};
use sqlx::SqlitePool;

const DEFAULT_STAFF_LOGIN: &str = "admin";
const DEFAULT_STAFF_PASSWORD: &str = "admin";

pub async fn seed_defaults(pool: &SqlitePool) -> Result<(), AppError> {
    seed_staff(pool).await?;
    seed_stations(pool).await?;
    seed_menu(pool).await?;
    Ok(())
}

async fn seed_staff(pool: &SqlitePool) -> Result<(), AppError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    if count > 0 {
        return Ok(());
    }

    let hash = password::hash(DEFAULT_STAFF_PASSWORD)
        .map_err(|e| AppError::internal(format!("Failed to hash seed password: {e}")))?;
    user::create(
        pool,
        DEFAULT_STAFF_LOGIN,
        "admin@example.com",
        Some("123456789"),
        UserRole::Staff,
        &hash,
    )
    .await?;

    tracing::warn!(
        login = DEFAULT_STAFF_LOGIN,
        "Seeded default staff account with default password; change it before going live"
    );
    Ok(())
}

async fn seed_stations(pool: &SqlitePool) -> Result<(), AppError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM station")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    if count > 0 {
        return Ok(());
    }

    let stations = [
        ("PC1", "Core i7-10700F, 32GB DDR4, 1TB + 512GB SSD, RTX 3060 12GB, 700W"),
        ("PC2", "Core i5-12400F, 16GB DDR4, 1TB NVMe SSD, RTX 4060 Ti"),
        ("PC3", "Core i7-14700, 32GB DDR5, 2x1TB SSD, RTX 4080 16GB, 850W"),
    ];
    for (name, configuration) in stations {
        station::create(
            pool,
            StationCreate {
                name: name.to_string(),
                configuration: configuration.to_string(),
            },
        )
        .await?;
    }

    tracing::info!(count = stations.len(), "Seeded default stations");
    Ok(())
}

async fn seed_menu(pool: &SqlitePool) -> Result<(), AppError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_item")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    if count > 0 {
        return Ok(());
    }

    let items = [("Cappuccino", 400.0), ("Tea", 200.0), ("Sandwich", 300.0)];
    for (name, price) in items {
        menu_item::create(
            pool,
            MenuItemCreate {
                name: name.to_string(),
                price,
            },
        )
        .await?;
    }

    tracing::info!(count = items.len(), "Seeded default menu");
    Ok(())
}
