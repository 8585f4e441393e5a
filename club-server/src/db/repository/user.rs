//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{User, UserRole};
use sqlx::SqlitePool;

const USER_SELECT: &str = "SELECT id, login, email, phone, role, password_hash FROM user";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Lookup for login: matches either the login name or the e-mail
pub async fn find_by_login_or_email(pool: &SqlitePool, value: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE login = ?1 OR email = ?1 LIMIT 1");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(value)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Whether any account already uses this login, e-mail, or phone
pub async fn identity_taken(
    pool: &SqlitePool,
    login: &str,
    email: &str,
    phone: &str,
) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM user WHERE login = ?1 OR email = ?2 OR phone = ?3",
    )
    .bind(login)
    .bind(email)
    .bind(phone)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create(
    pool: &SqlitePool,
    login: &str,
    email: &str,
    phone: Option<&str>,
    role: UserRole,
    password_hash: &str,
) -> RepoResult<User> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO user (id, login, email, phone, role, password_hash) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(login)
    .bind(email)
    .bind(phone)
    .bind(role)
    .bind(password_hash)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// All staff accounts
pub async fn find_staff(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let sql = format!("{USER_SELECT} WHERE role = 'staff' ORDER BY login");
    let users = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;
    Ok(users)
}

/// Remove a staff account; client accounts are not deletable this way
pub async fn delete_staff(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM user WHERE id = ? AND role = 'staff'")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Staff member {id} not found")));
    }
    Ok(true)
}

pub async fn update_password(pool: &SqlitePool, id: i64, password_hash: &str) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE user SET password_hash = ?1 WHERE id = ?2")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}
