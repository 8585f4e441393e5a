//! Staff Management Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use validator::ValidateEmail;

use shared::client::{ChangePasswordRequest, RegisterRequest, UserInfo};
use shared::models::UserRole;

use crate::auth::{CurrentUser, Operation, password, policy};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};

/// GET /api/users/staff - list staff accounts
pub async fn list_staff(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Vec<UserInfo>>> {
    policy::require(&current, Operation::ManageStaff)?;
    let staff = user::find_staff(&state.db).await?;
    let infos = staff
        .iter()
        .map(|u| UserInfo {
            id: u.id,
            login: u.login.clone(),
            email: u.email.clone(),
            phone: u.phone.clone(),
            role: u.role.as_str().to_string(),
        })
        .collect();
    Ok(Json(infos))
}

/// POST /api/users/staff - register a staff account
pub async fn register_staff(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<UserInfo>> {
    policy::require(&current, Operation::ManageStaff)?;

    if req.login.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Login and password are required"));
    }
    if !req.email.validate_email() {
        return Err(AppError::validation(format!(
            "'{}' is not a valid e-mail address",
            req.email
        )));
    }
    if user::identity_taken(&state.db, &req.login, &req.email, &req.phone).await? {
        return Err(AppError::conflict(
            "Login, e-mail, or phone is already registered",
        ));
    }

    let hash = password::hash(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    let created = user::create(
        &state.db,
        &req.login,
        &req.email,
        Some(&req.phone),
        UserRole::Staff,
        &hash,
    )
    .await?;

    tracing::info!(
        user_id = created.id,
        login = %created.login,
        by = %current.login,
        "Staff account registered"
    );
    Ok(Json(UserInfo {
        id: created.id,
        login: created.login.clone(),
        email: created.email.clone(),
        phone: created.phone.clone(),
        role: created.role.as_str().to_string(),
    }))
}

/// DELETE /api/users/:id - remove a staff account
pub async fn delete_staff(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    policy::require(&current, Operation::ManageStaff)?;
    if current.id == id {
        return Err(AppError::validation("You cannot delete your own account"));
    }

    let result = user::delete_staff(&state.db, id).await?;
    tracing::info!(staff_id = id, by = %current.login, "Staff account deleted");
    Ok(Json(result))
}

/// PUT /api/users/:id/password - change your own password
pub async fn change_password(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<bool>> {
    policy::require(&current, Operation::ManageStaff)?;
    if current.id != id {
        return Err(AppError::forbidden(
            "Password can only be changed for your own account",
        ));
    }
    if req.password.is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }

    let hash = password::hash(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    user::update_password(&state.db, id, &hash).await?;

    tracing::info!(user_id = id, "Password changed");
    Ok(Json(true))
}
