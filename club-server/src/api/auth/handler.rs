//! Authentication Handlers
//!
//! Client self-registration, login, and the current-user endpoint.

use axum::{Extension, Json, extract::State};
use validator::ValidateEmail;

use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use shared::models::{User, UserRole};

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};

fn user_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id,
        login: user.login.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        role: user.role.as_str().to_string(),
    }
}

/// POST /api/auth/register - client self-registration
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<UserInfo>> {
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
        UserRole::Client,
        &hash,
    )
    .await?;

    tracing::info!(user_id = created.id, login = %created.login, "Client registered");
    Ok(Json(user_info(&created)))
}

/// POST /api/auth/login - authenticate and issue a token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let found = user::find_by_login_or_email(&state.db, &req.login_or_email).await?;

    // Unified failure path so a missing account and a wrong password are
    // indistinguishable to the caller.
    let account = match found {
        Some(u) => u,
        None => {
            tracing::warn!(login = %req.login_or_email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let password_valid = password::verify(&req.password, &account.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !password_valid {
        tracing::warn!(login = %account.login, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(account.id, &account.login, account.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        user_id = account.id,
        login = %account.login,
        role = account.role.as_str(),
        "User logged in"
    );

    Ok(Json(LoginResponse {
        token,
        user: user_info(&account),
    }))
}

/// GET /api/auth/me - fresh view of the authenticated account
pub async fn me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let account = user::find_by_id(&state.db, current.id)
        .await?
        .ok_or_else(|| AppError::not_found("Account no longer exists"))?;
    Ok(Json(user_info(&account)))
}
