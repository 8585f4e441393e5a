//! Client-facing DTOs
//!
//! Request/response payloads shared between the server and its clients.

use serde::{Deserialize, Serialize};

use crate::models::OrderStatus;

/// Client self-registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub login: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Login payload; accepts either the login name or the e-mail address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login_or_email: String,
    pub password: String,
}

/// Public view of a user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub login: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Staff password change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

/// Station rental payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentRequest {
    pub station_id: i64,
    /// Compact duration token: `"<integer>m"` or `"<integer>h"`
    pub duration: String,
}

/// Confirmation returned after a successful rental
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentReceipt {
    pub station_id: i64,
    /// Unix millis at which the lease expires
    pub rental_end_time: i64,
}

/// Order status transition payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// Confirmation returned after a status transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateReceipt {
    pub order_id: i64,
    pub status: OrderStatus,
}
