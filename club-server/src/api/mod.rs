//! HTTP API
//!
//! # Structure
//!
//! - [`auth`] - registration, login, current user
//! - [`stations`] - station pool and rentals
//! - [`menu`] - menu management
//! - [`orders`] - cafe orders
//! - [`users`] - staff account management
//! - [`health`] - health check
//!
//! Each module exposes a `router()` nested under `/api/...`; `build_app`
//! stacks CORS, tracing, and the JWT middleware on top.

pub mod auth;
pub mod health;
pub mod menu;
pub mod orders;
pub mod stations;
pub mod users;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(stations::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(users::router())
        .merge(health::router())
}

/// Build the fully configured application
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // CORS - handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // JWT authentication - injects CurrentUser before routes run
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
}
