//! Staff management API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/staff", get(handler::list_staff).post(handler::register_staff))
        .route("/{id}", delete(handler::delete_staff))
        .route("/{id}/password", put(handler::change_password))
}
