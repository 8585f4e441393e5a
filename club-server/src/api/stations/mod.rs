//! Station API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/available", get(handler::list_available))
        .route("/available_or_mine", get(handler::list_available_or_mine))
        .route("/rent", post(handler::rent))
        .route("/{id}/configuration", put(handler::update_configuration))
        .route("/{id}", delete(handler::retire))
}
