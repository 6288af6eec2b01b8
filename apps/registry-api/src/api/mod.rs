//! API routes module
//!
//! Wires the users domain router at the root path, per the service's wire
//! contract (POST /, GET /, PATCH /:id, DELETE /:id), plus a health route.

pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(users::router(state))
        .merge(health::router())
}
