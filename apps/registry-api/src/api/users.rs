//! Users API routes
//!
//! This module wires up the users domain to HTTP routes.

use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};

use crate::state::AppState;

/// Create the users router at the root path
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(state.db.clone());
    let service = UserService::new(repository);

    handlers::router(service)
}
