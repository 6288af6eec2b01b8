//! Application state management.
//!
//! Shared state handed to the route constructors. Cloning is cheap: the
//! MongoDB client shares its underlying connection pool.

use mongodb::{Client, Database};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
}
