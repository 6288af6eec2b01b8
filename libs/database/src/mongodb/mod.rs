//! MongoDB database connector and utilities
//!
//! Provides connection management and MongoDB-specific configuration.

mod config;
mod connector;

pub use config::{ConfigError, MongoConfig};
pub use connector::{MongoError, connect, connect_from_config};
