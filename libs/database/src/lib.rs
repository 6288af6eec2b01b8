//! Database library providing the MongoDB connector used by the registry.
//!
//! The connector exposes configuration loading from the environment and
//! connection helpers that verify the connection with a lightweight ping
//! before handing the client back.

pub mod mongodb;

pub use mongodb::{ConfigError, MongoConfig, MongoError, connect, connect_from_config};
