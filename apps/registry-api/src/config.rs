use std::net::Ipv4Addr;

use database::MongoConfig;

/// Server configuration for the HTTP API
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reads from environment variables with sensible defaults:
    /// - HOST: defaults to 0.0.0.0 (all interfaces)
    /// - PORT: defaults to 8080
    pub fn from_env() -> eyre::Result<Self> {
        let host =
            std::env::var("HOST").unwrap_or_else(|_| Ipv4Addr::UNSPECIFIED.to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|e| eyre::eyre!("Failed to parse PORT: {}", e))?;

        Ok(Self { host, port })
    }
}

/// Application configuration, composed from environment variables at startup
/// and never mutated afterwards
#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self { mongodb, server })
    }
}
