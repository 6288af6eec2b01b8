/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Failed to parse {key}: {details}")]
    ParseError { key: String, details: String },
}

/// MongoDB database configuration
///
/// Holds MongoDB connection settings. Can be constructed manually or loaded
/// from environment variables with [`MongoConfig::from_env`].
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// MongoDB connection URL (required)
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a MongoConfig with a URL and database name, default pool settings
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Get a reference to the MongoDB URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the database name
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Load MongoConfig from environment variables
    ///
    /// Environment variables:
    /// - `MONGODB_URL` or `MONGO_URL` (required) - MongoDB connection string
    /// - `MONGODB_DATABASE` or `MONGO_DATABASE` (required) - Database name
    /// - `MONGODB_APP_NAME` (optional) - Application name for server logs
    /// - `MONGODB_MAX_POOL_SIZE` (optional, default: 100)
    /// - `MONGODB_MIN_POOL_SIZE` (optional, default: 5)
    /// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default: 10)
    /// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .map_err(|_| ConfigError::MissingEnvVar("MONGODB_URL or MONGO_URL".to_string()))?;

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .map_err(|_| {
                ConfigError::MissingEnvVar("MONGODB_DATABASE or MONGO_DATABASE".to_string())
            })?;

        let app_name = std::env::var("MONGODB_APP_NAME").ok();

        Ok(Self {
            url,
            database,
            app_name,
            max_pool_size: env_or_parse("MONGODB_MAX_POOL_SIZE", 100)?,
            min_pool_size: env_or_parse("MONGODB_MIN_POOL_SIZE", 5)?,
            connect_timeout_secs: env_or_parse("MONGODB_CONNECT_TIMEOUT_SECS", 10)?,
            server_selection_timeout_secs: env_or_parse(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                30,
            )?,
        })
    }
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{}", e),
        }),
        Err(_) => Ok(default),
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::with_database("mongodb://localhost:27017", "default")
    }
}
