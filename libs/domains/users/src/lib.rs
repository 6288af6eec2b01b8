//! Users Domain
//!
//! Account-registry domain: record validation and password normalization,
//! range-query construction, and CRUD over a MongoDB-backed repository.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelope
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← validation & normalization, query building
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entity, DTOs, envelope
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{MongoUserRepository, UserService, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("registry");
//!
//! let repository = MongoUserRepository::new(db);
//! repository.ensure_indexes().await?;
//! let service = UserService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod service;
pub mod validate;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{CreateUser, Envelope, PublicUser, UpdateUser, User};
pub use mongodb::MongoUserRepository;
pub use query::{ListQuery, build_filter};
pub use repository::UserRepository;
pub use service::UserService;
pub use validate::ValidationFailure;
