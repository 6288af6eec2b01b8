use async_trait::async_trait;
use mongodb::bson::Document;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{UpdateUser, User};

/// Repository trait for User persistence
///
/// Defines the data-access interface for user records. The list filter is an
/// opaque document produced by the query builder; uniqueness of account and
/// email is enforced by the store's indexes, not by implementations of this
/// trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record
    async fn insert(&self, user: User) -> UserResult<User>;

    /// Find records matching a filter
    async fn find(&self, filter: Document) -> UserResult<Vec<User>>;

    /// Apply a partial update, returning the updated record or None when the
    /// identifier does not resolve
    async fn update(&self, id: Uuid, changes: UpdateUser) -> UserResult<Option<User>>;

    /// Delete a record, returning it, or None when the identifier does not
    /// resolve
    async fn delete(&self, id: Uuid) -> UserResult<Option<User>>;
}
