//! User service - business logic layer
//!
//! Normalizes write payloads through the validation rules, builds the list
//! filter, and maps repository outcomes onto the error taxonomy. No state is
//! held beyond the repository handle; every operation is a single store call.

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::query::{ListQuery, build_filter};
use crate::repository::UserRepository;

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate, normalize, and persist a full candidate record
    #[instrument(skip(self, input), fields(account = %input.account))]
    pub async fn create(&self, input: CreateUser) -> UserResult<User> {
        let normalized = input.normalized()?;
        self.repository.insert(User::new(normalized)).await
    }

    /// List records matching the recognized query parameters
    #[instrument(skip(self))]
    pub async fn list(&self, query: ListQuery) -> UserResult<Vec<User>> {
        self.repository.find(build_filter(&query)).await
    }

    /// Validate and apply a partial update to an existing record
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        let normalized = input.normalized()?;
        self.repository
            .update(id, normalized)
            .await?
            .ok_or(UserError::NotFound)
    }

    /// Delete a record, returning its last persisted representation
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .delete(id)
            .await?
            .ok_or(UserError::NotFound)
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
