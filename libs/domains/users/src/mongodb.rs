//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_bson},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{UpdateUser, User};
use crate::repository::UserRepository;

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository over the "users" collection
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<User>("users");
        Self { collection }
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }

    /// Create the unique indexes on account and email.
    ///
    /// Called once at startup; duplicate inserts and updates then surface as
    /// distinguishable duplicate-key errors (code 11000) instead of silently
    /// succeeding.
    pub async fn ensure_indexes(&self) -> UserResult<()> {
        let unique = || IndexOptions::builder().unique(true).build();
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "account": 1 })
                .options(unique())
                .build(),
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique())
                .build(),
        ];
        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }

    /// Build the $set document from the fields present in the patch
    fn build_changes(changes: &UpdateUser) -> Document {
        let mut set = doc! {};
        if let Some(ref account) = changes.account {
            set.insert("account", account);
        }
        if let Some(ref password) = changes.password {
            set.insert("password", password);
        }
        if let Some(ref email) = changes.email {
            set.insert("email", email);
        }
        if let Some(age) = changes.age {
            set.insert("age", age);
        }
        set
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(account = %user.account))]
    async fn insert(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await?;

        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find(&self, filter: Document) -> UserResult<Vec<User>> {
        let cursor = self.collection.find(filter).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: Uuid, changes: UpdateUser) -> UserResult<Option<User>> {
        let filter = Self::id_filter(id);
        let set = Self::build_changes(&changes);

        // An empty $set is rejected by the server; an empty patch is a no-op
        // read of the current record.
        if set.is_empty() {
            return Ok(self.collection.find_one(filter).await?);
        }

        let updated = self
            .collection
            .find_one_and_update(filter, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(user_id = %id, "user updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> UserResult<Option<User>> {
        let deleted = self
            .collection
            .find_one_and_delete(Self::id_filter(id))
            .await?;

        if deleted.is_some() {
            tracing::info!(user_id = %id, "user deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_changes_empty_patch() {
        let set = MongoUserRepository::build_changes(&UpdateUser::default());
        assert!(set.is_empty());
    }

    #[test]
    fn test_build_changes_only_present_fields() {
        let patch = UpdateUser {
            age: Some(30),
            email: Some("new@b.com".to_string()),
            ..Default::default()
        };
        let set = MongoUserRepository::build_changes(&patch);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_i32("age").unwrap(), 30);
        assert_eq!(set.get_str("email").unwrap(), "new@b.com");
        assert!(!set.contains_key("account"));
        assert!(!set.contains_key("password"));
    }

    #[test]
    fn test_id_filter_targets_primary_key() {
        let id = Uuid::now_v7();
        let filter = MongoUserRepository::id_filter(id);
        assert!(filter.contains_key("_id"));
        assert_eq!(filter.len(), 1);
    }
}
