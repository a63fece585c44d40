//! MongoDB-backed [`UserRepository`] adapter.

use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use pagination::{Page, PageRequest};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EntityId, User};

use super::documents::UserDocument;
use super::mongo_helpers::{is_connection_failure, is_duplicate_key, name_filter_document};
use super::store::DocumentStore;

/// User repository over the shared store handle.
#[derive(Clone)]
pub struct MongoUserRepository {
    store: DocumentStore,
}

impl MongoUserRepository {
    /// Create a repository over the given store handle.
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }
}

fn map_error(error: mongodb::error::Error) -> UserPersistenceError {
    if is_duplicate_key(&error) {
        return UserPersistenceError::DuplicateEmail;
    }
    if is_connection_failure(&error) {
        return UserPersistenceError::connection(error.to_string());
    }
    UserPersistenceError::query(error.to_string())
}

fn from_document(document: UserDocument) -> Result<User, UserPersistenceError> {
    User::try_from(document).map_err(|err| UserPersistenceError::query(err.to_string()))
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.store
            .users()
            .insert_one(UserDocument::from(user))
            .await
            .map_err(map_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<User>, UserPersistenceError> {
        self.store
            .users()
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(map_error)?
            .map(from_document)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        self.store
            .users()
            .find_one(doc! { "email": email })
            .await
            .map_err(map_error)?
            .map(from_document)
            .transpose()
    }

    async fn list(
        &self,
        name_filter: Option<String>,
        page: PageRequest,
    ) -> Result<Page<User>, UserPersistenceError> {
        let filter = name_filter_document(name_filter);
        let users = self.store.users();

        // Count, then fetch: two round-trips, so the count can be stale
        // relative to the window under concurrent writes.
        let total_count = users
            .count_documents(filter.clone())
            .await
            .map_err(map_error)?;
        let documents: Vec<UserDocument> = users
            .find(filter)
            .sort(doc! { "_id": 1 })
            .skip(page.offset())
            .limit(i64::from(page.limit()))
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;

        let items = documents
            .into_iter()
            .map(from_document)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(total_count, items))
    }

    async fn add_organization(
        &self,
        user_id: &EntityId,
        organization_id: &EntityId,
    ) -> Result<(), UserPersistenceError> {
        self.store
            .users()
            .update_one(
                doc! { "_id": user_id.as_object_id() },
                doc! { "$addToSet": { "organizations": organization_id.as_object_id() } },
            )
            .await
            .map_err(map_error)?;
        Ok(())
    }

    async fn remove_organization(
        &self,
        user_id: &EntityId,
        organization_id: &EntityId,
    ) -> Result<(), UserPersistenceError> {
        self.store
            .users()
            .update_one(
                doc! { "_id": user_id.as_object_id() },
                doc! { "$pull": { "organizations": organization_id.as_object_id() } },
            )
            .await
            .map_err(map_error)?;
        Ok(())
    }
}
