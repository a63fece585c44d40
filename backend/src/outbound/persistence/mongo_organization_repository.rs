//! MongoDB-backed [`OrganizationRepository`] adapter.
//!
//! The member mutations are single conditional updates, so the
//! check-then-write sequence in the engine cannot produce a duplicate entry
//! even when two writers race: the loser's update matches no document and is
//! reported back as not applied.

use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use pagination::{Page, PageRequest};

use crate::domain::ports::{OrganizationPersistenceError, OrganizationRepository};
use crate::domain::{AccessLevel, EntityId, MemberPermission, Organization};

use super::documents::OrganizationDocument;
use super::mongo_helpers::{is_connection_failure, is_duplicate_key, name_filter_document};
use super::store::DocumentStore;

/// Organization repository over the shared store handle.
#[derive(Clone)]
pub struct MongoOrganizationRepository {
    store: DocumentStore,
}

impl MongoOrganizationRepository {
    /// Create a repository over the given store handle.
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }
}

fn map_error(error: mongodb::error::Error) -> OrganizationPersistenceError {
    if is_duplicate_key(&error) {
        return OrganizationPersistenceError::DuplicateName;
    }
    if is_connection_failure(&error) {
        return OrganizationPersistenceError::connection(error.to_string());
    }
    OrganizationPersistenceError::query(error.to_string())
}

fn from_document(
    document: OrganizationDocument,
) -> Result<Organization, OrganizationPersistenceError> {
    Organization::try_from(document)
        .map_err(|err| OrganizationPersistenceError::query(err.to_string()))
}

#[async_trait]
impl OrganizationRepository for MongoOrganizationRepository {
    async fn insert(
        &self,
        organization: &Organization,
    ) -> Result<(), OrganizationPersistenceError> {
        self.store
            .organizations()
            .insert_one(OrganizationDocument::from(organization))
            .await
            .map_err(map_error)?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &EntityId,
    ) -> Result<Option<Organization>, OrganizationPersistenceError> {
        self.store
            .organizations()
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(map_error)?
            .map(from_document)
            .transpose()
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Organization>, OrganizationPersistenceError> {
        self.store
            .organizations()
            .find_one(doc! { "name": name })
            .await
            .map_err(map_error)?
            .map(from_document)
            .transpose()
    }

    async fn list(
        &self,
        name_filter: Option<String>,
        page: PageRequest,
    ) -> Result<Page<Organization>, OrganizationPersistenceError> {
        let filter = name_filter_document(name_filter);
        let organizations = self.store.organizations();

        let total_count = organizations
            .count_documents(filter.clone())
            .await
            .map_err(map_error)?;
        let documents: Vec<OrganizationDocument> = organizations
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

    async fn insert_member(
        &self,
        organization_id: &EntityId,
        member: &MemberPermission,
    ) -> Result<bool, OrganizationPersistenceError> {
        // The `$ne` guard makes check-then-append atomic: the update matches
        // only while no entry exists for this user.
        let result = self
            .store
            .organizations()
            .update_one(
                doc! {
                    "_id": organization_id.as_object_id(),
                    "members.user_id": { "$ne": member.user_id().as_object_id() },
                },
                doc! {
                    "$push": {
                        "members": {
                            "user_id": member.user_id().as_object_id(),
                            "access_level": member.access_level().as_str(),
                        },
                    },
                },
            )
            .await
            .map_err(map_error)?;
        Ok(result.matched_count == 1)
    }

    async fn set_member_access(
        &self,
        organization_id: &EntityId,
        user_id: &EntityId,
        access_level: AccessLevel,
    ) -> Result<bool, OrganizationPersistenceError> {
        let result = self
            .store
            .organizations()
            .update_one(
                doc! {
                    "_id": organization_id.as_object_id(),
                    "members.user_id": user_id.as_object_id(),
                },
                doc! { "$set": { "members.$.access_level": access_level.as_str() } },
            )
            .await
            .map_err(map_error)?;
        Ok(result.matched_count == 1)
    }

    async fn remove_member(
        &self,
        organization_id: &EntityId,
        user_id: &EntityId,
    ) -> Result<bool, OrganizationPersistenceError> {
        let result = self
            .store
            .organizations()
            .update_one(
                doc! { "_id": organization_id.as_object_id() },
                doc! { "$pull": { "members": { "user_id": user_id.as_object_id() } } },
            )
            .await
            .map_err(map_error)?;
        // `$pull` matches the document whether or not an entry came out;
        // only a modification proves the member existed.
        Ok(result.modified_count == 1)
    }
}
