//! Document store handle.
//!
//! The handle is constructed once by the composition root and passed into
//! the repository adapters; nothing in the codebase reasserts a connection
//! per request. The driver multiplexes a connection pool behind the handle,
//! so cloning is cheap and concurrent use is safe.

use bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

use super::documents::{OrganizationDocument, UserDocument};

const USERS_COLLECTION: &str = "users";
const ORGANIZATIONS_COLLECTION: &str = "organizations";

/// Shared handle to the backing document store.
#[derive(Clone)]
pub struct DocumentStore {
    database: Database,
}

impl DocumentStore {
    /// Build a handle from a connection string and database name.
    ///
    /// The driver connects lazily; a store that is down at startup surfaces
    /// on the first operation instead of here.
    ///
    /// # Errors
    /// Returns the driver error when the connection string does not parse.
    pub async fn connect(url: &str, database: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(url).await?;
        Ok(Self {
            database: client.database(database),
        })
    }

    /// Ensure the unique indexes the data model relies on: `users.email`
    /// and `organizations.name`.
    ///
    /// # Errors
    /// Returns the driver error when the store rejects index creation or is
    /// unreachable.
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let unique = IndexOptions::builder().unique(true).build();

        self.users()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique.clone())
                    .build(),
            )
            .await?;
        self.organizations()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "name": 1 })
                    .options(unique)
                    .build(),
            )
            .await?;
        Ok(())
    }

    pub(crate) fn users(&self) -> Collection<UserDocument> {
        self.database.collection(USERS_COLLECTION)
    }

    pub(crate) fn organizations(&self) -> Collection<OrganizationDocument> {
        self.database.collection(ORGANIZATIONS_COLLECTION)
    }
}
