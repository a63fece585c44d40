//! User account service implementing the [`UserAccounts`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{CreateUserCommand, UserAccounts, UserRepository};
use crate::domain::{DomainError, DomainResult, EmailAddress, EntityId, User, UserName};

/// Signup and lookup over the user repository.
pub struct UserAccountsService<U> {
    users: Arc<U>,
}

impl<U> UserAccountsService<U> {
    /// Create a new service over the given repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UserAccounts for UserAccountsService<U>
where
    U: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> DomainResult<User> {
        let name =
            UserName::new(command.name).map_err(|err| DomainError::validation(err.to_string()))?;
        let email = EmailAddress::new(command.email)
            .map_err(|err| DomainError::validation(err.to_string()))?;

        let user = User::new(EntityId::generate(), name, email);
        self.users.insert(&user).await?;
        Ok(user)
    }

    async fn get_user(&self, id_or_email: &str) -> DomainResult<User> {
        // Identifier-format input is an id lookup only; everything else falls
        // back to the email key. A valid id that matches nothing is a miss,
        // not an email retry.
        let found = match EntityId::parse(id_or_email) {
            Ok(id) => self.users.find_by_id(&id).await?,
            Err(_) => self.users.find_by_email(id_or_email).await?,
        };
        found.ok_or(DomainError::UserNotFound)
    }

    async fn list_users(
        &self,
        name_filter: Option<String>,
        page: PageRequest,
    ) -> DomainResult<Page<User>> {
        Ok(self.users.list(name_filter, page).await?)
    }
}
