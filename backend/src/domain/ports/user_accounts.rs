//! Driving port for user signup and lookup.
//!
//! Inbound adapters (HTTP handlers) call this port with raw request input;
//! validation and the id-or-email fallback live behind it.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{DomainResult, User};

/// Raw signup input as decoded from a request body.
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    /// Display name; must be non-empty.
    pub name: String,
    /// Email address; must be well-formed and unique.
    pub email: String,
}

/// Use-case port for user accounts.
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Sign up a new user with an empty organization list.
    async fn create_user(&self, command: CreateUserCommand) -> DomainResult<User>;

    /// Fetch a single user. Input that parses as a store identifier is
    /// looked up by id; anything else is treated as an email.
    async fn get_user(&self, id_or_email: &str) -> DomainResult<User>;

    /// Count and fetch one window of users, optionally filtered by a
    /// case-insensitive name substring.
    async fn list_users(
        &self,
        name_filter: Option<String>,
        page: PageRequest,
    ) -> DomainResult<Page<User>>;
}
