//! Builders wiring repository adapters into the HTTP state.

use std::sync::Arc;

use crate::domain::{MembershipService, UserAccountsService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DocumentStore, InMemoryOrganizationRepository, InMemoryUserRepository,
    MongoOrganizationRepository, MongoUserRepository,
};

/// Build HTTP state over the configured store, falling back to the in-memory
/// adapters when no store is available.
#[must_use]
pub fn build_http_state(store: Option<DocumentStore>) -> HttpState {
    match store {
        Some(store) => {
            let users = Arc::new(MongoUserRepository::new(store.clone()));
            let organizations = Arc::new(MongoOrganizationRepository::new(store));
            HttpState::new(
                Arc::new(UserAccountsService::new(users.clone())),
                Arc::new(MembershipService::new(users, organizations)),
            )
        }
        None => in_memory_http_state(),
    }
}

/// Build HTTP state over fresh in-memory repositories.
///
/// Used by the test suites and by a server started without a configured
/// store.
#[must_use]
pub fn in_memory_http_state() -> HttpState {
    let users = Arc::new(InMemoryUserRepository::default());
    let organizations = Arc::new(InMemoryOrganizationRepository::default());
    HttpState::new(
        Arc::new(UserAccountsService::new(users.clone())),
        Arc::new(MembershipService::new(users, organizations)),
    )
}
