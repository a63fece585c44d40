//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` and depend only on
//! the driving ports, so the same routes run over the MongoDB adapters in
//! production and the in-memory adapters in tests.

use std::sync::Arc;

use crate::domain::ports::{Memberships, UserAccounts};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User signup and lookup use-cases.
    pub accounts: Arc<dyn UserAccounts>,
    /// Membership engine and organization queries.
    pub memberships: Arc<dyn Memberships>,
}

impl HttpState {
    /// Bundle the two driving ports.
    pub fn new(accounts: Arc<dyn UserAccounts>, memberships: Arc<dyn Memberships>) -> Self {
        Self {
            accounts,
            memberships,
        }
    }
}
