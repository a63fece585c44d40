//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`UserAccounts`], [`Memberships`]) are what inbound
//! adapters call; driven ports ([`UserRepository`],
//! [`OrganizationRepository`]) are what the services call into the store.

mod memberships;
mod organization_repository;
mod user_accounts;
mod user_repository;

pub use memberships::{
    AddMemberCommand, CreateOrganizationCommand, Memberships, RemoveMemberCommand,
    UpdateMemberAccessCommand,
};
#[cfg(test)]
pub use organization_repository::MockOrganizationRepository;
pub use organization_repository::{OrganizationPersistenceError, OrganizationRepository};
pub use user_accounts::{CreateUserCommand, UserAccounts};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
