//! Domain primitives, aggregates, and services.
//!
//! Everything here is transport and store agnostic: entities validate their
//! own invariants, services implement the use-case ports, and adapters on
//! both sides translate at the boundary.

mod access;
mod accounts;
mod error;
mod identifier;
mod membership;
mod organization;
pub mod ports;
mod user;

pub use self::access::{AccessLevel, AccessLevelParseError};
pub use self::accounts::UserAccountsService;
pub use self::error::{DomainError, DomainResult};
pub use self::identifier::{EntityId, IdentifierError};
pub use self::membership::MembershipService;
pub use self::organization::{
    MemberPermission, Organization, OrganizationName, OrganizationValidationError,
};
pub use self::user::{EmailAddress, User, UserName, UserValidationError};
