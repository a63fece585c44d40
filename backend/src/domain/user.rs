//! User aggregate.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::EntityId;

/// Validation errors raised while constructing user components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    EmptyEmail,
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Human readable name of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Local part, one @, domain with at least one dot. Deliverability is
        // the mail system's problem, not this service's.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address of a user, unique across the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Examples
    /// ```
    /// use orgbook::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::new("jane@x.com").is_ok());
    /// assert!(EmailAddress::new("jane-at-x").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Application user.
///
/// ## Invariants
/// - `email` is unique across users, enforced by the store index.
/// - `organizations` is a denormalized back-reference mutated only by the
///   membership engine, never by user-facing endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: EntityId,
    name: UserName,
    email: EmailAddress,
    organizations: Vec<EntityId>,
}

impl User {
    /// Build a freshly signed-up user with no organization memberships.
    pub fn new(id: EntityId, name: UserName, email: EmailAddress) -> Self {
        Self {
            id,
            name,
            email,
            organizations: Vec::new(),
        }
    }

    /// Reassemble a user from persisted parts.
    pub fn from_parts(
        id: EntityId,
        name: UserName,
        email: EmailAddress,
        organizations: Vec<EntityId>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            organizations,
        }
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Unique email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Organizations this user belongs to, in enrollment order.
    #[must_use]
    pub fn organizations(&self) -> &[EntityId] {
        &self.organizations
    }
}
