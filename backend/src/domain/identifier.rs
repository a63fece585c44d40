//! Opaque entity identifier shared by all aggregates.
//!
//! Wraps the store's native document identifier. Every externally supplied
//! identifier is validated here before it reaches a lookup; a malformed
//! identifier is a distinct failure, never a "not found".

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;

use crate::domain::DomainError;

/// Validation failures raised by [`EntityId::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The input was empty or whitespace.
    Empty,
    /// The input is not a well-formed store identifier.
    Malformed,
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::Malformed => write!(f, "identifier is not a valid object id"),
        }
    }
}

impl std::error::Error for IdentifierError {}

/// Opaque reference to a stored document.
///
/// ## Invariants
/// - Always holds a structurally valid store identifier; construction goes
///   through [`EntityId::parse`] or [`EntityId::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(ObjectId);

impl EntityId {
    /// Generate a fresh identifier for a new document.
    ///
    /// Identifiers are assigned on the client before insert, matching the
    /// store's native id-generation scheme.
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Validate and construct an identifier from external input.
    ///
    /// # Errors
    /// [`IdentifierError::Empty`] for empty or whitespace input,
    /// [`IdentifierError::Malformed`] for anything that is not a well-formed
    /// store identifier.
    ///
    /// # Examples
    /// ```
    /// use orgbook::domain::EntityId;
    ///
    /// let id = EntityId::parse("5f9f1b9b9c9d1b1b8c8c8c8c").expect("well-formed id");
    /// assert_eq!(id.to_string(), "5f9f1b9b9c9d1b1b8c8c8c8c");
    /// assert!(EntityId::parse("not-an-id").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        if raw.trim().is_empty() {
            return Err(IdentifierError::Empty);
        }
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| IdentifierError::Malformed)
    }

    /// Access the underlying store identifier.
    #[must_use]
    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

/// Parse a required identifier field, mapping the failure modes onto the
/// domain taxonomy: empty input is a validation failure, malformed input is
/// an invalid identifier naming the field.
pub(crate) fn require_identifier(field: &str, raw: &str) -> Result<EntityId, DomainError> {
    match EntityId::parse(raw) {
        Ok(id) => Ok(id),
        Err(IdentifierError::Empty) => Err(DomainError::validation(format!("{field} is required"))),
        Err(IdentifierError::Malformed) => Err(DomainError::InvalidIdentifier(field.to_owned())),
    }
}

impl From<ObjectId> for EntityId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl FromStr for EntityId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
