//! Member access levels.

use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// Access level held by an organization member.
///
/// ADMIN is required for every membership mutation; READ and WRITE confer no
/// membership-management rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessLevel {
    /// Read-only access.
    Read,
    /// Read and write access.
    Write,
    /// Full access including membership management.
    Admin,
}

/// Failure raised when parsing an access level literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessLevelParseError {
    /// The input was empty or whitespace.
    Empty,
    /// The input is not one of the recognised literals.
    Unknown(String),
}

impl fmt::Display for AccessLevelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "access level must not be empty"),
            Self::Unknown(raw) => write!(f, "{raw:?} is not a valid access level"),
        }
    }
}

impl std::error::Error for AccessLevelParseError {}

impl AccessLevel {
    /// Canonical wire literal for this level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = AccessLevelParseError;

    /// Case-sensitive parse against the fixed literal set.
    ///
    /// Any other value is a failure the caller must handle; there is no
    /// silent default.
    ///
    /// # Examples
    /// ```
    /// use orgbook::domain::AccessLevel;
    ///
    /// assert_eq!("ADMIN".parse::<AccessLevel>(), Ok(AccessLevel::Admin));
    /// assert!("admin".parse::<AccessLevel>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "READ" => Ok(Self::Read),
            "WRITE" => Ok(Self::Write),
            "ADMIN" => Ok(Self::Admin),
            _ if s.trim().is_empty() => Err(AccessLevelParseError::Empty),
            other => Err(AccessLevelParseError::Unknown(other.to_owned())),
        }
    }
}

/// Parse a required access-level field, mapping the failure modes onto the
/// domain taxonomy.
pub(crate) fn require_access_level(field: &str, raw: &str) -> Result<AccessLevel, DomainError> {
    match raw.parse::<AccessLevel>() {
        Ok(level) => Ok(level),
        Err(AccessLevelParseError::Empty) => {
            Err(DomainError::validation(format!("{field} is required")))
        }
        Err(AccessLevelParseError::Unknown(value)) => Err(DomainError::InvalidAccessLevel(value)),
    }
}
