//! Store document models.
//!
//! These structs define the persisted shape and never leave the persistence
//! layer; repositories convert to and from domain entities at the boundary.
//! Identifiers are stored as native object ids, access levels as their wire
//! literals.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    EmailAddress, EntityId, MemberPermission, Organization, OrganizationName, User, UserName,
};

/// A stored document that no longer satisfies a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stored {entity} {id} is invalid: {message}")]
pub(crate) struct DocumentConversionError {
    pub entity: &'static str,
    pub id: ObjectId,
    pub message: String,
}

impl DocumentConversionError {
    fn new(entity: &'static str, id: ObjectId, message: impl Into<String>) -> Self {
        Self {
            entity,
            id,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub organizations: Vec<ObjectId>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_object_id(),
            name: user.name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
            organizations: user
                .organizations()
                .iter()
                .map(EntityId::as_object_id)
                .collect(),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = DocumentConversionError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let id = document.id;
        let name = UserName::new(document.name)
            .map_err(|err| DocumentConversionError::new("user", id, err.to_string()))?;
        let email = EmailAddress::new(document.email)
            .map_err(|err| DocumentConversionError::new("user", id, err.to_string()))?;
        let organizations = document
            .organizations
            .into_iter()
            .map(EntityId::from)
            .collect();
        Ok(User::from_parts(id.into(), name, email, organizations))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MemberPermissionDocument {
    pub user_id: ObjectId,
    pub access_level: String,
}

impl From<&MemberPermission> for MemberPermissionDocument {
    fn from(member: &MemberPermission) -> Self {
        Self {
            user_id: member.user_id().as_object_id(),
            access_level: member.access_level().as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OrganizationDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub created_by: ObjectId,
    #[serde(default)]
    pub members: Vec<MemberPermissionDocument>,
}

impl From<&Organization> for OrganizationDocument {
    fn from(organization: &Organization) -> Self {
        Self {
            id: organization.id().as_object_id(),
            name: organization.name().as_ref().to_owned(),
            created_by: organization.created_by().as_object_id(),
            members: organization
                .members()
                .iter()
                .map(MemberPermissionDocument::from)
                .collect(),
        }
    }
}

impl TryFrom<OrganizationDocument> for Organization {
    type Error = DocumentConversionError;

    fn try_from(document: OrganizationDocument) -> Result<Self, Self::Error> {
        let id = document.id;
        let name = OrganizationName::new(document.name)
            .map_err(|err| DocumentConversionError::new("organization", id, err.to_string()))?;
        let members = document
            .members
            .into_iter()
            .map(|member| {
                let access_level = member.access_level.parse().map_err(|_| {
                    DocumentConversionError::new(
                        "organization",
                        id,
                        format!("member access level {:?} is unknown", member.access_level),
                    )
                })?;
                Ok(MemberPermission::new(member.user_id.into(), access_level))
            })
            .collect::<Result<Vec<_>, DocumentConversionError>>()?;
        Ok(Organization::from_parts(
            id.into(),
            name,
            document.created_by.into(),
            members,
        ))
    }
}
