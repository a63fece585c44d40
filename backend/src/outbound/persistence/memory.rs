//! In-memory repository adapters.
//!
//! Used by the test suites and by a server started without a configured
//! store. They enforce the same uniqueness and filter semantics as the
//! MongoDB adapters: unique user emails, unique organization names,
//! case-insensitive substring name filters, count-before-window listings.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    OrganizationPersistenceError, OrganizationRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{AccessLevel, EntityId, MemberPermission, Organization, User};

fn matches_filter(name: &str, name_filter: Option<&str>) -> bool {
    name_filter.is_none_or(|filter| name.to_lowercase().contains(&filter.to_lowercase()))
}

fn window<T: Clone>(filtered: Vec<T>, page: PageRequest) -> Page<T> {
    let total_count = filtered.len() as u64;
    let items = filtered
        .into_iter()
        .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
        .take(page.limit() as usize)
        .collect();
    Page::new(total_count, items)
}

/// Users held in process memory, in insertion order.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    fn state(&self) -> MutexGuard<'_, Vec<User>> {
        self.users.lock().expect("user state lock poisoned")
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.state();
        if users
            .iter()
            .any(|existing| existing.email() == user.email())
        {
            return Err(UserPersistenceError::DuplicateEmail);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.state().iter().find(|user| user.id() == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .state()
            .iter()
            .find(|user| user.email().as_ref() == email)
            .cloned())
    }

    async fn list(
        &self,
        name_filter: Option<String>,
        page: PageRequest,
    ) -> Result<Page<User>, UserPersistenceError> {
        let filtered: Vec<User> = self
            .state()
            .iter()
            .filter(|user| matches_filter(user.name().as_ref(), name_filter.as_deref()))
            .cloned()
            .collect();
        Ok(window(filtered, page))
    }

    async fn add_organization(
        &self,
        user_id: &EntityId,
        organization_id: &EntityId,
    ) -> Result<(), UserPersistenceError> {
        let mut users = self.state();
        if let Some(user) = users.iter_mut().find(|user| user.id() == *user_id) {
            let mut organizations = user.organizations().to_vec();
            if !organizations.contains(organization_id) {
                organizations.push(*organization_id);
            }
            *user = User::from_parts(
                user.id(),
                user.name().clone(),
                user.email().clone(),
                organizations,
            );
        }
        Ok(())
    }

    async fn remove_organization(
        &self,
        user_id: &EntityId,
        organization_id: &EntityId,
    ) -> Result<(), UserPersistenceError> {
        let mut users = self.state();
        if let Some(user) = users.iter_mut().find(|user| user.id() == *user_id) {
            let organizations = user
                .organizations()
                .iter()
                .copied()
                .filter(|id| id != organization_id)
                .collect();
            *user = User::from_parts(
                user.id(),
                user.name().clone(),
                user.email().clone(),
                organizations,
            );
        }
        Ok(())
    }
}

/// Organizations held in process memory, in insertion order.
#[derive(Default)]
pub struct InMemoryOrganizationRepository {
    organizations: Mutex<Vec<Organization>>,
}

impl InMemoryOrganizationRepository {
    fn state(&self) -> MutexGuard<'_, Vec<Organization>> {
        self.organizations
            .lock()
            .expect("organization state lock poisoned")
    }

    fn rebuild_members(
        organization: &Organization,
        members: Vec<MemberPermission>,
    ) -> Organization {
        Organization::from_parts(
            organization.id(),
            organization.name().clone(),
            organization.created_by(),
            members,
        )
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn insert(
        &self,
        organization: &Organization,
    ) -> Result<(), OrganizationPersistenceError> {
        let mut organizations = self.state();
        if organizations
            .iter()
            .any(|existing| existing.name() == organization.name())
        {
            return Err(OrganizationPersistenceError::DuplicateName);
        }
        organizations.push(organization.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &EntityId,
    ) -> Result<Option<Organization>, OrganizationPersistenceError> {
        Ok(self
            .state()
            .iter()
            .find(|organization| organization.id() == *id)
            .cloned())
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Organization>, OrganizationPersistenceError> {
        Ok(self
            .state()
            .iter()
            .find(|organization| organization.name().as_ref() == name)
            .cloned())
    }

    async fn list(
        &self,
        name_filter: Option<String>,
        page: PageRequest,
    ) -> Result<Page<Organization>, OrganizationPersistenceError> {
        let filtered: Vec<Organization> = self
            .state()
            .iter()
            .filter(|organization| {
                matches_filter(organization.name().as_ref(), name_filter.as_deref())
            })
            .cloned()
            .collect();
        Ok(window(filtered, page))
    }

    async fn insert_member(
        &self,
        organization_id: &EntityId,
        member: &MemberPermission,
    ) -> Result<bool, OrganizationPersistenceError> {
        let mut organizations = self.state();
        let Some(organization) = organizations
            .iter_mut()
            .find(|organization| organization.id() == *organization_id)
        else {
            return Ok(false);
        };
        if organization.is_member(member.user_id()) {
            return Ok(false);
        }
        let mut members = organization.members().to_vec();
        members.push(*member);
        *organization = Self::rebuild_members(organization, members);
        Ok(true)
    }

    async fn set_member_access(
        &self,
        organization_id: &EntityId,
        user_id: &EntityId,
        access_level: AccessLevel,
    ) -> Result<bool, OrganizationPersistenceError> {
        let mut organizations = self.state();
        let Some(organization) = organizations
            .iter_mut()
            .find(|organization| organization.id() == *organization_id)
        else {
            return Ok(false);
        };
        if !organization.is_member(*user_id) {
            return Ok(false);
        }
        let members = organization
            .members()
            .iter()
            .map(|member| {
                if member.user_id() == *user_id {
                    MemberPermission::new(*user_id, access_level)
                } else {
                    *member
                }
            })
            .collect();
        *organization = Self::rebuild_members(organization, members);
        Ok(true)
    }

    async fn remove_member(
        &self,
        organization_id: &EntityId,
        user_id: &EntityId,
    ) -> Result<bool, OrganizationPersistenceError> {
        let mut organizations = self.state();
        let Some(organization) = organizations
            .iter_mut()
            .find(|organization| organization.id() == *organization_id)
        else {
            return Ok(false);
        };
        if !organization.is_member(*user_id) {
            return Ok(false);
        }
        let members = organization
            .members()
            .iter()
            .copied()
            .filter(|member| member.user_id() != *user_id)
            .collect();
        *organization = Self::rebuild_members(organization, members);
        Ok(true)
    }
}
