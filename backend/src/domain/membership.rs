//! The membership engine: organization creation and member transitions.
//!
//! Every transition runs its precondition checks in a fixed order and the
//! first failure wins; the HTTP adapter relies on that precedence. Writes
//! against the store are conditional updates, so a check that passed here but
//! lost a concurrent race still surfaces as the same typed failure.
//!
//! Creating an organization and appending it to the creator's back-reference
//! list are two separate store writes with no transaction between them; a
//! crash in between leaves the user's list stale relative to the member list.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::access::require_access_level;
use crate::domain::identifier::require_identifier;
use crate::domain::ports::{
    AddMemberCommand, CreateOrganizationCommand, Memberships, OrganizationRepository,
    RemoveMemberCommand, UpdateMemberAccessCommand, UserRepository,
};
use crate::domain::{
    DomainError, DomainResult, EntityId, MemberPermission, Organization, OrganizationName,
};

/// Membership state machine over the user and organization repositories.
pub struct MembershipService<U, O> {
    users: Arc<U>,
    organizations: Arc<O>,
}

impl<U, O> MembershipService<U, O> {
    /// Create a new engine over the given repositories.
    pub fn new(users: Arc<U>, organizations: Arc<O>) -> Self {
        Self {
            users,
            organizations,
        }
    }
}

impl<U, O> MembershipService<U, O>
where
    U: UserRepository,
    O: OrganizationRepository,
{
    async fn require_organization(&self, id: EntityId) -> DomainResult<Organization> {
        self.organizations
            .find_by_id(&id)
            .await?
            .ok_or(DomainError::OrganizationNotFound)
    }

    async fn require_user(&self, id: EntityId) -> DomainResult<()> {
        self.users
            .find_by_id(&id)
            .await?
            .map(|_| ())
            .ok_or(DomainError::UserNotFound)
    }

    fn require_admin(organization: &Organization, author_id: EntityId) -> DomainResult<()> {
        if organization.is_admin(author_id) {
            Ok(())
        } else {
            Err(DomainError::NotAuthorized)
        }
    }

    /// Re-read the organization after a member mutation so callers receive
    /// the persisted state, not a locally patched copy.
    async fn reload(&self, id: EntityId) -> DomainResult<Organization> {
        self.require_organization(id).await
    }
}

#[async_trait]
impl<U, O> Memberships for MembershipService<U, O>
where
    U: UserRepository,
    O: OrganizationRepository,
{
    async fn create_organization(
        &self,
        command: CreateOrganizationCommand,
    ) -> DomainResult<Organization> {
        let name = OrganizationName::new(command.name)
            .map_err(|err| DomainError::validation(err.to_string()))?;
        let created_by = require_identifier("created_by", &command.created_by)?;
        self.require_user(created_by).await?;

        let organization = Organization::new(EntityId::generate(), name, created_by);
        self.organizations.insert(&organization).await?;
        self.users
            .add_organization(&created_by, &organization.id())
            .await?;
        Ok(organization)
    }

    async fn get_organization(&self, id_or_name: &str) -> DomainResult<Organization> {
        // Identifier-format input is an id lookup only; everything else falls
        // back to the name key. A valid id that matches nothing is a miss,
        // not a name retry.
        let found = match EntityId::parse(id_or_name) {
            Ok(id) => self.organizations.find_by_id(&id).await?,
            Err(_) => self.organizations.find_by_name(id_or_name).await?,
        };
        found.ok_or(DomainError::OrganizationNotFound)
    }

    async fn list_organizations(
        &self,
        name_filter: Option<String>,
        page: PageRequest,
    ) -> DomainResult<Page<Organization>> {
        Ok(self.organizations.list(name_filter, page).await?)
    }

    async fn add_member(&self, command: AddMemberCommand) -> DomainResult<Organization> {
        let organization_id = require_identifier("organization_id", &command.organization_id)?;
        let author_id = require_identifier("author_id", &command.author_id)?;
        let user_id = require_identifier("user_id", &command.user_id)?;

        let organization = self.require_organization(organization_id).await?;
        self.require_user(user_id).await?;
        Self::require_admin(&organization, author_id)?;
        if organization.is_member(user_id) {
            return Err(DomainError::AlreadyMember);
        }
        let access_level = require_access_level("access_level", &command.access_level)?;

        let member = MemberPermission::new(user_id, access_level);
        let appended = self
            .organizations
            .insert_member(&organization_id, &member)
            .await?;
        if !appended {
            // A concurrent add got past the check above first.
            return Err(DomainError::AlreadyMember);
        }
        self.users
            .add_organization(&user_id, &organization_id)
            .await?;
        self.reload(organization_id).await
    }

    async fn update_member_access_level(
        &self,
        command: UpdateMemberAccessCommand,
    ) -> DomainResult<Organization> {
        let organization_id = require_identifier("organization_id", &command.organization_id)?;
        let author_id = require_identifier("author_id", &command.author_id)?;
        let user_id = require_identifier("user_id", &command.user_id)?;

        let organization = self.require_organization(organization_id).await?;
        self.require_user(user_id).await?;
        Self::require_admin(&organization, author_id)?;
        if !organization.is_member(user_id) {
            return Err(DomainError::MemberNotFound);
        }
        let access_level = require_access_level("access_level", &command.access_level)?;

        // No guard against demoting the author, the creator, or the last
        // remaining ADMIN; an organization may end up with zero ADMINs.
        let updated = self
            .organizations
            .set_member_access(&organization_id, &user_id, access_level)
            .await?;
        if !updated {
            return Err(DomainError::MemberNotFound);
        }
        self.reload(organization_id).await
    }

    async fn remove_member(&self, command: RemoveMemberCommand) -> DomainResult<Organization> {
        let organization_id = require_identifier("organization_id", &command.organization_id)?;
        let author_id = require_identifier("author_id", &command.author_id)?;
        let user_id = require_identifier("user_id", &command.user_id)?;

        let organization = self.require_organization(organization_id).await?;
        // Checked before authorization: not even an ADMIN removes the
        // creator.
        if user_id == organization.created_by() {
            return Err(DomainError::CannotRemoveCreator);
        }
        Self::require_admin(&organization, author_id)?;
        if !organization.is_member(user_id) {
            return Err(DomainError::MemberNotFound);
        }

        let removed = self
            .organizations
            .remove_member(&organization_id, &user_id)
            .await?;
        if !removed {
            return Err(DomainError::MemberNotFound);
        }
        self.users
            .remove_organization(&user_id, &organization_id)
            .await?;
        self.reload(organization_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        CreateUserCommand, MockOrganizationRepository, OrganizationPersistenceError, UserAccounts,
    };
    use crate::domain::{AccessLevel, UserAccountsService};
    use crate::outbound::persistence::{InMemoryOrganizationRepository, InMemoryUserRepository};
    use rstest::rstest;

    struct World {
        engine: MembershipService<InMemoryUserRepository, InMemoryOrganizationRepository>,
        accounts: UserAccountsService<InMemoryUserRepository>,
        users: Arc<InMemoryUserRepository>,
    }

    fn world() -> World {
        let users = Arc::new(InMemoryUserRepository::default());
        let organizations = Arc::new(InMemoryOrganizationRepository::default());
        World {
            engine: MembershipService::new(users.clone(), organizations),
            accounts: UserAccountsService::new(users.clone()),
            users,
        }
    }

    async fn signup(world: &World, name: &str, email: &str) -> EntityId {
        world
            .accounts
            .create_user(CreateUserCommand {
                name: name.to_owned(),
                email: email.to_owned(),
            })
            .await
            .expect("signup succeeds")
            .id()
    }

    async fn acme(world: &World, creator: EntityId) -> Organization {
        world
            .engine
            .create_organization(CreateOrganizationCommand {
                name: "Acme".to_owned(),
                created_by: creator.to_string(),
            })
            .await
            .expect("organization is created")
    }

    fn add_command(
        organization: &Organization,
        author: EntityId,
        user: EntityId,
        level: &str,
    ) -> AddMemberCommand {
        AddMemberCommand {
            organization_id: organization.id().to_string(),
            author_id: author.to_string(),
            user_id: user.to_string(),
            access_level: level.to_owned(),
        }
    }

    async fn member_of(world: &World, user: EntityId) -> Vec<EntityId> {
        world
            .users
            .find_by_id(&user)
            .await
            .expect("lookup succeeds")
            .expect("user exists")
            .organizations()
            .to_vec()
    }

    #[rstest]
    #[tokio::test]
    async fn creating_an_organization_enrolls_the_creator_as_admin() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;

        let organization = acme(&world, jane).await;
        assert_eq!(organization.created_by(), jane);
        assert_eq!(organization.members().len(), 1);
        assert!(organization.is_admin(jane));
        assert_eq!(member_of(&world, jane).await, vec![organization.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn creating_an_organization_requires_an_existing_creator() {
        let world = world();
        let error = world
            .engine
            .create_organization(CreateOrganizationCommand {
                name: "Acme".to_owned(),
                created_by: EntityId::generate().to_string(),
            })
            .await
            .expect_err("creator is unknown");
        assert_eq!(error, DomainError::UserNotFound);
    }

    #[rstest]
    #[case("", "validation")]
    #[case("not-an-id", "invalid")]
    #[tokio::test]
    async fn creating_an_organization_validates_the_creator_reference(
        #[case] created_by: &str,
        #[case] kind: &str,
    ) {
        let world = world();
        let error = world
            .engine
            .create_organization(CreateOrganizationCommand {
                name: "Acme".to_owned(),
                created_by: created_by.to_owned(),
            })
            .await
            .expect_err("reference is invalid");
        match kind {
            "validation" => assert_eq!(error, DomainError::validation("created_by is required")),
            _ => assert_eq!(error, DomainError::InvalidIdentifier("created_by".into())),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn organization_names_are_unique() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        acme(&world, jane).await;

        let error = world
            .engine
            .create_organization(CreateOrganizationCommand {
                name: "Acme".to_owned(),
                created_by: jane.to_string(),
            })
            .await
            .expect_err("name is taken");
        assert_eq!(error, DomainError::DuplicateOrganization);
    }

    #[rstest]
    #[tokio::test]
    async fn adding_a_member_updates_both_sides() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        let bo = signup(&world, "Bo", "bo@x.com").await;
        let organization = acme(&world, jane).await;

        let updated = world
            .engine
            .add_member(add_command(&organization, jane, bo, "WRITE"))
            .await
            .expect("admin may add members");
        assert_eq!(updated.members().len(), 2);
        let member = updated.member_for(bo).expect("bo is enrolled");
        assert_eq!(member.access_level(), AccessLevel::Write);
        assert_eq!(member_of(&world, bo).await, vec![organization.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn add_then_remove_restores_the_member_set() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        let bo = signup(&world, "Bo", "bo@x.com").await;
        let organization = acme(&world, jane).await;
        let before = organization.members().to_vec();

        world
            .engine
            .add_member(add_command(&organization, jane, bo, "WRITE"))
            .await
            .expect("add succeeds");
        let after = world
            .engine
            .remove_member(RemoveMemberCommand {
                organization_id: organization.id().to_string(),
                author_id: jane.to_string(),
                user_id: bo.to_string(),
            })
            .await
            .expect("remove succeeds");

        assert_eq!(after.members().to_vec(), before);
        assert!(member_of(&world, bo).await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn non_admin_authors_cannot_mutate_membership() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        let bo = signup(&world, "Bo", "bo@x.com").await;
        let chris = signup(&world, "Chris", "chris@x.com").await;
        let organization = acme(&world, jane).await;
        world
            .engine
            .add_member(add_command(&organization, jane, bo, "WRITE"))
            .await
            .expect("add succeeds");

        let error = world
            .engine
            .add_member(add_command(&organization, bo, chris, "READ"))
            .await
            .expect_err("WRITE access does not authorize");
        assert_eq!(error, DomainError::NotAuthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn enrolling_an_existing_member_is_rejected() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        let organization = acme(&world, jane).await;

        let error = world
            .engine
            .add_member(add_command(&organization, jane, jane, "READ"))
            .await
            .expect_err("creator already holds an entry");
        assert_eq!(error, DomainError::AlreadyMember);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_aggregates_fail_in_check_order() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        let organization = acme(&world, jane).await;

        // Unknown organization wins over unknown user.
        let ghost_org = Organization::new(
            EntityId::generate(),
            OrganizationName::new("Ghost").expect("valid name"),
            jane,
        );
        let error = world
            .engine
            .add_member(add_command(&ghost_org, jane, EntityId::generate(), "READ"))
            .await
            .expect_err("organization is unknown");
        assert_eq!(error, DomainError::OrganizationNotFound);

        // Known organization, unknown user.
        let error = world
            .engine
            .add_member(add_command(
                &organization,
                jane,
                EntityId::generate(),
                "READ",
            ))
            .await
            .expect_err("user is unknown");
        assert_eq!(error, DomainError::UserNotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn authorization_is_checked_before_the_access_level_parses() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        let bo = signup(&world, "Bo", "bo@x.com").await;
        let chris = signup(&world, "Chris", "chris@x.com").await;
        let organization = acme(&world, jane).await;
        world
            .engine
            .add_member(add_command(&organization, jane, bo, "WRITE"))
            .await
            .expect("add succeeds");

        let error = world
            .engine
            .add_member(add_command(&organization, bo, chris, "OWNER"))
            .await
            .expect_err("author is not an admin");
        assert_eq!(error, DomainError::NotAuthorized);

        let error = world
            .engine
            .add_member(add_command(&organization, jane, chris, "OWNER"))
            .await
            .expect_err("access level is unknown");
        assert_eq!(error, DomainError::InvalidAccessLevel("OWNER".into()));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_identifiers_name_the_field() {
        let world = world();
        let error = world
            .engine
            .add_member(AddMemberCommand {
                organization_id: "nope".to_owned(),
                author_id: EntityId::generate().to_string(),
                user_id: EntityId::generate().to_string(),
                access_level: "READ".to_owned(),
            })
            .await
            .expect_err("organization id is malformed");
        assert_eq!(error, DomainError::InvalidIdentifier("organization_id".into()));
    }

    #[rstest]
    #[tokio::test]
    async fn updating_access_level_is_idempotent() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        let bo = signup(&world, "Bo", "bo@x.com").await;
        let organization = acme(&world, jane).await;
        world
            .engine
            .add_member(add_command(&organization, jane, bo, "READ"))
            .await
            .expect("add succeeds");

        let command = UpdateMemberAccessCommand {
            organization_id: organization.id().to_string(),
            author_id: jane.to_string(),
            user_id: bo.to_string(),
            access_level: "WRITE".to_owned(),
        };
        let once = world
            .engine
            .update_member_access_level(command.clone())
            .await
            .expect("first update succeeds");
        let twice = world
            .engine
            .update_member_access_level(command)
            .await
            .expect("second update succeeds");
        assert_eq!(once, twice);
        assert_eq!(
            twice.member_for(bo).expect("bo is enrolled").access_level(),
            AccessLevel::Write
        );
    }

    #[rstest]
    #[tokio::test]
    async fn updating_a_non_member_fails() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        let bo = signup(&world, "Bo", "bo@x.com").await;
        let organization = acme(&world, jane).await;

        let error = world
            .engine
            .update_member_access_level(UpdateMemberAccessCommand {
                organization_id: organization.id().to_string(),
                author_id: jane.to_string(),
                user_id: bo.to_string(),
                access_level: "WRITE".to_owned(),
            })
            .await
            .expect_err("bo is not enrolled");
        assert_eq!(error, DomainError::MemberNotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn an_admin_may_demote_the_creator_leaving_no_admins() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        let organization = acme(&world, jane).await;

        let updated = world
            .engine
            .update_member_access_level(UpdateMemberAccessCommand {
                organization_id: organization.id().to_string(),
                author_id: jane.to_string(),
                user_id: jane.to_string(),
                access_level: "READ".to_owned(),
            })
            .await
            .expect("self-demotion is permitted");
        assert!(!updated.is_admin(jane));
        assert!(updated.members().iter().all(|m| m.access_level() != AccessLevel::Admin));
    }

    #[rstest]
    #[tokio::test]
    async fn the_creator_can_never_be_removed() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        let bo = signup(&world, "Bo", "bo@x.com").await;
        let organization = acme(&world, jane).await;
        world
            .engine
            .add_member(add_command(&organization, jane, bo, "WRITE"))
            .await
            .expect("add succeeds");

        // Even the creator acting as an ADMIN author is rejected.
        let error = world
            .engine
            .remove_member(RemoveMemberCommand {
                organization_id: organization.id().to_string(),
                author_id: jane.to_string(),
                user_id: jane.to_string(),
            })
            .await
            .expect_err("creator is protected");
        assert_eq!(error, DomainError::CannotRemoveCreator);

        // The creator check precedes authorization: a non-admin author
        // targeting the creator sees the protection, not the auth failure.
        let error = world
            .engine
            .remove_member(RemoveMemberCommand {
                organization_id: organization.id().to_string(),
                author_id: bo.to_string(),
                user_id: jane.to_string(),
            })
            .await
            .expect_err("creator is protected");
        assert_eq!(error, DomainError::CannotRemoveCreator);
    }

    #[rstest]
    #[tokio::test]
    async fn removing_a_non_member_fails() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        let bo = signup(&world, "Bo", "bo@x.com").await;
        let organization = acme(&world, jane).await;

        let error = world
            .engine
            .remove_member(RemoveMemberCommand {
                organization_id: organization.id().to_string(),
                author_id: jane.to_string(),
                user_id: bo.to_string(),
            })
            .await
            .expect_err("bo is not enrolled");
        assert_eq!(error, DomainError::MemberNotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn organizations_are_found_by_id_or_name() {
        let world = world();
        let jane = signup(&world, "Jane", "jane@x.com").await;
        let organization = acme(&world, jane).await;

        let by_id = world
            .engine
            .get_organization(&organization.id().to_string())
            .await
            .expect("id lookup succeeds");
        assert_eq!(by_id.id(), organization.id());

        let by_name = world
            .engine
            .get_organization("Acme")
            .await
            .expect("name lookup succeeds");
        assert_eq!(by_name.id(), organization.id());

        // Malformed identifier input falls back to the name key; when no
        // organization carries that name either, the lookup is a miss.
        let error = world
            .engine
            .get_organization("not-an-id-or-name")
            .await
            .expect_err("nothing matches");
        assert_eq!(error, DomainError::OrganizationNotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn a_lost_insert_race_surfaces_as_already_member() {
        let users = Arc::new(InMemoryUserRepository::default());
        let accounts = UserAccountsService::new(users.clone());
        let jane = accounts
            .create_user(CreateUserCommand {
                name: "Jane".to_owned(),
                email: "jane@x.com".to_owned(),
            })
            .await
            .expect("signup succeeds")
            .id();
        let bo = accounts
            .create_user(CreateUserCommand {
                name: "Bo".to_owned(),
                email: "bo@x.com".to_owned(),
            })
            .await
            .expect("signup succeeds")
            .id();

        let organization = Organization::new(
            EntityId::generate(),
            OrganizationName::new("Acme").expect("valid name"),
            jane,
        );
        let mut organizations = MockOrganizationRepository::new();
        let snapshot = organization.clone();
        organizations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(snapshot.clone())));
        // The precondition check saw no entry, but the conditional update
        // reports that another writer appended one in between.
        organizations.expect_insert_member().returning(|_, _| Ok(false));

        let engine = MembershipService::new(users, Arc::new(organizations));
        let error = engine
            .add_member(AddMemberCommand {
                organization_id: organization.id().to_string(),
                author_id: jane.to_string(),
                user_id: bo.to_string(),
                access_level: "READ".to_owned(),
            })
            .await
            .expect_err("race was lost");
        assert_eq!(error, DomainError::AlreadyMember);
    }

    #[rstest]
    #[tokio::test]
    async fn store_failures_surface_as_store_errors() {
        let users = Arc::new(InMemoryUserRepository::default());
        let mut organizations = MockOrganizationRepository::new();
        organizations
            .expect_list()
            .returning(|_, _| Err(OrganizationPersistenceError::connection("store is down")));

        let engine = MembershipService::new(users, Arc::new(organizations));
        let error = engine
            .list_organizations(None, PageRequest::default())
            .await
            .expect_err("store is down");
        assert!(matches!(error, DomainError::Store(_)));
    }
}
