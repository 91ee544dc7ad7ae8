//! Organization user lifecycle: list, create, update and delete.

use agenda_core::error::CoreError;
use agenda_core::roles::MembershipRole;
use agenda_core::types::DbId;
use agenda_db::models::invitation::Invitation;
use agenda_db::models::organization_user::{OrganizationUser, UpdateOrganizationUser};
use agenda_db::repositories::{InvitationRepo, OrganizationUserRepo};
use agenda_db::DbPool;
use async_trait::async_trait;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Accepted values of `weekStart`.
pub const WEEK_DAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Request body for creating an organization user.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationUserInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub username: Option<String>,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    pub time_format: Option<i32>,
    pub week_start: Option<String>,
    pub time_zone: Option<String>,
    pub locale: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
    pub organization_role: Option<MembershipRole>,
    /// Accept the membership immediately. Defaults to `true`.
    pub auto_accept: Option<bool>,
}

/// Request body for updating an organization user. Absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationUserInput {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub username: Option<String>,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    pub time_format: Option<i32>,
    pub week_start: Option<String>,
    pub time_zone: Option<String>,
    pub locale: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

impl UpdateOrganizationUserInput {
    fn into_update(self) -> UpdateOrganizationUser {
        UpdateOrganizationUser {
            email: self.email,
            username: self.username,
            name: self.name,
            time_format: self.time_format,
            week_start: self.week_start,
            time_zone: self.time_zone,
            locale: self.locale,
            avatar_url: self.avatar_url,
        }
    }
}

fn check_profile_fields(time_format: Option<i32>, week_start: Option<&str>) -> AppResult<()> {
    if let Some(format) = time_format {
        if format != 12 && format != 24 {
            return Err(AppError::BadRequest(format!(
                "timeFormat must be 12 or 24 (got {format})"
            )));
        }
    }
    if let Some(day) = week_start {
        if !WEEK_DAYS.contains(&day) {
            return Err(AppError::BadRequest(format!(
                "weekStart must be a day of the week (got '{day}')"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// User lookups and writes scoped to one organization.
#[async_trait]
pub trait OrganizationUserStore: Send + Sync {
    async fn list(&self, org_id: DbId, emails: &[String])
        -> Result<Vec<OrganizationUser>, sqlx::Error>;

    async fn find_by_id(
        &self,
        org_id: DbId,
        user_id: DbId,
    ) -> Result<Option<OrganizationUser>, sqlx::Error>;

    async fn find_by_email(
        &self,
        org_id: DbId,
        email: &str,
    ) -> Result<Option<OrganizationUser>, sqlx::Error>;

    async fn find_by_username(
        &self,
        org_id: DbId,
        username: &str,
    ) -> Result<Option<OrganizationUser>, sqlx::Error>;

    async fn update(
        &self,
        org_id: DbId,
        user_id: DbId,
        input: &UpdateOrganizationUser,
    ) -> Result<Option<OrganizationUser>, sqlx::Error>;

    async fn delete(&self, org_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error>;
}

/// Connects existing users to an organization or creates them.
#[async_trait]
pub trait Invitations: Send + Sync {
    async fn connect_or_create(
        &self,
        org_id: DbId,
        invitations: &[Invitation],
    ) -> Result<Vec<OrganizationUser>, sqlx::Error>;
}

/// PostgreSQL implementation of both stores.
pub struct PgOrganizationUserStore {
    pool: DbPool,
}

impl PgOrganizationUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationUserStore for PgOrganizationUserStore {
    async fn list(
        &self,
        org_id: DbId,
        emails: &[String],
    ) -> Result<Vec<OrganizationUser>, sqlx::Error> {
        OrganizationUserRepo::list(&self.pool, org_id, emails).await
    }

    async fn find_by_id(
        &self,
        org_id: DbId,
        user_id: DbId,
    ) -> Result<Option<OrganizationUser>, sqlx::Error> {
        OrganizationUserRepo::find_by_id(&self.pool, org_id, user_id).await
    }

    async fn find_by_email(
        &self,
        org_id: DbId,
        email: &str,
    ) -> Result<Option<OrganizationUser>, sqlx::Error> {
        OrganizationUserRepo::find_by_email(&self.pool, org_id, email).await
    }

    async fn find_by_username(
        &self,
        org_id: DbId,
        username: &str,
    ) -> Result<Option<OrganizationUser>, sqlx::Error> {
        OrganizationUserRepo::find_by_username(&self.pool, org_id, username).await
    }

    async fn update(
        &self,
        org_id: DbId,
        user_id: DbId,
        input: &UpdateOrganizationUser,
    ) -> Result<Option<OrganizationUser>, sqlx::Error> {
        OrganizationUserRepo::update(&self.pool, org_id, user_id, input).await
    }

    async fn delete(&self, org_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        OrganizationUserRepo::delete(&self.pool, org_id, user_id).await
    }
}

#[async_trait]
impl Invitations for PgOrganizationUserStore {
    async fn connect_or_create(
        &self,
        org_id: DbId,
        invitations: &[Invitation],
    ) -> Result<Vec<OrganizationUser>, sqlx::Error> {
        InvitationRepo::connect_or_create(&self.pool, org_id, invitations).await
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

pub struct OrganizationUsersService<'a> {
    pub users: &'a dyn OrganizationUserStore,
    pub invitations: &'a dyn Invitations,
}

impl OrganizationUsersService<'_> {
    /// Users of `org_id`, restricted to `emails` when non-empty.
    pub async fn list(&self, org_id: DbId, emails: &[String]) -> AppResult<Vec<OrganizationUser>> {
        Ok(self.users.list(org_id, emails).await?)
    }

    /// Add a user to `org_id`.
    ///
    /// Rejects an email or username already present in the organization
    /// before anything is written.
    pub async fn create(
        &self,
        org_id: DbId,
        input: CreateOrganizationUserInput,
    ) -> AppResult<OrganizationUser> {
        input.validate()?;
        check_profile_fields(input.time_format, input.week_start.as_deref())?;

        if self.users.find_by_email(org_id, &input.email).await?.is_some() {
            return Err(CoreError::Conflict("A user already exists with that email".into()).into());
        }
        if let Some(username) = input.username.as_deref() {
            if self.users.find_by_username(org_id, username).await?.is_some() {
                return Err(CoreError::Conflict("Username is already taken".into()).into());
            }
        }

        let invitation = Invitation {
            email: input.email.clone(),
            username: input.username.clone(),
            role: input.organization_role.unwrap_or_default(),
            auto_accept: input.auto_accept.unwrap_or(true),
        };
        let invited = self
            .invitations
            .connect_or_create(org_id, std::slice::from_ref(&invitation))
            .await?;
        let user = invited.into_iter().next().ok_or_else(|| {
            AppError::InternalError(format!(
                "Invitation for '{}' produced no user",
                invitation.username_or_email()
            ))
        })?;

        let profile = UpdateOrganizationUser {
            email: Some(input.email),
            username: None,
            name: input.name,
            time_format: input.time_format,
            week_start: input.week_start,
            time_zone: input.time_zone,
            locale: input.locale,
            avatar_url: input.avatar_url,
        };
        let user = self
            .users
            .update(org_id, user.id, &profile)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: user.id,
            })?;

        tracing::info!(
            org_id,
            user_id = user.id,
            role = %invitation.role,
            "Organization user created",
        );

        Ok(user)
    }

    pub async fn update(
        &self,
        org_id: DbId,
        user_id: DbId,
        input: UpdateOrganizationUserInput,
    ) -> AppResult<OrganizationUser> {
        input.validate()?;
        check_profile_fields(input.time_format, input.week_start.as_deref())?;

        let user = self
            .users
            .update(org_id, user_id, &input.into_update())
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: user_id,
            })?;

        tracing::info!(org_id, user_id, "Organization user updated");
        Ok(user)
    }

    /// Delete a user and return the removed record.
    pub async fn delete(&self, org_id: DbId, user_id: DbId) -> AppResult<OrganizationUser> {
        let not_found = || CoreError::NotFound {
            entity: "User",
            id: user_id,
        };

        let user = self
            .users
            .find_by_id(org_id, user_id)
            .await?
            .ok_or_else(not_found)?;
        if !self.users.delete(org_id, user_id).await? {
            return Err(not_found().into());
        }

        tracing::info!(org_id, user_id, "Organization user deleted");
        Ok(user)
    }
}
