//! Organization access checks.
//!
//! Every organization-scoped route resolves the path's organization id,
//! verifies it really is an organization, and checks that the caller holds
//! an accepted membership with a sufficient role.

use agenda_core::error::CoreError;
use agenda_core::roles::MembershipRole;
use agenda_core::types::DbId;
use agenda_db::models::organization::Organization;
use agenda_db::repositories::{MembershipRepo, OrganizationRepo};
use agenda_db::DbPool;

use super::auth::AuthUser;
use crate::error::AppResult;

/// The organization a request operates on and the caller's role in it.
#[derive(Debug, Clone)]
pub struct OrgAccess {
    pub organization: Organization,
    pub role: MembershipRole,
}

impl OrgAccess {
    pub fn can_manage(&self) -> bool {
        self.role.is_org_admin()
    }
}

/// Require `user` to hold at least `required` in organization `org_id`.
///
/// - 404 if `org_id` does not name an organization.
/// - 403 if the caller has no accepted membership or an insufficient role.
pub async fn require_org_role(
    pool: &DbPool,
    user: &AuthUser,
    org_id: DbId,
    required: MembershipRole,
) -> AppResult<OrgAccess> {
    let organization = OrganizationRepo::find_organization(pool, org_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Organization",
            id: org_id,
        })?;

    let membership = MembershipRepo::find(pool, org_id, user.user_id)
        .await?
        .filter(|m| m.accepted)
        .ok_or_else(|| {
            CoreError::Forbidden("You are not a member of this organization".into())
        })?;

    let role = membership.role()?;
    if !role.satisfies(required) {
        return Err(CoreError::Forbidden(format!(
            "Organization role {required} or higher required"
        ))
        .into());
    }

    Ok(OrgAccess { organization, role })
}
