//! Organization membership roles.
//!
//! These must match the `memberships.role` check constraint in
//! `20260301000003_create_memberships_table.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_MEMBER: &str = "MEMBER";
pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_OWNER: &str = "OWNER";

/// Role a user holds inside an organization.
///
/// Variants are declared in ascending order of privilege so the derived
/// `Ord` can be used for "at least" checks.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipRole {
    #[default]
    Member,
    Admin,
    Owner,
}

impl MembershipRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MembershipRole::Member => ROLE_MEMBER,
            MembershipRole::Admin => ROLE_ADMIN,
            MembershipRole::Owner => ROLE_OWNER,
        }
    }

    /// True when this role grants at least the privileges of `required`.
    pub fn satisfies(self, required: MembershipRole) -> bool {
        self >= required
    }

    /// Organization admins are `ADMIN` or `OWNER` members.
    pub fn is_org_admin(self) -> bool {
        self.satisfies(MembershipRole::Admin)
    }
}

impl fmt::Display for MembershipRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_MEMBER => Ok(MembershipRole::Member),
            ROLE_ADMIN => Ok(MembershipRole::Admin),
            ROLE_OWNER => Ok(MembershipRole::Owner),
            other => Err(CoreError::Validation(format!(
                "Unknown membership role: '{other}'"
            ))),
        }
    }
}
