//! Connect-or-create routine for inviting users into an organization.

use agenda_core::types::DbId;
use sqlx::PgPool;

use crate::models::invitation::Invitation;
use crate::models::organization_user::OrganizationUser;
use crate::repositories::organization_user_repo::COLUMNS;

/// Connects existing users to an organization or creates them.
pub struct InvitationRepo;

impl InvitationRepo {
    /// Process `invitations` for `org_id` inside a single transaction.
    ///
    /// For each entry, an existing user with the same email that has no
    /// organization, or already belongs to `org_id`, is connected; otherwise
    /// a new user is inserted. Usernames never select an existing user, and
    /// an email owned by another organization's user fails on
    /// `uq_users_email`. A membership with
    /// `accepted = auto_accept` is then added unless one already exists.
    ///
    /// Returns the connected or created users in invitation order.
    pub async fn connect_or_create(
        pool: &PgPool,
        org_id: DbId,
        invitations: &[Invitation],
    ) -> Result<Vec<OrganizationUser>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut users = Vec::with_capacity(invitations.len());

        let find_query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE email = $1
               AND (organization_id IS NULL OR organization_id = $2)
             ORDER BY id
             LIMIT 1
             FOR UPDATE"
        );
        let connect_query = format!(
            "UPDATE users SET organization_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let create_query = format!(
            "INSERT INTO users (email, username, organization_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );

        for invitation in invitations {
            let existing = sqlx::query_as::<_, OrganizationUser>(&find_query)
                .bind(&invitation.email)
                .bind(org_id)
                .fetch_optional(&mut *tx)
                .await?;

            let user = match existing {
                Some(user) => {
                    tracing::debug!(
                        user_id = user.id,
                        org_id,
                        "Connecting existing user to organization"
                    );
                    sqlx::query_as::<_, OrganizationUser>(&connect_query)
                        .bind(user.id)
                        .bind(org_id)
                        .fetch_one(&mut *tx)
                        .await?
                }
                None => {
                    sqlx::query_as::<_, OrganizationUser>(&create_query)
                        .bind(&invitation.email)
                        .bind(&invitation.username)
                        .bind(org_id)
                        .fetch_one(&mut *tx)
                        .await?
                }
            };

            sqlx::query(
                "INSERT INTO memberships (team_id, user_id, role, accepted)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (team_id, user_id) DO NOTHING",
            )
            .bind(org_id)
            .bind(user.id)
            .bind(invitation.role.as_str())
            .bind(invitation.auto_accept)
            .execute(&mut *tx)
            .await?;

            users.push(user);
        }

        tx.commit().await?;
        Ok(users)
    }
}
