//! Integration tests for the repository layer against a real database.
//!
//! Run with `DATABASE_URL` pointing at a disposable PostgreSQL server and
//! `--ignored`.

use agenda_core::attributes::{attribute_name_and_slug, AttributeType};
use agenda_core::phone_call::TemplateType;
use agenda_core::roles::MembershipRole;
use agenda_db::models::attribute::{CreateAttribute, UpdateAttribute};
use agenda_db::models::invitation::Invitation;
use agenda_db::models::organization::{CreateOrganization, Organization};
use agenda_db::models::organization_user::UpdateOrganizationUser;
use agenda_db::models::phone_call_config::UpsertPhoneCallConfig;
use agenda_db::repositories::{
    AttributeRepo, InvitationRepo, MembershipRepo, OrganizationRepo, OrganizationUserRepo,
    PhoneCallConfigRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_team(pool: &PgPool, slug: &str, is_organization: bool) -> Organization {
    OrganizationRepo::create(
        pool,
        &CreateOrganization {
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            is_organization,
        },
    )
    .await
    .unwrap()
}

fn invitation(email: &str, username: Option<&str>) -> Invitation {
    Invitation {
        email: email.to_string(),
        username: username.map(str::to_string),
        role: MembershipRole::Member,
        auto_accept: true,
    }
}

fn upsert_input(event_type_id: i64, number_to_call: &str) -> UpsertPhoneCallConfig {
    UpsertPhoneCallConfig {
        event_type_id,
        template_type: TemplateType::CheckInAppointment,
        scheduler_name: Some("Grace".to_string()),
        general_prompt: "Call {{name}}".to_string(),
        your_phone_number: "+14155550100".to_string(),
        number_to_call: number_to_call.to_string(),
        guest_name: None,
        guest_email: None,
        guest_company: None,
        begin_message: None,
        enabled: true,
    }
}

fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.constraint() == Some(constraint))
}

// ---------------------------------------------------------------------------
// Organizations and memberships
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn find_organization_skips_plain_teams(pool: PgPool) {
    let org = new_team(&pool, "acme", true).await;
    let team = new_team(&pool, "book-club", false).await;

    assert!(OrganizationRepo::find_organization(&pool, org.id)
        .await
        .unwrap()
        .is_some());
    assert!(OrganizationRepo::find_organization(&pool, team.id)
        .await
        .unwrap()
        .is_none());
    assert!(OrganizationRepo::find_by_id(&pool, team.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn invitation_creates_user_and_membership(pool: PgPool) {
    let org = new_team(&pool, "acme", true).await;

    let users = InvitationRepo::connect_or_create(
        &pool,
        org.id,
        &[invitation("ada@example.com", Some("ada"))],
    )
    .await
    .unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].organization_id, Some(org.id));
    assert_eq!(users[0].username.as_deref(), Some("ada"));

    let membership = MembershipRepo::find(&pool, org.id, users[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(membership.role().unwrap(), MembershipRole::Member);
    assert!(membership.accepted);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn invitation_connects_existing_unaffiliated_user(pool: PgPool) {
    let org = new_team(&pool, "acme", true).await;
    let (existing_id,): (i64,) =
        sqlx::query_as("INSERT INTO users (email) VALUES ('grace@example.com') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

    let users =
        InvitationRepo::connect_or_create(&pool, org.id, &[invitation("grace@example.com", None)])
            .await
            .unwrap();

    assert_eq!(users[0].id, existing_id);
    assert_eq!(users[0].organization_id, Some(org.id));

    // Inviting again keeps a single membership.
    InvitationRepo::connect_or_create(&pool, org.id, &[invitation("grace@example.com", None)])
        .await
        .unwrap();
    assert_eq!(MembershipRepo::list_by_team(&pool, org.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn invitation_never_adopts_user_by_username(pool: PgPool) {
    let org = new_team(&pool, "acme", true).await;
    let (other_id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (email, username) VALUES ('ada@other.com', 'ada') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let users = InvitationRepo::connect_or_create(
        &pool,
        org.id,
        &[invitation("new@acme.com", Some("ada"))],
    )
    .await
    .unwrap();

    assert_ne!(users[0].id, other_id);
    assert_eq!(users[0].email, "new@acme.com");
    assert_eq!(users[0].username.as_deref(), Some("ada"));

    let (email, organization_id): (String, Option<i64>) =
        sqlx::query_as("SELECT email, organization_id FROM users WHERE id = $1")
            .bind(other_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(email, "ada@other.com");
    assert_eq!(organization_id, None);
    assert!(MembershipRepo::find(&pool, org.id, other_id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn invitation_rejects_email_owned_by_another_organization(pool: PgPool) {
    let acme = new_team(&pool, "acme", true).await;
    let globex = new_team(&pool, "globex", true).await;
    let owned = InvitationRepo::connect_or_create(
        &pool,
        globex.id,
        &[invitation("hank@example.com", None)],
    )
    .await
    .unwrap();

    let err = InvitationRepo::connect_or_create(
        &pool,
        acme.id,
        &[invitation("hank@example.com", None)],
    )
    .await
    .unwrap_err();

    assert!(is_unique_violation(&err, "uq_users_email"));
    let hank = OrganizationUserRepo::find_by_id(&pool, globex.id, owned[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(hank.organization_id, Some(globex.id));
    assert!(MembershipRepo::list_by_team(&pool, acme.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn pending_invitation_is_not_accepted(pool: PgPool) {
    let org = new_team(&pool, "acme", true).await;
    let pending = Invitation {
        role: MembershipRole::Admin,
        auto_accept: false,
        ..invitation("pending@example.com", None)
    };

    let users = InvitationRepo::connect_or_create(&pool, org.id, &[pending])
        .await
        .unwrap();

    let membership = MembershipRepo::find(&pool, org.id, users[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(membership.role, "ADMIN");
    assert!(!membership.accepted);
}

// ---------------------------------------------------------------------------
// Organization users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn organization_users_are_tenant_scoped(pool: PgPool) {
    let acme = new_team(&pool, "acme", true).await;
    let globex = new_team(&pool, "globex", true).await;
    InvitationRepo::connect_or_create(
        &pool,
        acme.id,
        &[
            invitation("ada@example.com", None),
            invitation("grace@example.com", None),
        ],
    )
    .await
    .unwrap();
    let other = InvitationRepo::connect_or_create(
        &pool,
        globex.id,
        &[invitation("hank@example.com", None)],
    )
    .await
    .unwrap();

    assert_eq!(OrganizationUserRepo::list(&pool, acme.id, &[]).await.unwrap().len(), 2);
    let filtered = OrganizationUserRepo::list(&pool, acme.id, &["grace@example.com".to_string()])
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].email, "grace@example.com");

    assert!(OrganizationUserRepo::find_by_id(&pool, acme.id, other[0].id)
        .await
        .unwrap()
        .is_none());
    assert!(!OrganizationUserRepo::delete(&pool, acme.id, other[0].id)
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_only_touches_given_fields(pool: PgPool) {
    let org = new_team(&pool, "acme", true).await;
    let users = InvitationRepo::connect_or_create(
        &pool,
        org.id,
        &[invitation("ada@example.com", Some("ada"))],
    )
    .await
    .unwrap();

    let updated = OrganizationUserRepo::update(
        &pool,
        org.id,
        users[0].id,
        &UpdateOrganizationUser {
            name: Some("Ada Lovelace".to_string()),
            time_format: Some(24),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(updated.time_format, Some(24));
    assert_eq!(updated.username.as_deref(), Some("ada"));
    assert_eq!(updated.time_zone, "Europe/London");
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn attribute_slugs_are_unique_per_team(pool: PgPool) {
    let acme = new_team(&pool, "acme", true).await;
    let globex = new_team(&pool, "globex", true).await;
    let input = |team_id| CreateAttribute {
        team_id,
        name: "Department".to_string(),
        slug: "department".to_string(),
        attribute_type: AttributeType::SingleSelect,
    };

    let created = AttributeRepo::create(&pool, &input(acme.id)).await.unwrap();
    assert_eq!(created.kind().unwrap(), AttributeType::SingleSelect);
    assert!(created.enabled);

    let err = AttributeRepo::create(&pool, &input(acme.id)).await.unwrap_err();
    assert!(is_unique_violation(&err, "uq_attributes_team_slug"));

    AttributeRepo::create(&pool, &input(globex.id)).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn non_ascii_attribute_names_get_distinct_slugs(pool: PgPool) {
    let org = new_team(&pool, "acme", true).await;
    for raw in ["部署", "地域", "★"] {
        let (name, slug) = attribute_name_and_slug(raw).unwrap();
        AttributeRepo::create(
            &pool,
            &CreateAttribute {
                team_id: org.id,
                name,
                slug,
                attribute_type: AttributeType::Text,
            },
        )
        .await
        .unwrap();
    }

    let listed = AttributeRepo::list_by_team(&pool, org.id).await.unwrap();
    let mut slugs: Vec<_> = listed.iter().map(|a| a.slug.as_str()).collect();
    slugs.sort_unstable();
    assert_eq!(slugs, ["2605", "地域", "部署"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn attributes_list_update_and_delete(pool: PgPool) {
    let org = new_team(&pool, "acme", true).await;
    for (name, slug) in [("Location", "location"), ("Department", "department")] {
        AttributeRepo::create(
            &pool,
            &CreateAttribute {
                team_id: org.id,
                name: name.to_string(),
                slug: slug.to_string(),
                attribute_type: AttributeType::Text,
            },
        )
        .await
        .unwrap();
    }

    let listed = AttributeRepo::list_by_team(&pool, org.id).await.unwrap();
    let names: Vec<_> = listed.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Department", "Location"]);

    let disabled = AttributeRepo::update(
        &pool,
        org.id,
        listed[0].id,
        &UpdateAttribute {
            enabled: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(!disabled.enabled);
    assert_eq!(disabled.name, "Department");

    assert!(AttributeRepo::delete(&pool, org.id, listed[1].id).await.unwrap());
    assert!(!AttributeRepo::delete(&pool, org.id, listed[1].id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Phone-call configurations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn upsert_keeps_one_row_per_event_type(pool: PgPool) {
    let first = PhoneCallConfigRepo::upsert(&pool, &upsert_input(12, "+14155550123"))
        .await
        .unwrap();
    assert!(PhoneCallConfigRepo::set_llm_id(&pool, 12, "llm_1").await.unwrap());

    let second = PhoneCallConfigRepo::upsert(&pool, &upsert_input(12, "+442079460000"))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.number_to_call, "+442079460000");
    assert_eq!(second.llm_id.as_deref(), Some("llm_1"));

    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM ai_phone_call_configurations WHERE event_type_id = 12",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn set_llm_id_reports_missing_configuration(pool: PgPool) {
    assert!(!PhoneCallConfigRepo::set_llm_id(&pool, 404, "llm_x").await.unwrap());
    assert!(PhoneCallConfigRepo::find_by_event_type(&pool, 404)
        .await
        .unwrap()
        .is_none());
}
