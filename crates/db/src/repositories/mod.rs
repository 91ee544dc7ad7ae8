//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod attribute_repo;
pub mod invitation_repo;
pub mod membership_repo;
pub mod organization_repo;
pub mod organization_user_repo;
pub mod phone_call_config_repo;

pub use attribute_repo::AttributeRepo;
pub use invitation_repo::InvitationRepo;
pub use membership_repo::MembershipRepo;
pub use organization_repo::OrganizationRepo;
pub use organization_user_repo::OrganizationUserRepo;
pub use phone_call_config_repo::PhoneCallConfigRepo;
