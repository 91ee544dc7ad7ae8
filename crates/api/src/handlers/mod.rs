pub mod attributes;
pub mod memberships;
pub mod organization_users;
pub mod phone_calls;
pub mod settings;
