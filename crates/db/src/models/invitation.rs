//! Invitation entries accepted by the connect-or-create routine.

use agenda_core::roles::MembershipRole;

/// A single user to connect to (or create inside) an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub email: String,
    pub username: Option<String>,
    pub role: MembershipRole,
    /// Accept the membership immediately instead of waiting for the user.
    pub auto_accept: bool,
}

impl Invitation {
    /// The identifier the invitation is keyed by: username when given,
    /// otherwise email.
    pub fn username_or_email(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.email)
    }
}
