//! Request principals.
//!
//! A principal is reconstructed from a bearer token on every request. It is
//! either a real user (minus the stored secret) or the synthetic super
//! admin, which has no backing user record at all.

use uuid::Uuid;

use crate::user::UserRole;

/// Token subject sentinel for the synthetic super admin.
pub const SUPER_ADMIN_SUBJECT: &str = "special-admin";

/// Display name of the synthetic super admin.
pub const SUPER_ADMIN_NAME: &str = "Administrator";

/// Token subject: a stored user or the synthetic super admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    User(Uuid),
    SuperAdmin,
}

impl Subject {
    /// Parse a token `sub` claim. Returns `None` when the value is neither
    /// the sentinel nor a UUID.
    pub fn parse(sub: &str) -> Option<Self> {
        if sub == SUPER_ADMIN_SUBJECT {
            return Some(Self::SuperAdmin);
        }
        sub.parse::<Uuid>().ok().map(Self::User)
    }

    /// Render as a token `sub` claim.
    pub fn as_sub(&self) -> String {
        match self {
            Self::User(id) => id.to_string(),
            Self::SuperAdmin => SUPER_ADMIN_SUBJECT.to_owned(),
        }
    }
}

/// Identity attached to an authenticated request. Never persisted.
#[derive(Debug, Clone)]
pub struct Principal {
    pub subject: Subject,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl Principal {
    /// The fixed synthetic admin principal. `email` is the configured admin
    /// login email, kept only for display.
    pub fn super_admin(email: impl Into<String>) -> Self {
        Self {
            subject: Subject::SuperAdmin,
            name: SUPER_ADMIN_NAME.to_owned(),
            email: email.into(),
            role: UserRole::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The backing user id, when this principal is a stored user.
    pub fn user_id(&self) -> Option<Uuid> {
        match self.subject {
            Subject::User(id) => Some(id),
            Subject::SuperAdmin => None,
        }
    }
}
