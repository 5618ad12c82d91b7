//! User model
//!
//! Read-only projection of the tenant's user records. SeatGuard never
//! writes users; it only counts them and picks out administrators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role identifier for system administrators in the roles column
pub const SYSTEM_ADMIN_ROLE_ID: &str = "system_admin";

/// Role identifier for regular members in the roles column
pub const SYSTEM_USER_ROLE_ID: &str = "system_user";

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular member
    #[default]
    SystemUser,
    /// System administrator, receives billing notifications
    SystemAdmin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::SystemUser => write!(f, "{}", SYSTEM_USER_ROLE_ID),
            UserRole::SystemAdmin => write!(f, "{}", SYSTEM_ADMIN_ROLE_ID),
        }
    }
}

impl UserRole {
    /// Parse a single role identifier
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            SYSTEM_USER_ROLE_ID => Some(UserRole::SystemUser),
            SYSTEM_ADMIN_ROLE_ID => Some(UserRole::SystemAdmin),
            _ => None,
        }
    }

    /// Parse a space-separated roles column, skipping unknown roles
    pub fn parse_list(roles: &str) -> Vec<Self> {
        roles.split_whitespace().filter_map(Self::from_str).collect()
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique identifier
    pub id: String,

    /// Username (unique)
    pub username: String,

    /// Email address
    pub email: String,

    /// Preferred locale (e.g. "en", "es")
    pub locale: String,

    /// Assigned roles
    pub roles: Vec<UserRole>,

    /// Deactivation time in milliseconds, 0 while active
    pub delete_at: i64,
}

impl User {
    /// Check if user is active (not deactivated)
    pub fn is_active(&self) -> bool {
        self.delete_at == 0
    }

    /// Check if user holds the system administrator role
    pub fn is_system_admin(&self) -> bool {
        self.roles.contains(&UserRole::SystemAdmin)
    }
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: String::new(),
            username: String::new(),
            email: String::new(),
            locale: "en".to_string(),
            roles: vec![UserRole::SystemUser],
            delete_at: 0,
        }
    }
}

/// Administrator recipient of a notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminRecipient {
    pub email: String,
    pub locale: String,
    pub username: String,
}

impl AdminRecipient {
    pub fn new(
        email: impl Into<String>,
        locale: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            locale: locale.into(),
            username: username.into(),
        }
    }
}

impl From<User> for AdminRecipient {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            locale: user.locale,
            username: user.username,
        }
    }
}

impl From<&User> for AdminRecipient {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            locale: user.locale.clone(),
            username: user.username.clone(),
        }
    }
}
