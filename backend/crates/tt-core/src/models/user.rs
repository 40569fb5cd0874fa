//! User entity - a member of exactly one tenant.

use crate::UserRole;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2 PHC string; never leaves the server
    #[serde(skip)]
    pub password_hash: String,
    pub tenant_id: i64,
    pub role: UserRole,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether this user may see data belonging to `tenant_id`
    pub fn belongs_to(&self, tenant_id: i64) -> bool {
        self.tenant_id == tenant_id
    }
}

/// A user that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub tenant_id: i64,
    pub role: UserRole,
}
