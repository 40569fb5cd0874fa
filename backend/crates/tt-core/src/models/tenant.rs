//! Tenant entity - the isolation boundary for users and tasks.

use serde::{Deserialize, Serialize};

/// A tenant is a team. Every user and task belongs to exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: i64,
    /// Unique team name
    pub name: String,
}

impl Tenant {
    /// Tenant identifier as used for broadcast routing (`/ws/{tenant_id}`)
    pub fn key(&self) -> String {
        self.id.to_string()
    }
}
