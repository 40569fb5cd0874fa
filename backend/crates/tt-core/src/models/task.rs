//! Task entity - a unit of work scoped to a tenant.

use crate::TaskStatus;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub completed: bool,
    /// Creator; cleared if the creator is removed from the tenant
    pub user_id: Option<i64>,
    pub assigned_user_id: Option<i64>,
    pub tenant_id: i64,
}

impl Task {
    pub fn is_assigned_to(&self, user_id: i64) -> bool {
        self.assigned_user_id == Some(user_id)
    }
}

/// A task that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub user_id: i64,
    pub assigned_user_id: Option<i64>,
    pub tenant_id: i64,
}

impl NewTask {
    pub fn new(title: String, user_id: i64, tenant_id: i64) -> Self {
        Self {
            title,
            description: None,
            status: TaskStatus::default(),
            user_id,
            assigned_user_id: None,
            tenant_id,
        }
    }
}
