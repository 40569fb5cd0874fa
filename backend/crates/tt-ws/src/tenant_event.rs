//! Events pushed to every connection of a tenant after a mutation commits.
//!
//! Wire shape is `{"type": "<event>", "data": {...}}`. Task payloads repeat
//! the event name inside `data.type`, which existing clients rely on.

use tt_core::{Task, TaskStatus, User, UserRole};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TenantEvent {
    TaskCreate(TaskPayload),
    TaskUpdate(TaskPayload),
    TaskDelete(DeletedPayload),
    NewMember(MemberPayload),
    MemberRemoved(DeletedPayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub user_id: Option<i64>,
    pub assigned_user_id: Option<i64>,
    pub tenant_id: i64,
    #[serde(rename = "type")]
    pub event_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedPayload {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPayload {
    pub id: i64,
    pub email: String,
    pub tenant_id: i64,
    pub role: UserRole,
}

impl TenantEvent {
    pub fn task_created(task: &Task) -> Self {
        Self::TaskCreate(TaskPayload::new(task, "task_create"))
    }

    pub fn task_updated(task: &Task) -> Self {
        Self::TaskUpdate(TaskPayload::new(task, "task_update"))
    }

    pub fn task_deleted(task_id: i64) -> Self {
        Self::TaskDelete(DeletedPayload { id: task_id })
    }

    pub fn member_joined(user: &User) -> Self {
        Self::NewMember(MemberPayload {
            id: user.id,
            email: user.email.clone(),
            tenant_id: user.tenant_id,
            role: user.role,
        })
    }

    pub fn member_removed(user_id: i64) -> Self {
        Self::MemberRemoved(DeletedPayload { id: user_id })
    }

    /// Value of the top-level `type` field
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TaskCreate(_) => "task_create",
            Self::TaskUpdate(_) => "task_update",
            Self::TaskDelete(_) => "task_delete",
            Self::NewMember(_) => "new_member",
            Self::MemberRemoved(_) => "member_removed",
        }
    }
}

impl TaskPayload {
    fn new(task: &Task, event_type: &str) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            user_id: task.user_id,
            assigned_user_id: task.assigned_user_id,
            tenant_id: task.tenant_id,
            event_type: event_type.to_string(),
        }
    }
}
