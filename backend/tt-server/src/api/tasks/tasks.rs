//! Task REST API handlers
//!
//! Every read and write is scoped to the caller's tenant. Mutations publish a
//! `task_*` event to the tenant's WebSocket subscribers after the write
//! commits; the response never waits on that fan-out.

use crate::{
    ApiError, ApiResult, CreateTaskRequest, CurrentUser, ListTasksQuery, RequestValidator,
    UpdateTaskRequest,
};

use tt_core::{NewTask, Task, TaskStatus, User};
use tt_db::{TaskRepository, UserRepository};
use tt_ws::{AppState, TenantEvent};

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

// =============================================================================
// Handlers
// =============================================================================

/// GET /tasks?is_my_tasks=bool
pub async fn list_tasks(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let assigned_to = query.is_my_tasks.then_some(user.id);

    let tasks = TaskRepository::new(state.pool.clone())
        .find_by_tenant(user.tenant_id, assigned_to)
        .await?;

    Ok(Json(tasks))
}

/// POST /tasks
///
/// The caller becomes the task's creator. Broadcasts `task_create`.
pub async fn create_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let title = RequestValidator::title(&req.title, &state.validation)?;
    let description = RequestValidator::description(req.description.as_deref(), &state.validation)?;
    let status = match req.status.as_deref() {
        Some(s) => TaskStatus::from_str(s)?,
        None => TaskStatus::default(),
    };

    if let Some(assignee) = req.assigned_user_id {
        ensure_member(&state, &user, assignee).await?;
    }

    let new_task = NewTask {
        description,
        status,
        assigned_user_id: req.assigned_user_id,
        ..NewTask::new(title, user.id, user.tenant_id)
    };

    let task = TaskRepository::new(state.pool.clone())
        .create(&new_task)
        .await?;

    log::debug!("Task {} created in tenant {}", task.id, task.tenant_id);

    state
        .broadcaster
        .publish(task.tenant_id.to_string(), TenantEvent::task_created(&task));

    Ok(Json(task))
}

/// GET /tasks/{task_id}
pub async fn get_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = find_task(&state, &user, task_id).await?;
    Ok(Json(task))
}

/// PUT /tasks/{task_id}
///
/// Apply the fields present in the body. Broadcasts `task_update`.
pub async fn update_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let mut task = find_task(&state, &user, task_id).await?;

    if let Some(ref title) = req.title {
        task.title = RequestValidator::title(title, &state.validation)?;
    }
    if let Some(description) = req.description {
        task.description =
            RequestValidator::description(description.as_deref(), &state.validation)?;
    }
    if let Some(ref status) = req.status {
        task.status = TaskStatus::from_str(status)?;
    }
    if let Some(assignee) = req.assigned_user_id {
        if let Some(assignee_id) = assignee {
            ensure_member(&state, &user, assignee_id).await?;
        }
        task.assigned_user_id = assignee;
    }
    if let Some(completed) = req.completed {
        task.completed = completed;
    }

    let updated = TaskRepository::new(state.pool.clone())
        .update(&task)
        .await?;
    if !updated {
        // Deleted between the read and the write
        return Err(ApiError::not_found("Task not found"));
    }

    log::debug!("Task {} updated in tenant {}", task.id, task.tenant_id);

    state
        .broadcaster
        .publish(task.tenant_id.to_string(), TenantEvent::task_updated(&task));

    Ok(Json(task))
}

/// DELETE /tasks/{task_id}
///
/// Broadcasts `task_delete`.
pub async fn delete_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = TaskRepository::new(state.pool.clone())
        .delete(task_id, user.tenant_id)
        .await?;

    if !deleted {
        return Err(ApiError::not_found("Task not found"));
    }

    log::debug!("Task {} deleted from tenant {}", task_id, user.tenant_id);

    state
        .broadcaster
        .publish(user.tenant_id.to_string(), TenantEvent::task_deleted(task_id));

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

async fn find_task(state: &AppState, user: &User, task_id: i64) -> ApiResult<Task> {
    TaskRepository::new(state.pool.clone())
        .find_in_tenant(task_id, user.tenant_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))
}

/// Assignees must belong to the caller's tenant
async fn ensure_member(state: &AppState, user: &User, assignee_id: i64) -> ApiResult<()> {
    UserRepository::new(state.pool.clone())
        .find_in_tenant(assignee_id, user.tenant_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| {
            ApiError::validation(
                "assigned_user_id",
                format!("User {} is not a member of this tenant", assignee_id),
            )
        })
}
