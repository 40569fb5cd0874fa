//! Row to model mapping shared by the repositories.

use crate::{DbError, Result as DbErrorResult};

use tt_core::{Task, TaskStatus, Tenant, User, UserRole};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

pub(crate) const TENANT_COLUMNS: &str = "id, name";
pub(crate) const USER_COLUMNS: &str = "id, email, password_hash, tenant_id, role";
pub(crate) const TASK_COLUMNS: &str =
    "id, title, description, status, completed, user_id, assigned_user_id, tenant_id";

pub(crate) fn tenant_from_row(row: &SqliteRow) -> DbErrorResult<Tenant> {
    Ok(Tenant {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

#[track_caller]
pub(crate) fn user_from_row(row: &SqliteRow) -> DbErrorResult<User> {
    let role: String = row.try_get("role")?;

    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        tenant_id: row.try_get("tenant_id")?,
        role: UserRole::from_str(&role).map_err(|e| DbError::InvalidRow {
            table: "users",
            message: format!("Invalid UserRole in users.role: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
    })
}

#[track_caller]
pub(crate) fn task_from_row(row: &SqliteRow) -> DbErrorResult<Task> {
    let status: String = row.try_get("status")?;

    Ok(Task {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status: TaskStatus::from_str(&status).map_err(|e| DbError::InvalidRow {
            table: "tasks",
            message: format!("Invalid TaskStatus in tasks.status: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        completed: row.try_get("completed")?,
        user_id: row.try_get("user_id")?,
        assigned_user_id: row.try_get("assigned_user_id")?,
        tenant_id: row.try_get("tenant_id")?,
    })
}
