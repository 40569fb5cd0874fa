use crate::Result as DbErrorResult;
use crate::repositories::row::{TASK_COLUMNS, task_from_row};

use tt_core::{NewTask, Task};

use sqlx::SqlitePool;

pub struct TaskRepository {
    pool: SqlitePool,
}

impl TaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, task: &NewTask) -> DbErrorResult<Task> {
        let id = sqlx::query(
            r#"
                INSERT INTO tasks (title, description, status, completed, user_id, assigned_user_id, tenant_id)
                VALUES (?, ?, ?, 0, ?, ?, ?)
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.user_id)
        .bind(task.assigned_user_id)
        .bind(task.tenant_id)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Task {
            id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            completed: false,
            user_id: Some(task.user_id),
            assigned_user_id: task.assigned_user_id,
            tenant_id: task.tenant_id,
        })
    }

    /// Look a task up by id, only if it belongs to `tenant_id`
    pub async fn find_in_tenant(&self, id: i64, tenant_id: i64) -> DbErrorResult<Option<Task>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM tasks WHERE id = ? AND tenant_id = ?",
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(task_from_row).transpose()
    }

    /// All tasks of a tenant, optionally only those assigned to `assigned_to`
    pub async fn find_by_tenant(
        &self,
        tenant_id: i64,
        assigned_to: Option<i64>,
    ) -> DbErrorResult<Vec<Task>> {
        let rows = match assigned_to {
            Some(user_id) => {
                sqlx::query(&format!(
                    "SELECT {} FROM tasks WHERE tenant_id = ? AND assigned_user_id = ? ORDER BY id",
                    TASK_COLUMNS
                ))
                .bind(tenant_id)
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM tasks WHERE tenant_id = ? ORDER BY id",
                    TASK_COLUMNS
                ))
                .bind(tenant_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(task_from_row).collect()
    }

    /// Persist every mutable field of `task`. Returns whether the row existed in its tenant.
    pub async fn update(&self, task: &Task) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE tasks
                SET title = ?, description = ?, status = ?, completed = ?, assigned_user_id = ?
                WHERE id = ? AND tenant_id = ?
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.completed)
        .bind(task.assigned_user_id)
        .bind(task.id)
        .bind(task.tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64, tenant_id: i64) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND tenant_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
