use crate::repositories::row::{TENANT_COLUMNS, USER_COLUMNS, tenant_from_row, user_from_row};
use crate::{DbError, Result as DbErrorResult};

use tt_core::{NewUser, Tenant, User};

use std::panic::Location;

use error_location::ErrorLocation;
use sqlx::SqlitePool;

pub struct TenantRepository {
    pool: SqlitePool,
}

impl TenantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str) -> DbErrorResult<Tenant> {
        let result = sqlx::query("INSERT INTO tenants (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(Tenant {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Create a tenant and its first (admin) user atomically.
    /// `admin.tenant_id` is ignored and replaced by the new tenant's id.
    pub async fn create_with_admin(
        &self,
        name: &str,
        admin: &NewUser,
    ) -> DbErrorResult<(Tenant, User)> {
        let mut tx = self.pool.begin().await?;

        let tenant_id = sqlx::query("INSERT INTO tenants (name) VALUES (?)")
            .bind(name)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        let user_id = sqlx::query(
            "INSERT INTO users (email, password_hash, tenant_id, role) VALUES (?, ?, ?, ?)",
        )
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(tenant_id)
        .bind(admin.role.as_str())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let user_row = sqlx::query(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
        let user = user_from_row(&user_row)?;

        tx.commit().await?;

        Ok((
            Tenant {
                id: tenant_id,
                name: name.to_string(),
            },
            user,
        ))
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Tenant>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM tenants WHERE id = ?",
            TENANT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(tenant_from_row).transpose()
    }

    pub async fn find_by_name(&self, name: &str) -> DbErrorResult<Option<Tenant>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM tenants WHERE name = ?",
            TENANT_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(tenant_from_row).transpose()
    }

    pub async fn update_name(&self, id: i64, name: &str) -> DbErrorResult<Tenant> {
        let result = sqlx::query("UPDATE tenants SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::InvalidRow {
                table: "tenants",
                message: format!("tenant {} does not exist", id),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Tenant {
            id,
            name: name.to_string(),
        })
    }
}
