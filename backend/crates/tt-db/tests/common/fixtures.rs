use tt_core::{NewTask, NewUser, Tenant, User, UserRole};
use tt_db::{TenantRepository, UserRepository};

use sqlx::SqlitePool;

pub fn new_user(email: &str, tenant_id: i64, role: UserRole) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        tenant_id,
        role,
    }
}

pub fn new_task(title: &str, user_id: i64, tenant_id: i64) -> NewTask {
    NewTask::new(title.to_string(), user_id, tenant_id)
}

/// Inserts a tenant with one admin
pub async fn create_tenant_with_admin(pool: &SqlitePool, name: &str) -> (Tenant, User) {
    let admin = new_user(&format!("admin@{}.example.com", name), 0, UserRole::Admin);
    TenantRepository::new(pool.clone())
        .create_with_admin(name, &admin)
        .await
        .expect("Failed to create tenant")
}

pub async fn create_member(pool: &SqlitePool, tenant_id: i64, email: &str) -> User {
    UserRepository::new(pool.clone())
        .create(&new_user(email, tenant_id, UserRole::Member))
        .await
        .expect("Failed to create member")
}
