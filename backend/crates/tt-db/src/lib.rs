pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::pool::{create_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::task_repository::TaskRepository;
pub use repositories::tenant_repository::TenantRepository;
pub use repositories::user_repository::UserRepository;

pub use sqlx::SqlitePool;
