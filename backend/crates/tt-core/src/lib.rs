pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::task::{NewTask, Task};
pub use models::task_status::TaskStatus;
pub use models::tenant::Tenant;
pub use models::user::{NewUser, User};
pub use models::user_role::UserRole;

#[cfg(test)]
mod tests;
