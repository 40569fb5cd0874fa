pub mod task;
pub mod task_status;
pub mod tenant;
pub mod user;
pub mod user_role;
