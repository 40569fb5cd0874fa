pub mod task_repository;
pub mod tenant_repository;
pub mod user_repository;

mod row;
