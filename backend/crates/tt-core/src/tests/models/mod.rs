mod task;
mod task_status;
mod user_role;
