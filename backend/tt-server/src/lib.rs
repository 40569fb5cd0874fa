pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod metrics;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{login, signup},
        login_request::LoginRequest,
        signup_request::SignupRequest,
        signup_response::SignupResponse,
        token_response::{TOKEN_TYPE_BEARER, TokenResponse},
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::current_user::{AdminUser, CurrentUser},
    message_response::MessageResponse,
    request_validator::RequestValidator,
    tasks::{
        create_task_request::CreateTaskRequest,
        list_tasks_query::ListTasksQuery,
        tasks::{create_task, delete_task, get_task, list_tasks, update_task},
        update_task_request::UpdateTaskRequest,
    },
    tenants::{
        tenants::{get_my_tenant, update_my_tenant},
        update_tenant_request::UpdateTenantRequest,
    },
    users::{
        invite_user_request::InviteUserRequest,
        users::{get_me, invite_user, list_users, remove_user},
    },
};

pub use crate::routes::build_router;
