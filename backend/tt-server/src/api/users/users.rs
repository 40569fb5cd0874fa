//! User REST API handlers
//!
//! Membership changes are pushed to the tenant's WebSocket subscribers after
//! the write commits.

use crate::{
    AdminUser, ApiError, ApiResult, CurrentUser, InviteUserRequest, MessageResponse,
    RequestValidator,
};

use tt_auth::hash_password;
use tt_core::{NewUser, User};
use tt_db::UserRepository;
use tt_ws::{AppState, TenantEvent};

use axum::{
    Json,
    extract::{Path, State},
};

/// GET /users/me
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// GET /users
///
/// All members of the caller's tenant
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool.clone())
        .find_by_tenant(user.tenant_id)
        .await?;

    Ok(Json(users))
}

/// POST /users/invite
///
/// Create a user inside the admin's tenant. Broadcasts `new_member`.
pub async fn invite_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(req): Json<InviteUserRequest>,
) -> ApiResult<Json<User>> {
    let email = RequestValidator::email(&req.email)?;
    RequestValidator::password(&req.password)?;

    let repo = UserRepository::new(state.pool.clone());
    if repo.find_by_email(&email).await?.is_some() {
        return Err(ApiError::bad_request("Email already registered"));
    }

    let user = repo
        .create(&NewUser {
            email,
            password_hash: hash_password(&req.password)?,
            tenant_id: admin.tenant_id,
            role: req.role,
        })
        .await?;

    log::info!(
        "User {} invited to tenant {} as {} by {}",
        user.id,
        user.tenant_id,
        user.role,
        admin.id
    );

    state
        .broadcaster
        .publish(user.tenant_id.to_string(), TenantEvent::member_joined(&user));

    Ok(Json(user))
}

/// DELETE /users/remove_user/{user_id}
///
/// Remove a member from the admin's tenant. Tasks they created or were
/// assigned keep existing with the reference cleared. The member's open
/// sockets are closed before `member_removed` goes out to everyone else.
pub async fn remove_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    if admin.id == user_id {
        return Err(ApiError::bad_request("You cannot remove yourself"));
    }

    let repo = UserRepository::new(state.pool.clone());

    let target = repo
        .find_in_tenant(user_id, admin.tenant_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found in this tenant"))?;

    if repo.count_by_tenant(admin.tenant_id).await? <= 1 {
        return Err(ApiError::bad_request(
            "A tenant must keep at least one member",
        ));
    }

    if !repo.delete(target.id).await? {
        return Err(ApiError::not_found("User not found in this tenant"));
    }

    log::info!(
        "User {} removed from tenant {} by {}",
        target.id,
        admin.tenant_id,
        admin.id
    );

    let tenant_key = admin.tenant_id.to_string();
    state
        .broadcaster
        .disconnect_user(&tenant_key, target.id)
        .await;
    state
        .broadcaster
        .publish(tenant_key, TenantEvent::member_removed(target.id));

    Ok(Json(MessageResponse::new("User successfully removed.")))
}
