//! Signup and login.
//!
//! Both return an HS256 access token; every other endpoint expects it as
//! `Authorization: Bearer <token>`.

use crate::{
    ApiError, ApiResult, LoginRequest, RequestValidator, SignupRequest, SignupResponse,
    TOKEN_TYPE_BEARER, TokenResponse,
};

use tt_auth::{hash_password, verify_password};
use tt_core::{NewUser, UserRole};
use tt_db::{TenantRepository, UserRepository};
use tt_ws::AppState;

use axum::{Json, extract::State};

/// POST /auth/signup
///
/// Create a tenant and its first user, who becomes the admin
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<Json<SignupResponse>> {
    let tenant_name = RequestValidator::tenant_name(&req.tenant_name, &state.validation)?;
    let email = RequestValidator::email(&req.email)?;
    RequestValidator::password(&req.password)?;

    let tenants = TenantRepository::new(state.pool.clone());
    if tenants.find_by_name(&tenant_name).await?.is_some() {
        return Err(ApiError::bad_request("Tenant name already registered"));
    }

    let users = UserRepository::new(state.pool.clone());
    if users.find_by_email(&email).await?.is_some() {
        return Err(ApiError::bad_request("Email already registered"));
    }

    let admin = NewUser {
        email,
        password_hash: hash_password(&req.password)?,
        tenant_id: 0,
        role: UserRole::Admin,
    };
    let (tenant, user) = tenants.create_with_admin(&tenant_name, &admin).await?;

    log::info!(
        "Tenant {} '{}' created by user {}",
        tenant.id,
        tenant.name,
        user.id
    );

    let access_token = state.jwt_issuer.issue(&user)?;

    Ok(Json(SignupResponse {
        user,
        access_token,
        token_type: TOKEN_TYPE_BEARER,
    }))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let email = req.email.trim().to_lowercase();

    let user = UserRepository::new(state.pool.clone())
        .find_by_email(&email)
        .await?;

    // Same response for unknown email and wrong password
    let user = match user {
        Some(user) if verify_password(&req.password, &user.password_hash)? => user,
        _ => {
            log::info!("Failed login attempt");
            return Err(ApiError::unauthorized("Incorrect email or password"));
        }
    };

    log::debug!("User {} logged in", user.id);

    Ok(Json(TokenResponse::bearer(state.jwt_issuer.issue(&user)?)))
}
