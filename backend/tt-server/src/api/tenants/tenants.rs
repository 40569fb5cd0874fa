//! Tenant REST API handlers

use crate::{AdminUser, ApiError, ApiResult, CurrentUser, RequestValidator, UpdateTenantRequest};

use tt_core::Tenant;
use tt_db::TenantRepository;
use tt_ws::AppState;

use axum::{Json, extract::State};

/// GET /tenants/me
pub async fn get_my_tenant(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Tenant>> {
    let tenant = TenantRepository::new(state.pool.clone())
        .find_by_id(user.tenant_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tenant not found"))?;

    Ok(Json(tenant))
}

/// PUT /tenants/me
///
/// Rename the caller's tenant. Admin only.
pub async fn update_my_tenant(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(req): Json<UpdateTenantRequest>,
) -> ApiResult<Json<Tenant>> {
    let name = RequestValidator::tenant_name(&req.name, &state.validation)?;

    let repo = TenantRepository::new(state.pool.clone());

    let current = repo
        .find_by_id(admin.tenant_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tenant not found"))?;

    if current.name == name {
        return Ok(Json(current));
    }

    if repo.find_by_name(&name).await?.is_some() {
        return Err(ApiError::bad_request("Tenant name already registered"));
    }

    let tenant = repo.update_name(current.id, &name).await?;
    log::info!("Tenant {} renamed to '{}'", tenant.id, tenant.name);

    Ok(Json(tenant))
}
