//! Axum extractors for REST API authentication

use crate::ApiError;

use tt_auth::extract_bearer;
use tt_core::User;
use tt_db::UserRepository;
use tt_ws::AppState;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// The authenticated caller, resolved from the bearer token to a live user row.
///
/// A valid token for a user that has since been removed is rejected.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            let token = extract_bearer(header)?;
            let claims = state.jwt_validator.validate(token)?;
            let user_id = claims.user_id()?;

            let user = UserRepository::new(state.pool.clone())
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| {
                    log::warn!("Token presented for unknown user {}", user_id);
                    ApiError::unauthorized("Could not validate credentials")
                })?;

            log::debug!("Authenticated user {} (tenant {})", user.id, user.tenant_id);
            Ok(CurrentUser(user))
        }
    }
}

/// A `CurrentUser` whose role is admin; members get 403
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

            if !user.is_admin() {
                return Err(ApiError::forbidden(
                    "Only tenant admins can perform this action",
                ));
            }

            Ok(AdminUser(user))
        }
    }
}
