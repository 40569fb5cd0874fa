use crate::tests::create_test_state;
use crate::{AdminUser, ApiError, CurrentUser};

use tt_auth::{Claims, hash_password};
use tt_core::{NewUser, User, UserRole};
use tt_db::{TenantRepository, UserRepository};
use tt_ws::AppState;

use axum::{body::Body, extract::FromRequestParts, http::Request};
use http::StatusCode;

async fn seed_admin_and_member(state: &AppState) -> (User, User) {
    let (tenant, admin) = TenantRepository::new(state.pool.clone())
        .create_with_admin(
            "Acme",
            &NewUser {
                email: "admin@acme.test".into(),
                password_hash: hash_password("pw").unwrap(),
                tenant_id: 0,
                role: UserRole::Admin,
            },
        )
        .await
        .unwrap();

    let member = UserRepository::new(state.pool.clone())
        .create(&NewUser {
            email: "member@acme.test".into(),
            password_hash: hash_password("pw").unwrap(),
            tenant_id: tenant.id,
            role: UserRole::Member,
        })
        .await
        .unwrap();

    (admin, member)
}

fn parts_with(authorization: Option<&str>) -> http::request::Parts {
    let mut builder = Request::builder().uri("/users/me");
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::empty()).unwrap().into_parts().0
}

fn rejection_status(result: Result<impl Sized, ApiError>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status(),
    }
}

#[tokio::test]
async fn test_current_user_with_valid_token() {
    let state = create_test_state().await;
    let (admin, _) = seed_admin_and_member(&state).await;
    let token = state.jwt_issuer.issue(&admin).unwrap();

    let mut parts = parts_with(Some(&format!("Bearer {token}")));
    let CurrentUser(user) = CurrentUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap();

    assert_eq!(user.id, admin.id);
    assert_eq!(user.tenant_id, admin.tenant_id);
}

#[tokio::test]
async fn test_current_user_without_header_is_unauthorized() {
    let state = create_test_state().await;

    let mut parts = parts_with(None);
    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    assert_eq!(rejection_status(result), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_with_basic_scheme_is_unauthorized() {
    let state = create_test_state().await;

    let mut parts = parts_with(Some("Basic dXNlcjpwdw=="));
    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    assert_eq!(rejection_status(result), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_with_garbage_token_is_unauthorized() {
    let state = create_test_state().await;

    let mut parts = parts_with(Some("Bearer not.a.jwt"));
    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    assert_eq!(rejection_status(result), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_for_deleted_user_is_unauthorized() {
    let state = create_test_state().await;
    let (_, member) = seed_admin_and_member(&state).await;
    let token = state.jwt_issuer.issue(&member).unwrap();

    UserRepository::new(state.pool.clone())
        .delete(member.id)
        .await
        .unwrap();

    let mut parts = parts_with(Some(&format!("Bearer {token}")));
    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    assert_eq!(rejection_status(result), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_with_expired_token_is_unauthorized() {
    let state = create_test_state().await;
    let (admin, _) = seed_admin_and_member(&state).await;

    let mut claims: Claims = state.jwt_issuer.claims_for(&admin);
    claims.iat -= 7200;
    claims.exp = claims.iat + 60;
    let token = state.jwt_issuer.encode(&claims).unwrap();

    let mut parts = parts_with(Some(&format!("Bearer {token}")));
    let result = CurrentUser::from_request_parts(&mut parts, &state).await;

    assert_eq!(rejection_status(result), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_user_accepts_admin() {
    let state = create_test_state().await;
    let (admin, _) = seed_admin_and_member(&state).await;
    let token = state.jwt_issuer.issue(&admin).unwrap();

    let mut parts = parts_with(Some(&format!("Bearer {token}")));
    let result = AdminUser::from_request_parts(&mut parts, &state).await;

    assert_eq!(rejection_status(result), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_user_rejects_member_with_403() {
    let state = create_test_state().await;
    let (_, member) = seed_admin_and_member(&state).await;
    let token = state.jwt_issuer.issue(&member).unwrap();

    let mut parts = parts_with(Some(&format!("Bearer {token}")));
    let result = AdminUser::from_request_parts(&mut parts, &state).await;

    assert_eq!(rejection_status(result), StatusCode::FORBIDDEN);
}
