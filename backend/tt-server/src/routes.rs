use crate::{
    create_task, delete_task, get_me, get_my_tenant, get_task, health, invite_user, list_tasks,
    list_users, login, remove_user, signup, update_my_tenant, update_task,
};

use tt_config::ServerConfig;
use tt_ws::AppState;

use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;

/// Build the application router with all endpoints
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let router = Router::new()
        // WebSocket endpoint
        .route("/ws/{tenant_id}", get(tt_ws::handler))
        // Auth
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        // Tenants
        .route("/tenants/me", get(get_my_tenant).put(update_my_tenant))
        // Users
        .route("/users", get(list_users))
        .route("/users/me", get(get_me))
        .route("/users/invite", post(invite_user))
        .route("/users/remove_user/{user_id}", delete(remove_user))
        // Tasks
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{task_id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state);

    let router = match server.static_dir {
        Some(ref dir) => router.nest_service("/frontend", ServeDir::new(dir)),
        None => router,
    };

    router.layer(cors_layer(&server.cors_origins))
}

/// An empty origin list allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
