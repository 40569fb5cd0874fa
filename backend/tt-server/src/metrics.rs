//! Prometheus recorder and `/metrics` endpoint.

use crate::error::{Result as ServerErrorResult, ServerError};

use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the global recorder. Call once, before any metric is recorded.
pub fn install_recorder() -> ServerErrorResult<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics {
            message: e.to_string(),
        })?;

    log::info!("Prometheus metrics recorder installed");
    Ok(handle)
}

/// `GET /metrics` rendering the Prometheus text format
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new().route(
        "/metrics",
        get(move || std::future::ready(handle.render())),
    )
}
