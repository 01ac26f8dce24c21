//! Liveness endpoint for the VIP responder.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Liveness report with the responder's loaded configuration.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    /// `local` or `remote` creator directory.
    directory: &'static str,
    /// Crawler signatures in the active registry.
    signatures: usize,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "godmode-vip",
        version: env!("CARGO_PKG_VERSION"),
        directory: state.directory.kind(),
        signatures: state.signatures.len(),
    })
}
