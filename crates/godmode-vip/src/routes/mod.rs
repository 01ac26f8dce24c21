//! Route definitions for the VIP service.
//!
//! ## Routes
//!
//! - `GET /vip` - Responder, or the interactive page once `_r` is present
//! - `GET /api/vip` - Responder, always
//! - `GET /api/invite/{id}` - Invite pass data for the interactive page (JSON)
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions

mod health;
mod invite;
mod vip;

use axum::Router;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::state::AppState;

/// Build the complete VIP service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/vip", get(vip::vip_page))
        .route("/api/vip", get(vip::vip_responder))
        .route("/api/invite/{id}", get(invite::invite_handler))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers.
///
/// Link-preview fetchers honor robots.txt, and they must reach `/vip`.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\n",
    )
}
