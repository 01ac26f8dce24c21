//! VIP invite responder routes.
//!
//! `/api/vip` always classifies and responds. `/vip` does the same until the
//! loop breaker is present; from then on it serves the interactive page, so
//! a client that follows a redirect never re-enters the responder.

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use url::form_urlencoded;

use crate::error::VipError;
use crate::respond::{self, InboundRequest, LOOP_BREAKER_PARAM};
use crate::state::AppState;

/// Handle `GET /api/vip`.
pub async fn vip_responder(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, VipError> {
    let (parts, _body) = request.into_parts();
    let inbound = InboundRequest::from_parts(
        parts.method,
        &parts.uri,
        parts.headers,
        state.config.public_origin.as_deref(),
    )?;

    let classification = state.signatures.classify(inbound.user_agent());
    tracing::debug!(
        classification = ?classification,
        user_agent = %inbound.user_agent(),
        "request classified"
    );

    Ok(respond::synthesize(&state, &inbound, classification).await)
}

/// Handle `GET /vip`.
pub async fn vip_page(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, VipError> {
    let loop_broken = request.uri().query().is_some_and(|query| {
        form_urlencoded::parse(query.as_bytes()).any(|(k, _)| k == LOOP_BREAKER_PARAM)
    });

    if !loop_broken {
        return vip_responder(State(state), request).await;
    }

    tracing::debug!(page = %state.config.page_path.display(), "serving interactive page");
    match ServeFile::new(&state.config.page_path).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(never) => match never {},
    }
}
