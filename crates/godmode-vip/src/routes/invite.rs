//! Invite pass data for the interactive page.
//!
//! Serves `GET /api/invite/{id}` as JSON: the creator's pass (initials, card
//! id, VIP code, redeem URL, numbered share codes, share-all text) plus the
//! localized header title. Unlike the responder, an unknown id is a 404 here.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use godmode_core::{InvitePass, detect_locale};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Query parameters for the invite endpoint.
#[derive(Debug, Deserialize)]
pub struct InviteQuery {
    lang: Option<String>,
}

/// Successful invite response.
#[derive(Debug, Serialize)]
pub struct InviteResponse {
    locale: &'static str,
    header_title: String,
    #[serde(flatten)]
    pass: InvitePass,
}

/// Handle `GET /api/invite/{id}`.
pub async fn invite_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<InviteQuery>,
    headers: HeaderMap,
) -> Response {
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let locale = detect_locale(query.lang.as_deref(), accept_language);
    let localizer = state.locales.get(locale);

    let Some(record) = state
        .directory
        .find(id.trim(), state.config.directory_timeout)
        .await
    else {
        tracing::debug!(id = %id, "invite not found");
        let body = serde_json::json!({
            "error": "not_found",
            "message": localizer.t("vip.toast.not_found", &[]),
        });
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    };

    let pass = InvitePass::from_record(&record);
    let header_title = localizer.t("vip.header_title", &[("name", pass.name.as_str())]);

    Json(InviteResponse {
        locale,
        header_title,
        pass,
    })
    .into_response()
}
