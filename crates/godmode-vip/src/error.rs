//! Error types for the VIP responder.
//!
//! Errors are rendered as simple HTML error pages rather than JSON,
//! since crawlers and browsers are the only callers of the responder.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, html};

/// VIP service error type.
#[derive(Debug, thiserror::Error)]
pub enum VipError {
    /// The inbound request could not be turned into an absolute URL.
    #[error("invalid request url: {0}")]
    InvalidRequestUrl(String),

    /// The remote creator directory could not be fetched.
    #[error("directory fetch error: {0}")]
    DirectoryFetch(#[from] reqwest::Error),

    /// The creator directory could not be parsed or read.
    #[error("directory error: {0}")]
    Directory(#[from] godmode_core::Error),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for VipError {
    fn into_response(self) -> Response {
        match &self {
            Self::InvalidRequestUrl(msg) => {
                tracing::error!(error = %msg, "request url could not be constructed");
            }
            Self::DirectoryFetch(err) => {
                tracing::error!(error = %err, "directory fetch error");
            }
            Self::Directory(err) => {
                tracing::error!(error = %err, "directory error");
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
            }
        }

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { "Something went wrong — Godmode" }
                    meta name="robots" content="noindex";
                    style { (maud::PreEscaped(crate::render::ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { "Something went wrong" }
                        p { "We couldn't open this invite. Please try the link again in a moment." }
                    }
                }
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, markup).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_request_url() {
        let err = VipError::InvalidRequestUrl("relative URL without a base".to_string());
        assert_eq!(
            err.to_string(),
            "invalid request url: relative URL without a base"
        );
    }

    #[test]
    fn error_display_internal() {
        let err = VipError::Internal(anyhow::anyhow!("something broke"));
        assert_eq!(err.to_string(), "internal error: something broke");
    }

    #[test]
    fn error_display_directory() {
        let err = VipError::Directory(godmode_core::Error::UnknownLocale("fr".to_string()));
        assert!(err.to_string().starts_with("directory error:"));
    }

    #[test]
    fn error_into_response_is_server_error() {
        let response = VipError::InvalidRequestUrl("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = VipError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
