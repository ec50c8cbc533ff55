use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::upstream::UpstreamError;

const DECODE_BODY: &str = "502 Bad Gateway\nThe job service returned an unexpected response";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The upstream call itself failed. `status` is the configured error status.
    #[error("Upstream error: {source}")]
    Upstream {
        status: StatusCode,
        source: UpstreamError,
    },

    #[error("Decode error: {0}")]
    Decode(UpstreamError),

    #[error("Template render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl AppError {
    /// Sorts an upstream failure into the transport or decode bucket.
    pub fn from_upstream(status: StatusCode, err: UpstreamError) -> Self {
        match err {
            UpstreamError::Decode(_) => AppError::Decode(err),
            source => AppError::Upstream { status, source },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Upstream { status, source } => {
                tracing::warn!("Upstream error: {source}");
                let body = format!(
                    "{} {}\nError: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default(),
                    source
                );
                (status, body).into_response()
            }
            AppError::Decode(e) => {
                tracing::error!("Decode error: {e}");
                (StatusCode::BAD_GATEWAY, DECODE_BODY).into_response()
            }
            AppError::Render(e) => {
                tracing::error!("Template render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "500 Internal Server Error",
                )
                    .into_response()
            }
        }
    }
}
