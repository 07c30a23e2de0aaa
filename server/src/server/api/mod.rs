//! Request handlers and the error type they share.

pub mod form;
pub mod sheet;

use axum::extract::multipart::MultipartError;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::services::sheet::SheetError;

/// Error returned to HTTP clients as a plain-text body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UnprocessableImage(String),

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Failed to generate document")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UnprocessableImage(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Multipart(e) => e.status(),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SheetError> for ApiError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::Validation(_) => Self::Validation(err.to_string()),
            SheetError::Unprocessable { .. } => Self::UnprocessableImage(err.to_string()),
            SheetError::Render(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(detail) => tracing::error!("Request failed: {detail}"),
            other => tracing::warn!(status = status.as_u16(), "Request rejected: {other}"),
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_processor::ProcessError;
    use sheet_layout::{LayoutError, RenderError};

    #[test]
    fn validation_maps_to_bad_request() {
        let err: ApiError = SheetError::Validation(LayoutError::FingerprintCount {
            name: "Alice".into(),
            count: 0,
            min: 1,
            max: 4,
        })
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Each person must upload 1 to 4 fingerprints. Error for Alice"
        );
    }

    #[test]
    fn decode_failure_maps_to_unprocessable() {
        let err: ApiError = SheetError::Unprocessable {
            name: "Bob".into(),
            file: "notes.txt".into(),
            source: ProcessError::Decode("unknown format".into()),
        }
        .into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.to_string().contains("Bob"));
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn render_failure_hides_details() {
        let err: ApiError = SheetError::Render(RenderError::Image("boom".into())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to generate document");
    }
}
