//! Fingerprint sheet upload API.

use axum::body::Body;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::Response;

use super::ApiError;
use super::form::{FieldKind, FormCollector, classify_field};
use crate::app::SharedState;
use crate::services::sheet::{PersonUpload, SheetService, UploadedFile};

/// File name offered to the browser for the generated document.
pub const DOWNLOAD_NAME: &str = "fingerprints_list.pdf";

/// POST / – Turn uploaded fingerprints into a PDF sheet
pub async fn create_sheet(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let uploads = read_uploads(multipart).await?;
    let service = SheetService::new(state.layout_options().clone());

    // Cheap checks happen before the blocking pool is involved
    service
        .validate(&uploads)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let pdf = tokio::task::spawn_blocking(move || service.build_pdf(uploads))
        .await
        .map_err(|e| ApiError::Internal(format!("Sheet task panicked: {e}")))??;

    Response::builder()
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{DOWNLOAD_NAME}\""),
        )
        .body(Body::from(pdf))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Drain the multipart body into person records.
async fn read_uploads(mut multipart: Multipart) -> Result<Vec<PersonUpload>, ApiError> {
    let mut form = FormCollector::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match classify_field(&name) {
            FieldKind::Name => form.push_name(field.text().await?),
            FieldKind::Fingerprint(index) => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await?;
                tracing::debug!(
                    index,
                    file_name = %file_name,
                    len = bytes.len(),
                    "Received fingerprint"
                );
                form.push_file(index, UploadedFile { file_name, bytes });
            }
            FieldKind::Other => {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    Ok(form.into_records())
}
