//! Static file serving for the upload form (assets/).

use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "assets/"]
struct FormAssets;

/// GET / – the upload form.
pub async fn upload_form() -> Response {
    serve_embedded::<FormAssets>("index.html")
}

/// Fallback handler: serve any other embedded asset, 404 otherwise.
pub async fn static_fallback(uri: Uri) -> Response {
    serve_embedded::<FormAssets>(uri.path().trim_start_matches('/'))
}

fn serve_embedded<E: Embed>(path: &str) -> Response {
    match E::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
