//! Fingerprint sheet pipeline: validate → normalize → lay out → render.
//!
//! Everything here is synchronous and CPU-bound; callers on the async
//! runtime run it inside `spawn_blocking`.

use axum::body::Bytes;
use image_processor::{ProcessError, normalize_fingerprint};
use sheet_layout::{
    LayoutError, LayoutOptions, Person, RenderError, check_person, layout_document, render_pdf,
};
use tracing::{debug, info};

/// One uploaded file.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// A part the browser sends for a file input left empty.
    pub fn is_placeholder(&self) -> bool {
        self.file_name.is_empty() && self.bytes.is_empty()
    }
}

/// A person as submitted: 1-based position, name and raw files.
#[derive(Debug, Clone)]
pub struct PersonUpload {
    pub position: usize,
    pub name: String,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error(transparent)]
    Validation(#[from] LayoutError),

    #[error("Could not read fingerprint '{file}' for {name}: {source}")]
    Unprocessable {
        name: String,
        file: String,
        #[source]
        source: ProcessError,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Builds PDF fingerprint sheets with fixed layout options.
#[derive(Debug, Clone)]
pub struct SheetService {
    options: LayoutOptions,
}

impl SheetService {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Reject the whole request if any record is malformed.
    ///
    /// Runs before any image is decoded so bad counts fail fast. An empty
    /// list is valid and renders as a blank page.
    pub fn validate(&self, uploads: &[PersonUpload]) -> Result<(), LayoutError> {
        for upload in uploads {
            check_person(
                upload.position,
                &upload.name,
                upload.files.len(),
                &self.options,
            )?;
        }
        Ok(())
    }

    /// Binarize every uploaded file, failing on the first unreadable one.
    pub fn normalize(&self, uploads: Vec<PersonUpload>) -> Result<Vec<Person>, SheetError> {
        uploads
            .into_iter()
            .map(|upload| -> Result<Person, SheetError> {
                let fingerprints = upload
                    .files
                    .iter()
                    .map(|file| {
                        normalize_fingerprint(&file.bytes).map_err(|source| {
                            SheetError::Unprocessable {
                                name: upload.name.clone(),
                                file: file.file_name.clone(),
                                source,
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                debug!(name = %upload.name, count = fingerprints.len(), "Normalized fingerprints");
                Ok(Person::new(upload.name, fingerprints))
            })
            .collect()
    }

    /// Run the full pipeline and return the PDF bytes.
    pub fn build_pdf(&self, uploads: Vec<PersonUpload>) -> Result<Vec<u8>, SheetError> {
        self.validate(&uploads)?;
        let persons = self.normalize(uploads)?;
        let layout = layout_document(&persons, &self.options)?;
        let pdf = render_pdf(&layout)?;

        info!(
            persons = persons.len(),
            pages = layout.page_count(),
            bytes = pdf.len(),
            "Fingerprint sheet generated"
        );
        Ok(pdf)
    }
}
