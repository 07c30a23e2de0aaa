//! Page layout and PDF rendering for fingerprint sheets.
//!
//! [`layout_document`] turns an ordered list of [`Person`] records into
//! positioned text and image placements across one or more pages;
//! [`render_document`] replays those placements onto any [`Canvas`], and
//! [`PdfCanvas`] is the canvas that produces the final PDF bytes.

pub mod canvas;
pub mod geometry;
pub mod layout;
pub mod pdf;
pub mod render;

// Re-exports for convenience
pub use canvas::{Canvas, Font, LABEL_FONT};
pub use geometry::{PageSize, Rect, fit_within};
pub use layout::{
    DocumentLayout, ImageFit, LayoutOptions, PageLayout, Person, Placement, check_person,
    image_width, layout_document,
};
pub use pdf::PdfCanvas;
pub use render::{render_document, render_pdf};

/// Errors raised while validating and laying out person records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Name is required for person #{position}")]
    MissingName { position: usize },

    #[error("Each person must upload {min} to {max} fingerprints. Error for {name}")]
    FingerprintCount {
        name: String,
        count: usize,
        min: usize,
        max: usize,
    },
}

/// Errors raised while drawing a layout onto a canvas.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to read image for embedding: {0}")]
    Image(String),

    #[error("Image has invalid dimensions {width}x{height}")]
    InvalidImage { width: u32, height: u32 },
}
