//! Image processing utilities for printable fingerprint scans.
//!
//! Provides Gaussian smoothing, adaptive Gaussian thresholding and the
//! decode → binarize → PNG pipeline that turns an uploaded scan into a
//! [`NormalizedImage`].

pub mod kernel;
pub mod normalize;
pub mod threshold;

// Re-exports for convenience
pub use kernel::{BorderMode, gaussian_blur, gaussian_blur_with_border, gaussian_kernel};
pub use normalize::{NormalizedImage, encode_png, normalize_fingerprint};
pub use threshold::adaptive_threshold_gaussian;

/// Side length of the smoothing kernel applied before thresholding.
pub const BLUR_KERNEL_SIZE: u32 = 5;

/// Side length of the neighbourhood used for the local threshold.
pub const THRESHOLD_BLOCK_SIZE: u32 = 11;

/// Constant subtracted from the weighted local mean.
pub const THRESHOLD_OFFSET: f32 = 2.0;

/// Errors that can occur while normalizing an image.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Image data is empty")]
    EmptyInput,

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Block size must be odd and at least 3, got {0}")]
    InvalidBlockSize(u32),
}

/// Result type alias for image processing operations.
pub type Result<T> = std::result::Result<T, ProcessError>;
