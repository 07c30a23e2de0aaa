//! Fingerprint normalization: decode, smooth, binarize, re-encode.

use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, GrayImage, ImageEncoder, ImageFormat};
use tracing::debug;

use crate::kernel::gaussian_blur;
use crate::threshold::adaptive_threshold_gaussian;
use crate::{BLUR_KERNEL_SIZE, ProcessError, Result, THRESHOLD_BLOCK_SIZE, THRESHOLD_OFFSET};

/// A binarized fingerprint ready for layout.
///
/// Holds the encoded PNG together with the dimensions it decodes to, so
/// downstream code never has to guess whether the bytes are an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl NormalizedImage {
    /// Wrap an already-binarized image, encoding it as PNG.
    pub fn from_gray(img: &GrayImage) -> Result<Self> {
        let png = encode_png(img)?;
        Ok(Self {
            png,
            width: img.width(),
            height: img.height(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded PNG bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Decode the PNG back into 8-bit grayscale pixels.
    pub fn decode(&self) -> Result<GrayImage> {
        let img = image::load_from_memory_with_format(&self.png, ImageFormat::Png)
            .map_err(|e| ProcessError::Decode(e.to_string()))?;
        Ok(img.to_luma8())
    }
}

/// Turn raw scan bytes into a print-ready black-and-white image.
///
/// Any raster format the `image` crate recognises is accepted. Colour input
/// is converted to grayscale first.
pub fn normalize_fingerprint(bytes: &[u8]) -> Result<NormalizedImage> {
    if bytes.is_empty() {
        return Err(ProcessError::EmptyInput);
    }

    let gray = image::load_from_memory(bytes)
        .map_err(|e| ProcessError::Decode(e.to_string()))?
        .to_luma8();
    let (width, height) = gray.dimensions();
    debug!(
        width,
        height,
        input_len = bytes.len(),
        "Decoded fingerprint"
    );

    let blurred = gaussian_blur(&gray, BLUR_KERNEL_SIZE);
    let binary = adaptive_threshold_gaussian(&blurred, THRESHOLD_BLOCK_SIZE, THRESHOLD_OFFSET)?;

    let normalized = NormalizedImage::from_gray(&binary)?;
    debug!(output_len = normalized.png.len(), "Fingerprint normalized");
    Ok(normalized)
}

/// Encode a grayscale image as an uncompressed, unfiltered PNG.
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    let encoder = PngEncoder::new_with_quality(
        &mut cursor,
        CompressionType::Uncompressed,
        FilterType::NoFilter,
    );
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::L8,
        )
        .map_err(|e| ProcessError::Encode(e.to_string()))?;
    Ok(cursor.into_inner())
}
