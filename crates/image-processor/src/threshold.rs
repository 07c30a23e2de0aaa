//! Adaptive thresholding for converting grayscale scans to black-and-white.
//!
//! Each pixel is compared against the Gaussian-weighted mean of its
//! neighbourhood minus a constant, so uneven lighting across a scan does
//! not wash out ridges the way a single global threshold would. The mean
//! is taken with replicated borders, so edge pixels are compared against
//! copies of themselves rather than mirrored neighbours.

use image::{GrayImage, Luma};
use tracing::debug;

use crate::kernel::{BorderMode, gaussian_blur_with_border};
use crate::{ProcessError, Result};

/// Binarize `img` against a Gaussian-weighted local mean.
///
/// A pixel becomes white (255) when `pixel - mean > -ceil(c)`, black (0)
/// otherwise. `block_size` is the side of the square neighbourhood and must
/// be odd and at least 3.
pub fn adaptive_threshold_gaussian(
    img: &GrayImage,
    block_size: u32,
    c: f32,
) -> Result<GrayImage> {
    if block_size < 3 || block_size % 2 == 0 {
        return Err(ProcessError::InvalidBlockSize(block_size));
    }

    let (width, height) = img.dimensions();
    debug!(
        width,
        height,
        block_size,
        c,
        "Applying adaptive Gaussian threshold"
    );

    let mean = gaussian_blur_with_border(img, block_size, BorderMode::Replicate);
    let delta = c.ceil() as i16;

    let mut output = GrayImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels() {
        let src = i16::from(pixel.0[0]);
        let local = i16::from(mean.get_pixel(x, y).0[0]);
        let val = if src - local > -delta { 255 } else { 0 };
        output.put_pixel(x, y, Luma([val]));
    }

    debug!("Adaptive threshold complete");
    Ok(output)
}
