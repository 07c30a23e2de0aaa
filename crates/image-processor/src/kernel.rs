//! Separable Gaussian kernels and smoothing.
//!
//! Kernel weights follow the usual "sigma from size" rule so that a 5×5
//! blur and an 11×11 weighted mean behave like their OpenCV counterparts.
//! Out-of-range taps are resolved by a [`BorderMode`].

use image::{GrayImage, Luma};
use tracing::debug;

/// Fixed binomial kernels used for small sizes when no sigma is given.
const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Sigma implied by a kernel size.
pub fn sigma_for_size(size: u32) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Build a normalized 1-D Gaussian kernel of odd length `size`.
pub fn gaussian_kernel(size: u32) -> Vec<f32> {
    debug_assert!(size % 2 == 1, "kernel size must be odd");

    if size <= 7 {
        return SMALL_KERNELS[(size / 2) as usize].to_vec();
    }

    let sigma = sigma_for_size(size);
    let radius = (size / 2) as f32;
    let scale = -0.5 / (sigma * sigma);
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - radius;
            (scale * x * x).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// How taps that fall outside the image are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderMode {
    /// Mirror without repeating the edge pixel: `dcb|abcd|cba`.
    Reflect101,
    /// Repeat the edge pixel: `aaa|abcd|ddd`.
    Replicate,
}

impl BorderMode {
    /// Map a possibly out-of-range coordinate into `0..len`.
    fn resolve(self, index: i64, len: i64) -> usize {
        match self {
            Self::Reflect101 => reflect_101(index, len),
            Self::Replicate => index.clamp(0, len - 1) as usize,
        }
    }
}

/// Map an out-of-range coordinate back into `0..len` by reflect-101.
fn reflect_101(index: i64, len: i64) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let mut i = index.rem_euclid(period);
    if i >= len {
        i = period - i;
    }
    i as usize
}

/// Smooth a grayscale image with a `size`×`size` Gaussian kernel and
/// reflect-101 borders.
pub fn gaussian_blur(img: &GrayImage, size: u32) -> GrayImage {
    gaussian_blur_with_border(img, size, BorderMode::Reflect101)
}

/// Smooth a grayscale image with a `size`×`size` Gaussian kernel.
///
/// The kernel is applied as two 1-D passes; results are rounded back to u8.
pub fn gaussian_blur_with_border(img: &GrayImage, size: u32, border: BorderMode) -> GrayImage {
    let (width, height) = img.dimensions();
    debug!(width, height, size, ?border, "Applying Gaussian blur");

    if width == 0 || height == 0 {
        return img.clone();
    }

    let kernel = gaussian_kernel(size);
    let radius = (kernel.len() / 2) as i64;
    let (w, h) = (width as usize, height as usize);

    // Horizontal pass into a float buffer
    let mut horizontal = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = border.resolve(x as i64 + k as i64 - radius, w as i64);
                acc += weight * f32::from(img.get_pixel(sx as u32, y as u32).0[0]);
            }
            horizontal[y * w + x] = acc;
        }
    }

    // Vertical pass back to u8
    let mut output = GrayImage::new(width, height);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = border.resolve(y as i64 + k as i64 - radius, h as i64);
                acc += weight * horizontal[sy * w + x];
            }
            let val = acc.round().clamp(0.0, 255.0) as u8;
            output.put_pixel(x as u32, y as u32, Luma([val]));
        }
    }

    output
}
