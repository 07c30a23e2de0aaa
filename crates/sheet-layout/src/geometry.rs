//! Page sizes and rectangle helpers, in PDF points with a bottom-left origin.

/// Physical page dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US Letter, 8.5 × 11 in.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Axis-aligned rectangle anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Largest rectangle with the image's aspect ratio that fits inside `bounds`,
/// centred on both axes.
///
/// Degenerate images (zero width or height) get the bounds unchanged.
pub fn fit_within(bounds: Rect, image_width: u32, image_height: u32) -> Rect {
    if image_width == 0 || image_height == 0 {
        return bounds;
    }

    let (iw, ih) = (image_width as f32, image_height as f32);
    let scale = (bounds.width / iw).min(bounds.height / ih);
    let (width, height) = (iw * scale, ih * scale);

    Rect {
        x: bounds.x + (bounds.width - width) / 2.0,
        y: bounds.y + (bounds.height - height) / 2.0,
        width,
        height,
    }
}
