//! The drawing surface a layout is rendered onto.

use image_processor::NormalizedImage;

use crate::RenderError;
use crate::geometry::Rect;

/// Font selection for text drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Base font name (one of the standard PDF fonts).
    pub name: &'static str,
    pub size: f32,
}

/// Font used for person names.
pub const LABEL_FONT: Font = Font {
    name: "Helvetica-Bold",
    size: 14.0,
};

/// Minimal page-oriented drawing API.
///
/// Coordinates are in points with the origin at the bottom-left of the page.
/// Drawing goes to the current page until [`Canvas::show_page`] closes it.
pub trait Canvas {
    /// Select the font for subsequent text. Fonts reset on every new page.
    fn set_font(&mut self, font: Font);

    /// Draw `text` with its baseline starting at (`x`, `y`).
    fn draw_string(&mut self, x: f32, y: f32, text: &str);

    /// Draw `image` stretched to fill `rect`.
    ///
    /// With `auto_mask`, any alpha channel in the image masks the drawing;
    /// opaque images draw the same either way.
    fn draw_image(
        &mut self,
        image: &NormalizedImage,
        rect: Rect,
        auto_mask: bool,
    ) -> Result<(), RenderError>;

    /// Close the current page and begin a new one.
    fn show_page(&mut self);
}
