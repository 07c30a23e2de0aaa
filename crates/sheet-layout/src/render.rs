//! Replays a [`DocumentLayout`] onto a [`Canvas`].

use tracing::debug;

use crate::RenderError;
use crate::canvas::{Canvas, LABEL_FONT};
use crate::geometry::fit_within;
use crate::layout::{DocumentLayout, Placement};
use crate::pdf::PdfCanvas;

/// Draw every placement of `layout`, breaking pages where the layout does.
pub fn render_document<C: Canvas>(
    layout: &DocumentLayout<'_>,
    canvas: &mut C,
) -> Result<(), RenderError> {
    for (index, page) in layout.pages().iter().enumerate() {
        debug!(
            page = index + 1,
            placements = page.placements().len(),
            "Rendering page"
        );
        canvas.set_font(LABEL_FONT);

        for placement in page.placements() {
            match placement {
                Placement::Text { x, y, text } => canvas.draw_string(*x, *y, text),
                Placement::Image { rect, image, fit } => {
                    let target = if fit.preserve_aspect_ratio {
                        fit_within(*rect, image.width(), image.height())
                    } else {
                        *rect
                    };
                    canvas.draw_image(image, target, fit.auto_mask)?;
                }
            }
        }

        canvas.show_page();
    }

    Ok(())
}

/// Render `layout` to a complete PDF document.
pub fn render_pdf(layout: &DocumentLayout<'_>) -> Result<Vec<u8>, RenderError> {
    let mut canvas = PdfCanvas::new(layout.page_size());
    render_document(layout, &mut canvas)?;
    Ok(canvas.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Font;
    use crate::geometry::Rect;
    use crate::layout::{LayoutOptions, Person, layout_document};
    use image::{GrayImage, Luma};
    use image_processor::NormalizedImage;

    #[derive(Debug, PartialEq)]
    enum Op {
        Font(Font),
        Text(f32, f32, String),
        Image(Rect, bool),
        ShowPage,
    }

    #[derive(Default)]
    struct RecordingCanvas {
        ops: Vec<Op>,
    }

    impl Canvas for RecordingCanvas {
        fn set_font(&mut self, font: Font) {
            self.ops.push(Op::Font(font));
        }

        fn draw_string(&mut self, x: f32, y: f32, text: &str) {
            self.ops.push(Op::Text(x, y, text.to_string()));
        }

        fn draw_image(
            &mut self,
            _image: &NormalizedImage,
            rect: Rect,
            auto_mask: bool,
        ) -> Result<(), RenderError> {
            self.ops.push(Op::Image(rect, auto_mask));
            Ok(())
        }

        fn show_page(&mut self) {
            self.ops.push(Op::ShowPage);
        }
    }

    fn fingerprint(width: u32, height: u32) -> NormalizedImage {
        NormalizedImage::from_gray(&GrayImage::from_pixel(width, height, Luma([0]))).unwrap()
    }

    #[test]
    fn renders_alice_with_two_fitted_images() {
        // 11x13 matches the 110x130 box exactly
        let persons = vec![Person::new(
            "Alice",
            vec![fingerprint(11, 13), fingerprint(11, 13)],
        )];
        let layout = layout_document(&persons, &LayoutOptions::default()).unwrap();

        let mut canvas = RecordingCanvas::default();
        render_document(&layout, &mut canvas).unwrap();

        assert_eq!(
            canvas.ops,
            vec![
                Op::Font(LABEL_FONT),
                Op::Text(50.0, 742.0, "Alice".to_string()),
                Op::Image(Rect::new(200.0, 622.0, 110.0, 130.0), true),
                Op::Image(Rect::new(320.0, 622.0, 110.0, 130.0), true),
                Op::ShowPage,
            ]
        );
    }

    #[test]
    fn square_image_is_centred_in_its_box() {
        let persons = vec![Person::new("Bob", vec![fingerprint(10, 10)])];
        let layout = layout_document(&persons, &LayoutOptions::default()).unwrap();

        let mut canvas = RecordingCanvas::default();
        render_document(&layout, &mut canvas).unwrap();

        let rect = canvas
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Image(rect, _) => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert_eq!(rect, Rect::new(200.0, 632.0, 110.0, 110.0));
    }

    #[test]
    fn font_is_reset_on_every_page() {
        let persons: Vec<Person> = (0..7)
            .map(|i| Person::new(format!("P{i}"), vec![fingerprint(2, 2)]))
            .collect();
        let layout = layout_document(&persons, &LayoutOptions::default()).unwrap();

        let mut canvas = RecordingCanvas::default();
        render_document(&layout, &mut canvas).unwrap();

        let fonts = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Font(_)))
            .count();
        let breaks = canvas.ops.iter().filter(|op| **op == Op::ShowPage).count();
        assert_eq!(fonts, 2);
        assert_eq!(breaks, 2);
        assert_eq!(canvas.ops[canvas.ops.len() - 1], Op::ShowPage);
    }

    #[test]
    fn render_pdf_produces_pdf_bytes() {
        let persons = vec![Person::new("Alice", vec![fingerprint(8, 8)])];
        let layout = layout_document(&persons, &LayoutOptions::default()).unwrap();
        let bytes = render_pdf(&layout).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
