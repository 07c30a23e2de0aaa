//! [`Canvas`] implementation that writes a PDF document with `pdf-writer`.
//!
//! Text uses the standard Type1 fonts (no embedding) with WinAnsi encoding.
//! Every drawn image becomes its own DeviceGray image XObject, Flate
//! compressed; nothing is shared between placements.

use image_processor::NormalizedImage;
use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect as PdfRect, Ref, Str};
use tracing::debug;

use crate::RenderError;
use crate::canvas::{Canvas, Font};
use crate::geometry::{PageSize, Rect};

const COMPRESSION_LEVEL: u8 = 6;

/// Font used when text is drawn before any `set_font` on a page.
const DEFAULT_FONT: Font = Font {
    name: "Helvetica",
    size: 12.0,
};

/// A registered Type1 font: base name, resource name, object id.
struct FontEntry {
    base: &'static str,
    resource: String,
    id: Ref,
}

/// PDF document under construction.
pub struct PdfCanvas {
    pdf: Pdf,
    page_size: PageSize,
    catalog_id: Ref,
    page_tree_id: Ref,
    next_ref: i32,
    pages: Vec<Ref>,
    fonts: Vec<FontEntry>,
    content: Content,
    /// Index into `fonts` of the active font, plus its size.
    current_font: Option<(usize, f32)>,
    /// Font indices referenced by the current page.
    page_fonts: Vec<usize>,
    /// (resource name, object id) of images on the current page.
    page_images: Vec<(String, Ref)>,
    page_dirty: bool,
    image_count: usize,
}

impl PdfCanvas {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            pdf: Pdf::new(),
            page_size,
            catalog_id: Ref::new(1),
            page_tree_id: Ref::new(2),
            next_ref: 3,
            pages: Vec::new(),
            fonts: Vec::new(),
            content: Content::new(),
            current_font: None,
            page_fonts: Vec::new(),
            page_images: Vec::new(),
            page_dirty: false,
            image_count: 0,
        }
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_ref);
        self.next_ref += 1;
        r
    }

    /// Look up or register a standard font, returning its index.
    fn font_index(&mut self, base: &'static str) -> usize {
        if let Some(index) = self.fonts.iter().position(|f| f.base == base) {
            return index;
        }

        let id = self.alloc();
        self.pdf
            .type1_font(id)
            .base_font(Name(base.as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        self.fonts.push(FontEntry {
            base,
            resource: format!("F{}", self.fonts.len() + 1),
            id,
        });
        self.fonts.len() - 1
    }

    /// Write one image XObject.
    ///
    /// Normalized images are opaque grayscale, so no soft mask is needed.
    fn embed_image(&mut self, image: &NormalizedImage) -> Result<Ref, RenderError> {
        let gray = image
            .decode()
            .map_err(|e| RenderError::Image(e.to_string()))?;
        let (width, height) = gray.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidImage { width, height });
        }

        let compressed = compress_to_vec_zlib(gray.as_raw(), COMPRESSION_LEVEL);
        let id = self.alloc();
        let mut xobject = self.pdf.image_xobject(id, &compressed);
        xobject.filter(Filter::FlateDecode);
        xobject.width(width as i32);
        xobject.height(height as i32);
        xobject.color_space().device_gray();
        xobject.bits_per_component(8);
        xobject.finish();

        debug!(
            id = id.get(),
            width,
            height,
            bytes = compressed.len(),
            "Embedded image"
        );
        Ok(id)
    }

    /// Flush the current content stream into a page object.
    fn write_page(&mut self) {
        let page_id = self.alloc();
        let content_id = self.alloc();
        let content = std::mem::replace(&mut self.content, Content::new());
        self.pdf.stream(content_id, &content.finish());

        let mut page = self.pdf.page(page_id);
        let PageSize { width, height } = self.page_size;
        page.media_box(PdfRect::new(0.0, 0.0, width, height));
        page.parent(self.page_tree_id);
        page.contents(content_id);

        let mut resources = page.resources();
        if !self.page_fonts.is_empty() {
            let mut fonts = resources.fonts();
            for &index in &self.page_fonts {
                let entry = &self.fonts[index];
                fonts.pair(Name(entry.resource.as_bytes()), entry.id);
            }
            fonts.finish();
        }
        if !self.page_images.is_empty() {
            let mut x_objects = resources.x_objects();
            for (name, id) in &self.page_images {
                x_objects.pair(Name(name.as_bytes()), *id);
            }
            x_objects.finish();
        }
        resources.finish();
        page.finish();

        self.pages.push(page_id);
        self.page_fonts.clear();
        self.page_images.clear();
        self.current_font = None;
        self.page_dirty = false;
    }

    /// Number of pages closed so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Close any open page and serialize the document.
    ///
    /// A document with nothing drawn still gets one blank page.
    pub fn finish(mut self) -> Vec<u8> {
        if self.page_dirty || self.pages.is_empty() {
            self.write_page();
        }

        self.pdf
            .pages(self.page_tree_id)
            .kids(self.pages.iter().copied())
            .count(self.pages.len() as i32);
        self.pdf.catalog(self.catalog_id).pages(self.page_tree_id);

        debug!(
            pages = self.pages.len(),
            images = self.image_count,
            "PDF finished"
        );
        self.pdf.finish()
    }
}

impl Canvas for PdfCanvas {
    fn set_font(&mut self, font: Font) {
        let index = self.font_index(font.name);
        self.current_font = Some((index, font.size));
    }

    fn draw_string(&mut self, x: f32, y: f32, text: &str) {
        let (index, size) = match self.current_font {
            Some(font) => font,
            None => {
                let index = self.font_index(DEFAULT_FONT.name);
                (index, DEFAULT_FONT.size)
            }
        };
        if !self.page_fonts.contains(&index) {
            self.page_fonts.push(index);
        }

        let encoded = encode_win_ansi(text);
        let resource = &self.fonts[index].resource;
        self.content.begin_text();
        self.content.set_font(Name(resource.as_bytes()), size);
        self.content.next_line(x, y);
        self.content.show(Str(&encoded));
        self.content.end_text();
        self.page_dirty = true;
    }

    fn draw_image(
        &mut self,
        image: &NormalizedImage,
        rect: Rect,
        _auto_mask: bool,
    ) -> Result<(), RenderError> {
        let id = self.embed_image(image)?;
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);

        self.content.save_state();
        self.content.transform([rect.width, 0.0, 0.0, rect.height, rect.x, rect.y]);
        self.content.x_object(Name(name.as_bytes()));
        self.content.restore_state();

        self.page_images.push((name, id));
        self.page_dirty = true;
        Ok(())
    }

    fn show_page(&mut self) {
        self.write_page();
    }
}

/// Encode text for a WinAnsi standard font; unmappable characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            'Š' => 0x8a,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            'š' => 0x9a,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::LABEL_FONT;
    use image::{GrayImage, Luma};

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn fingerprint() -> NormalizedImage {
        NormalizedImage::from_gray(&GrayImage::from_pixel(6, 8, Luma([0]))).unwrap()
    }

    #[test]
    fn empty_canvas_still_has_one_page() {
        let canvas = PdfCanvas::new(PageSize::LETTER);
        let bytes = canvas.finish();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"/Count 1"));
    }

    #[test]
    fn text_and_image_are_written() {
        let mut canvas = PdfCanvas::new(PageSize::LETTER);
        canvas.set_font(LABEL_FONT);
        canvas.draw_string(50.0, 742.0, "Alice");
        canvas
            .draw_image(&fingerprint(), Rect::new(200.0, 622.0, 110.0, 130.0), true)
            .unwrap();
        canvas.show_page();
        assert_eq!(canvas.page_count(), 1);

        let bytes = canvas.finish();
        assert!(contains(&bytes, b"/Helvetica-Bold"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
        assert!(contains(&bytes, b"(Alice)"));
        assert!(contains(&bytes, b"/DeviceGray"));
        assert!(contains(&bytes, b"/FlateDecode"));
        assert!(contains(&bytes, b"/Im1"));
        assert!(contains(&bytes, b"/Count 1"));
        assert!(!contains(&bytes, b"/SMask"));
    }

    #[test]
    fn embedded_image_keeps_decoded_dimensions() {
        let image = NormalizedImage::from_gray(&GrayImage::from_pixel(7, 3, Luma([255]))).unwrap();
        let mut canvas = PdfCanvas::new(PageSize::LETTER);
        canvas
            .draw_image(&image, Rect::new(0.0, 0.0, 70.0, 30.0), true)
            .unwrap();

        let bytes = canvas.finish();
        assert!(contains(&bytes, b"/Width 7"));
        assert!(contains(&bytes, b"/Height 3"));
        assert!(contains(&bytes, b"/BitsPerComponent 8"));
        assert!(!contains(&bytes, b"/SMask"));
    }

    #[test]
    fn show_page_breaks_pages() {
        let mut canvas = PdfCanvas::new(PageSize::LETTER);
        canvas.set_font(LABEL_FONT);
        canvas.draw_string(50.0, 742.0, "One");
        canvas.show_page();
        canvas.set_font(LABEL_FONT);
        canvas.draw_string(50.0, 742.0, "Two");
        canvas.show_page();

        assert_eq!(canvas.page_count(), 2);
        let bytes = canvas.finish();
        assert!(contains(&bytes, b"/Count 2"));
    }

    #[test]
    fn pending_drawing_is_flushed_on_finish() {
        let mut canvas = PdfCanvas::new(PageSize::LETTER);
        canvas.draw_string(10.0, 10.0, "tail");
        let bytes = canvas.finish();
        assert!(contains(&bytes, b"/Count 1"));
        assert!(contains(&bytes, b"/Helvetica"));
    }

    #[test]
    fn win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Bob"), b"Bob".to_vec());
        assert_eq!(encode_win_ansi("José"), vec![b'J', b'o', b's', 0xe9]);
        assert_eq!(
            encode_win_ansi("Zoë – 指"),
            vec![b'Z', b'o', 0xeb, b' ', 0x96, b' ', b'?']
        );
    }
}
