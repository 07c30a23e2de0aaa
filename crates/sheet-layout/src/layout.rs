//! Row packing and pagination.
//!
//! Each person occupies one row: the name at the left margin and up to four
//! fingerprint images side by side. Rows are stacked downward from the top
//! margin and a new page is opened once the cursor has dropped below the
//! bottom threshold. The pass is forward-only; placed rows never move.

use image_processor::NormalizedImage;
use tracing::debug;

use crate::LayoutError;
use crate::geometry::{PageSize, Rect};

/// One person's row input: a name and their normalized fingerprints.
#[derive(Debug, Clone)]
pub struct Person {
    pub name: String,
    pub fingerprints: Vec<NormalizedImage>,
}

impl Person {
    pub fn new(name: impl Into<String>, fingerprints: Vec<NormalizedImage>) -> Self {
        Self {
            name: name.into(),
            fingerprints,
        }
    }
}

/// Fixed layout constants, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub page: PageSize,
    pub top_margin: f32,
    pub name_x: f32,
    pub images_x: f32,
    /// Horizontal space not available to images (name column + right margin).
    pub horizontal_reserve: f32,
    pub max_image_width: f32,
    pub image_height: f32,
    pub image_gap: f32,
    pub row_gap: f32,
    /// A new page starts when the cursor is below this before a row.
    pub bottom_threshold: f32,
    /// Lift applied to the image box so it hangs just under the name.
    pub image_baseline_offset: f32,
    pub min_fingerprints: usize,
    pub max_fingerprints: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page: PageSize::LETTER,
            top_margin: 50.0,
            name_x: 50.0,
            images_x: 200.0,
            horizontal_reserve: 250.0,
            max_image_width: 110.0,
            image_height: 130.0,
            image_gap: 10.0,
            row_gap: 30.0,
            bottom_threshold: 100.0,
            image_baseline_offset: 10.0,
            min_fingerprints: 1,
            max_fingerprints: 4,
        }
    }
}

impl LayoutOptions {
    /// Cursor position at the top of a fresh page.
    pub fn start_y(&self) -> f32 {
        self.page.height - self.top_margin
    }

    /// Vertical space consumed by one row.
    pub fn row_height(&self) -> f32 {
        self.image_height + self.row_gap
    }
}

/// Drawing hints attached to an image placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageFit {
    pub preserve_aspect_ratio: bool,
    /// Use the image's own transparency, if it has any, as a mask.
    pub auto_mask: bool,
}

/// One positioned drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement<'a> {
    Text {
        x: f32,
        y: f32,
        text: &'a str,
    },
    Image {
        rect: Rect,
        image: &'a NormalizedImage,
        fit: ImageFit,
    },
}

/// Placements belonging to a single page, in drawing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout<'a> {
    placements: Vec<Placement<'a>>,
}

impl<'a> PageLayout<'a> {
    pub fn placements(&self) -> &[Placement<'a>] {
        &self.placements
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Text entries on this page.
    pub fn texts(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.placements.iter().filter_map(|p| match p {
            Placement::Text { text, .. } => Some(*text),
            Placement::Image { .. } => None,
        })
    }

    /// Image rectangles on this page.
    pub fn image_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.placements.iter().filter_map(|p| match p {
            Placement::Image { rect, .. } => Some(*rect),
            Placement::Text { .. } => None,
        })
    }
}

/// The complete, paginated layout of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout<'a> {
    page: PageSize,
    pages: Vec<PageLayout<'a>>,
}

impl<'a> DocumentLayout<'a> {
    pub fn page_size(&self) -> PageSize {
        self.page
    }

    pub fn pages(&self) -> &[PageLayout<'a>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Display width for each image in a row holding `count` images.
///
/// Shrinks as the row fills up, never exceeding `max_image_width`.
pub fn image_width(options: &LayoutOptions, count: usize) -> f32 {
    let available = options.page.width - options.horizontal_reserve;
    (available / count.max(1) as f32)
        .floor()
        .min(options.max_image_width)
}

/// Check one record: a non-blank name and an allowed number of images.
///
/// `position` is 1-based and only used in the error.
pub fn check_person(
    position: usize,
    name: &str,
    count: usize,
    options: &LayoutOptions,
) -> Result<(), LayoutError> {
    if name.trim().is_empty() {
        return Err(LayoutError::MissingName { position });
    }
    if !(options.min_fingerprints..=options.max_fingerprints).contains(&count) {
        return Err(LayoutError::FingerprintCount {
            name: name.to_string(),
            count,
            min: options.min_fingerprints,
            max: options.max_fingerprints,
        });
    }
    Ok(())
}

/// Check every record before anything is placed.
fn validate(persons: &[Person], options: &LayoutOptions) -> Result<(), LayoutError> {
    for (index, person) in persons.iter().enumerate() {
        check_person(index + 1, &person.name, person.fingerprints.len(), options)?;
    }
    Ok(())
}

/// Compute placements for every person, paginating as rows run out.
///
/// An empty list yields a single blank page.
pub fn layout_document<'a>(
    persons: &'a [Person],
    options: &LayoutOptions,
) -> Result<DocumentLayout<'a>, LayoutError> {
    validate(persons, options)?;

    let fit = ImageFit {
        preserve_aspect_ratio: true,
        auto_mask: true,
    };

    let mut pages = Vec::new();
    let mut current = PageLayout::default();
    let mut y = options.start_y();

    for person in persons {
        if !current.is_empty() && y < options.bottom_threshold {
            debug!(y, rows = pages.len() + 1, "Page full, starting a new one");
            pages.push(std::mem::take(&mut current));
            y = options.start_y();
        }

        current.placements.push(Placement::Text {
            x: options.name_x,
            y,
            text: &person.name,
        });

        let width = image_width(options, person.fingerprints.len());
        let image_y = y - options.image_height + options.image_baseline_offset;
        let mut x = options.images_x;
        for image in &person.fingerprints {
            current.placements.push(Placement::Image {
                rect: Rect::new(x, image_y, width, options.image_height),
                image,
                fit,
            });
            x += width + options.image_gap;
        }

        y -= options.row_height();
    }

    pages.push(current);
    debug!(
        persons = persons.len(),
        pages = pages.len(),
        "Layout complete"
    );

    Ok(DocumentLayout {
        page: options.page,
        pages,
    })
}
