//! Parser-side types: pages and the styled spans found on them.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in page-local coordinates.
///
/// The origin is the top-left corner of the page and `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// A styled text fragment exactly as the parser reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    /// Text content, untrimmed
    pub text: String,
    /// Font size in points
    pub font_size: f64,
    /// Font family name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Position on the page
    pub bbox: BBox,
}

impl RawSpan {
    /// Create a new span.
    pub fn new(
        text: impl Into<String>,
        font_size: f64,
        font_name: impl Into<String>,
        bbox: BBox,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: font_name.into(),
            bbox,
        }
    }
}

/// A single page with its spans in extractor order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f64,

    /// Page height in points
    pub height: f64,

    /// Spans in the order the parser yielded them
    pub spans: Vec<RawSpan>,
}

impl SourcePage {
    /// Create a new empty page with the given dimensions.
    pub fn new(number: u32, width: f64, height: f64) -> Self {
        Self {
            number,
            width,
            height,
            spans: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Add a span to the page.
    pub fn add_span(&mut self, span: RawSpan) {
        self.spans.push(span);
    }

    /// Builder-style variant of [`add_span`](Self::add_span).
    pub fn with_span(mut self, span: RawSpan) -> Self {
        self.spans.push(span);
        self
    }
}

/// A parsed document: its pages and their spans.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Pages in document order
    pub pages: Vec<SourcePage>,
}

impl SourceDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&SourcePage> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: SourcePage) {
        self.pages.push(page);
    }

    /// Total number of spans across all pages.
    pub fn span_count(&self) -> usize {
        self.pages.iter().map(|p| p.spans.len()).sum()
    }
}
