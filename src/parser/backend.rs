//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for the handful of PDF operations
//! span extraction needs, isolating the concrete PDF library (lopdf).

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// A page's MediaBox in PDF user space (`[llx, lly, urx, ury]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

impl PageBox {
    /// US Letter, used when a page declares no MediaBox.
    pub const LETTER: PageBox = PageBox {
        llx: 0.0,
        lly: 0.0,
        urx: 612.0,
        ury: 792.0,
    };

    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric value of an integer or real operand.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    /// Numeric operand at `index`.
    pub fn number(&self, index: usize) -> Option<f32> {
        self.operands.get(index).and_then(PdfValue::as_number)
    }
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId).
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// MediaBox of a page, inherited from the page tree when needed.
    fn page_box(&self, page: PageId) -> Option<PageBox>;

    /// Map of font resource name to base font name for a page.
    fn page_fonts(&self, page: PageId) -> Result<BTreeMap<Vec<u8>, String>>;

    /// Return the decoded content stream operations of a page.
    fn page_operations(&self, page: PageId) -> Result<Vec<ContentOp>>;

    /// Decode a text byte sequence using the font's encoding on the given page.
    /// Falls back to simple decoding if the font or encoding is unavailable.
    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String;
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // Try UTF-16BE first (BOM marker)
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    // Try UTF-8
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// lopdf implementation
// ---------------------------------------------------------------------------

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::checked(LopdfDocument::load(path)?)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        Self::checked(LopdfDocument::load_mem(data)?)
    }

    fn checked(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Walk up the page tree to find the MediaBox array.
    fn find_media_box(&self, dict: &lopdf::Dictionary, depth: usize) -> Option<Vec<f32>> {
        if let Ok(obj) = dict.get(b"MediaBox") {
            if let Some(nums) = self.resolve_numbers(obj) {
                return Some(nums);
            }
        }

        // Guard against cyclic Parent links in malformed files.
        if depth > 32 {
            return None;
        }

        let parent_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
        let parent = self.doc.get_dictionary(parent_id).ok()?;
        self.find_media_box(parent, depth + 1)
    }

    /// Resolve an object to an array of numbers, following one indirection.
    fn resolve_numbers(&self, obj: &Object) -> Option<Vec<f32>> {
        let array = match obj {
            Object::Array(arr) => arr,
            Object::Reference(id) => self.doc.get_object(*id).ok()?.as_array().ok()?,
            _ => return None,
        };

        array
            .iter()
            .map(|item| match item {
                Object::Reference(id) => self.doc.get_object(*id).ok()?.as_float().ok(),
                other => other.as_float().ok(),
            })
            .collect()
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_box(&self, page: PageId) -> Option<PageBox> {
        let dict = self.doc.get_dictionary(page).ok()?;
        let nums = self.find_media_box(dict, 0)?;
        if nums.len() < 4 {
            return None;
        }

        Some(PageBox {
            llx: nums[0].min(nums[2]),
            lly: nums[1].min(nums[3]),
            urx: nums[0].max(nums[2]),
            ury: nums[1].max(nums[3]),
        })
    }

    fn page_fonts(&self, page: PageId) -> Result<BTreeMap<Vec<u8>, String>> {
        let lopdf_fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(lopdf_fonts
            .iter()
            .map(|(name, font_dict)| {
                let base_font = font_dict
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                (name.clone(), base_font)
            })
            .collect())
    }

    fn page_operations(&self, page: PageId) -> Result<Vec<ContentOp>> {
        let data = self
            .doc
            .get_page_content(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let content =
            lopdf::content::Content::decode(&data).map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String {
        if let Ok(lopdf_fonts) = self.doc.get_page_fonts(page) {
            if let Some(font_dict) = lopdf_fonts.get(font_name) {
                if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_text_simple(bytes)
    }
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}
