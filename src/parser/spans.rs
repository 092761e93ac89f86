//! Content-stream walk producing positioned text spans.
//!
//! PDF text space is bottom-up; every span leaves here with a top-left,
//! page-local bounding box.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::{BBox, RawSpan};

use super::backend::{ContentOp, PageBox, PageId, PdfBackend, PdfValue};

/// TJ adjustments (thousandths of an em) larger than this are word gaps.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Font size assumed before the first `Tf`.
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Share of the font size above the baseline.
const ASCENT_RATIO: f64 = 0.8;

/// Share of the font size below the baseline.
const DESCENT_RATIO: f64 = 0.2;

/// Average glyph advance as a share of the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.5;

/// Extract every non-blank text span of a page.
pub fn extract_page_spans<B: PdfBackend + ?Sized>(
    backend: &B,
    page: PageId,
    page_box: PageBox,
) -> Result<Vec<RawSpan>> {
    let fonts = backend.page_fonts(page)?;
    let operations = backend.page_operations(page)?;
    Ok(walk_operations(backend, page, page_box, &fonts, &operations))
}

fn walk_operations<B: PdfBackend + ?Sized>(
    backend: &B,
    page: PageId,
    page_box: PageBox,
    fonts: &BTreeMap<Vec<u8>, String>,
    operations: &[ContentOp],
) -> Vec<RawSpan> {
    let mut spans = Vec::new();
    let mut font_resource: Vec<u8> = Vec::new();
    let mut font_name = String::new();
    let mut font_size = DEFAULT_FONT_SIZE;
    let mut matrix = TextMatrix::default();
    let mut leading = 0.0_f32;
    let mut in_text_block = false;

    for op in operations {
        let text = match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                matrix = TextMatrix::default();
                None
            }
            "ET" => {
                in_text_block = false;
                None
            }
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    font_name = fonts
                        .get(name)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                    font_resource = name.clone();
                }
                font_size = op.number(1).unwrap_or(DEFAULT_FONT_SIZE);
                None
            }
            "TL" => {
                leading = op.number(0).unwrap_or(0.0);
                None
            }
            "Td" | "TD" => {
                let tx = op.number(0).unwrap_or(0.0);
                let ty = op.number(1).unwrap_or(0.0);
                if op.operator == "TD" {
                    leading = -ty;
                }
                matrix.translate(tx, ty);
                None
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    matrix.set(
                        op.number(0).unwrap_or(1.0),
                        op.number(1).unwrap_or(0.0),
                        op.number(2).unwrap_or(0.0),
                        op.number(3).unwrap_or(1.0),
                        op.number(4).unwrap_or(0.0),
                        op.number(5).unwrap_or(0.0),
                    );
                }
                None
            }
            "T*" => {
                matrix.next_line(leading);
                None
            }
            "Tj" => match op.operands.first() {
                Some(PdfValue::Str(bytes)) => {
                    Some(backend.decode_text(page, &font_resource, bytes))
                }
                _ => None,
            },
            "TJ" => match op.operands.first() {
                Some(PdfValue::Array(items)) => {
                    Some(decode_tj_array(backend, page, &font_resource, items))
                }
                _ => None,
            },
            "'" | "\"" => {
                matrix.next_line(leading);
                let text_idx = if op.operator == "\"" { 2 } else { 0 };
                match op.operands.get(text_idx) {
                    Some(PdfValue::Str(bytes)) => {
                        Some(backend.decode_text(page, &font_resource, bytes))
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        let Some(text) = text else {
            continue;
        };
        if !in_text_block || text.trim().is_empty() {
            continue;
        }

        let (x, baseline) = matrix.position();
        let size = f64::from(font_size * matrix.scale());
        let bbox = span_bbox(&text, f64::from(x), f64::from(baseline), size, page_box);
        spans.push(RawSpan::new(text, size, font_name.clone(), bbox));
    }

    spans
}

/// Join the strings of a `TJ` array, turning wide gaps into spaces.
fn decode_tj_array<B: PdfBackend + ?Sized>(
    backend: &B,
    page: PageId,
    font_resource: &[u8],
    items: &[PdfValue],
) -> String {
    let mut combined = String::new();

    for item in items {
        match item {
            PdfValue::Str(bytes) => {
                combined.push_str(&backend.decode_text(page, font_resource, bytes));
            }
            PdfValue::Integer(_) | PdfValue::Real(_) => {
                // Negative adjustments move the next glyph to the right.
                let adjustment = -item.as_number().unwrap_or(0.0);
                if adjustment <= TJ_SPACE_THRESHOLD
                    || combined.ends_with(' ')
                    || combined.ends_with('\u{00A0}')
                {
                    continue;
                }
                if let Some(c) = combined.chars().last() {
                    if !is_spaceless_script_char(c) {
                        combined.push(' ');
                    }
                }
            }
            _ => {}
        }
    }

    combined
}

/// Convert a baseline-anchored span into a top-left page-local box.
fn span_bbox(text: &str, x: f64, baseline: f64, size: f64, page_box: PageBox) -> BBox {
    let llx = f64::from(page_box.llx);
    let ury = f64::from(page_box.ury);
    let chars = text.chars().count() as f64;

    let x0 = x - llx;
    BBox::new(
        x0,
        ury - (baseline + ASCENT_RATIO * size),
        x0 + chars * size * GLYPH_WIDTH_RATIO,
        ury - (baseline - DESCENT_RATIO * size),
    )
}

/// Text matrix for tracking position.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self, leading: f32) {
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    /// Vertical scale factor applied to the font size.
    fn scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parser::backend::decode_text_simple;

    /// Single-page backend serving a fixed operation list.
    struct MockBackend {
        operations: Vec<ContentOp>,
    }

    impl PdfBackend for MockBackend {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            BTreeMap::from([(1, (1, 0))])
        }

        fn page_box(&self, _page: PageId) -> Option<PageBox> {
            Some(PageBox::LETTER)
        }

        fn page_fonts(&self, _page: PageId) -> Result<BTreeMap<Vec<u8>, String>> {
            Ok(BTreeMap::from([
                (b"F1".to_vec(), "Helvetica".to_string()),
                (b"F2".to_vec(), "Helvetica-Bold".to_string()),
            ]))
        }

        fn page_operations(&self, _page: PageId) -> Result<Vec<ContentOp>> {
            if self.operations.is_empty() {
                return Err(Error::PdfParse("no content".to_string()));
            }
            Ok(self.operations.clone())
        }

        fn decode_text(&self, _page: PageId, _font: &[u8], bytes: &[u8]) -> String {
            decode_text_simple(bytes)
        }
    }

    fn name(n: &str) -> PdfValue {
        PdfValue::Name(n.as_bytes().to_vec())
    }

    fn string(s: &str) -> PdfValue {
        PdfValue::Str(s.as_bytes().to_vec())
    }

    fn num(n: i64) -> PdfValue {
        PdfValue::Integer(n)
    }

    fn extract(operations: Vec<ContentOp>) -> Vec<RawSpan> {
        let backend = MockBackend { operations };
        extract_page_spans(&backend, (1, 0), PageBox::LETTER).unwrap()
    }

    #[test]
    fn test_simple_span_geometry() {
        let spans = extract(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F2"), num(20)]),
            ContentOp::new("Td", vec![num(72), num(700)]),
            ContentOp::new("Tj", vec![string("Heading")]),
            ContentOp::new("ET", vec![]),
        ]);

        assert_eq!(spans.len(), 1);
        let span = &spans[0];
        assert_eq!(span.text, "Heading");
        assert_eq!(span.font_name, "Helvetica-Bold");
        assert_eq!(span.font_size, 20.0);
        // 792 - (700 + 16) and 792 - (700 - 4)
        assert_eq!(span.bbox.y0, 76.0);
        assert_eq!(span.bbox.y1, 96.0);
        assert_eq!(span.bbox.x0, 72.0);
        assert_eq!(span.bbox.x1, 72.0 + 7.0 * 10.0);
    }

    #[test]
    fn test_text_outside_block_ignored() {
        let spans = extract(vec![
            ContentOp::new("Tf", vec![name("F1"), num(11)]),
            ContentOp::new("Tj", vec![string("stray")]),
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tj", vec![string("   ")]),
            ContentOp::new("ET", vec![]),
        ]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_tj_array_spacing() {
        let spans = extract(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), num(11)]),
            ContentOp::new(
                "TJ",
                vec![PdfValue::Array(vec![
                    string("Key"),
                    num(-250),
                    string("Findings"),
                    num(-40),
                    string("!"),
                ])],
            ),
            ContentOp::new("ET", vec![]),
        ]);
        assert_eq!(spans[0].text, "Key Findings!");
    }

    #[test]
    fn test_tj_no_space_after_cjk() {
        let items = vec![
            PdfValue::Str("漢".as_bytes().to_vec()),
            num(-300),
            PdfValue::Str("字".as_bytes().to_vec()),
        ];
        let backend = MockBackend { operations: vec![] };
        assert_eq!(decode_tj_array(&backend, (1, 0), b"F1", &items), "漢字");
    }

    #[test]
    fn test_leading_and_next_line() {
        let spans = extract(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), num(10)]),
            ContentOp::new("TL", vec![num(14)]),
            ContentOp::new("Td", vec![num(72), num(700)]),
            ContentOp::new("Tj", vec![string("first line")]),
            ContentOp::new("T*", vec![]),
            ContentOp::new("Tj", vec![string("second line")]),
            ContentOp::new("'", vec![string("third line")]),
            ContentOp::new("ET", vec![]),
        ]);

        let tops: Vec<f64> = spans.iter().map(|s| s.bbox.y0).collect();
        assert_eq!(tops, vec![84.0, 98.0, 112.0]);
    }

    #[test]
    fn test_td_uppercase_sets_leading() {
        let spans = extract(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), num(10)]),
            ContentOp::new("Td", vec![num(72), num(700)]),
            ContentOp::new("TD", vec![num(0), num(-20)]),
            ContentOp::new("Tj", vec![string("a")]),
            ContentOp::new("T*", vec![]),
            ContentOp::new("Tj", vec![string("b")]),
            ContentOp::new("ET", vec![]),
        ]);
        assert_eq!(spans[0].bbox.y0, 792.0 - 688.0);
        assert_eq!(spans[1].bbox.y0, 792.0 - 668.0);
    }

    #[test]
    fn test_text_matrix_scales_font_size() {
        let spans = extract(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), num(1)]),
            ContentOp::new(
                "Tm",
                vec![num(18), num(0), num(0), num(18), num(100), num(500)],
            ),
            ContentOp::new("Tj", vec![string("Scaled")]),
            ContentOp::new("ET", vec![]),
        ]);
        assert_eq!(spans[0].font_size, 18.0);
        assert_eq!(spans[0].bbox.x0, 100.0);
    }

    #[test]
    fn test_unknown_font_resource_keeps_name() {
        let spans = extract(vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F9"), num(11)]),
            ContentOp::new("Tj", vec![string("text")]),
            ContentOp::new("ET", vec![]),
        ]);
        assert_eq!(spans[0].font_name, "F9");
    }

    #[test]
    fn test_offset_media_box() {
        let page_box = PageBox {
            llx: 50.0,
            lly: 0.0,
            urx: 662.0,
            ury: 800.0,
        };
        let bbox = span_bbox("ab", 60.0, 700.0, 10.0, page_box);
        assert_eq!(bbox.x0, 10.0);
        assert_eq!(bbox.y0, 92.0);
        assert_eq!(bbox.x1, 20.0);
    }

    #[test]
    fn test_content_error_propagates() {
        let backend = MockBackend { operations: vec![] };
        assert!(extract_page_spans(&backend, (1, 0), PageBox::LETTER).is_err());
    }

    #[test]
    fn test_spaceless_scripts() {
        assert!(is_spaceless_script_char('漢'));
        assert!(is_spaceless_script_char('か'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }
}
