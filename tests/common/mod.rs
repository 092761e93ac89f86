//! Shared fixtures for integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};

/// One line of text placed with `Td` in its own `BT`/`ET` block.
pub struct Line {
    pub text: &'static str,
    pub bold: bool,
    pub size: i64,
    pub x: i64,
    pub y: i64,
}

pub fn line(text: &'static str, bold: bool, size: i64, y: i64) -> Line {
    Line {
        text,
        bold,
        size,
        x: 72,
        y,
    }
}

fn name(n: &str) -> Object {
    Object::Name(n.as_bytes().to_vec())
}

fn font(base: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", name("Font"));
    dict.set("Subtype", name("Type1"));
    dict.set("BaseFont", name(base));
    dict.set("Encoding", name("WinAnsiEncoding"));
    dict
}

/// Build a Letter-sized PDF with one page per entry of `pages`.
///
/// Regular text uses `/F1` (Helvetica) and bold text `/F2` (Helvetica-Bold).
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let f1 = doc.add_object(font("Helvetica"));
    let f2 = doc.add_object(font("Helvetica-Bold"));

    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(f1));
    fonts.set("F2", Object::Reference(f2));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    let resources_id = doc.add_object(resources);

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for l in lines {
            let font_name = if l.bold { "F2" } else { "F1" };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![name(font_name), Object::Integer(l.size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(l.x), Object::Integer(l.y)],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(l.text)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let data = Content { operations }
            .encode()
            .expect("content encodes");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), data));

        let mut page = Dictionary::new();
        page.set("Type", name("Page"));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Contents", Object::Reference(content_id));
        page.set("Resources", Object::Reference(resources_id));
        kids.push(Object::Reference(doc.add_object(page)));
    }

    // MediaBox lives on the page tree root and is inherited by every page.
    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", name("Pages"));
    pages_dict.set("Count", Object::Integer(kids.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));
    pages_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ]),
    );
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog = Dictionary::new();
    catalog.set("Type", name("Catalog"));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("document saves");
    buf
}

/// Single-page report: a bold title, a numbered section with a
/// subsection, and enough body text to fix the body size at 11pt.
pub fn report_pdf() -> Vec<u8> {
    let mut lines = vec![
        line("Annual Report Summary", true, 24, 720),
        line("1. Overview", true, 16, 680),
    ];
    for i in 0..8 {
        lines.push(line(
            "This is ordinary body text for the report",
            false,
            11,
            640 - 14 * i,
        ));
    }
    lines.push(line("1.1 Background", false, 13, 500));
    build_pdf(&[lines])
}
