//! PDF parsing module.

mod backend;
mod options;
mod pdf_parser;
mod spans;

pub use backend::{
    decode_text_simple, ContentOp, LopdfBackend, PageBox, PageId, PdfBackend, PdfValue,
};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
pub use spans::extract_page_spans;
