//! # pdfoutline
//!
//! Title and heading outline inference for PDF documents.
//!
//! This library reads the positioned, font-annotated text of a PDF and
//! infers a document title plus a three-level (H1/H2/H3) outline from
//! typography alone: font size distribution, boldness, position on the
//! page and section numbering.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline_file, render, JsonFormat};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let result = extract_outline_file("document.pdf")?;
//!
//!     println!("{}", result.title);
//!     for entry in &result.outline {
//!         println!("{} {} (page {})", entry.level, entry.text, entry.page);
//!     }
//!
//!     let json = render::to_json(&result, JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typography-driven**: body size, heading bands and title chosen per document
//! - **Numbering aware**: "1.", "2.3", "IV." and "A." prefixes promote headings
//! - **Hierarchy repair**: outlines never skip levels
//! - **Batch mode**: whole directories on a Rayon worker pool
//! - **CJK support**: no spurious spaces between ideographs

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{process_directory, process_file, BatchOptions, BatchSummary, DocumentReport};
pub use detect::{has_pdf_extension, sniff_bytes, PdfHeader};
pub use error::{Error, Result};
pub use model::{
    DocumentOutcome, ErrorReport, HeadingLevel, OutlineEntry, OutlineResult, SourceDocument,
};
pub use outline::{analyze, extract_outline, Analysis};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Parse a PDF file into positioned text spans.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::parse_file;
///
/// let doc = parse_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Parse a PDF from bytes into positioned text spans.
pub fn parse_bytes(data: &[u8]) -> Result<SourceDocument> {
    let parser = PdfParser::from_bytes(data)?;
    parser.parse()
}

/// Infer the title and outline of a PDF file.
///
/// # Arguments
///
/// * `path` - Path to the PDF file
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline_file;
///
/// let result = extract_outline_file("document.pdf").unwrap();
/// println!("{} headings", result.outline.len());
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    extract_outline_file_with_options(path, ParseOptions::default())
}

/// Infer the title and outline of a PDF file with custom parse options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_outline_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().strict();
/// let result = extract_outline_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn extract_outline_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<OutlineResult> {
    let doc = PdfParser::open_with_options(path, options)?.parse()?;
    Ok(extract_outline(&doc))
}

/// Infer the title and outline of a PDF held in memory.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let result = extract_outline_bytes(&data).unwrap();
/// ```
pub fn extract_outline_bytes(data: &[u8]) -> Result<OutlineResult> {
    let doc = parse_bytes(data)?;
    Ok(extract_outline(&doc))
}

/// Infer the title and outline of a PDF read from `reader`.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline_reader;
/// use std::fs::File;
///
/// let file = File::open("document.pdf").unwrap();
/// let result = extract_outline_reader(file).unwrap();
/// ```
pub fn extract_outline_reader<R: Read>(reader: R) -> Result<OutlineResult> {
    let doc = PdfParser::from_reader(reader)?.parse()?;
    Ok(extract_outline(&doc))
}

/// Builder for outline extraction with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::Outliner;
///
/// let analysis = Outliner::new()
///     .strict()
///     .analyze_file("document.pdf")
///     .unwrap();
///
/// println!("body size: {:?}", analysis.statistics.body_size);
/// println!("{} headings", analysis.result.outline.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    parse_options: ParseOptions,
}

impl Outliner {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Skip pages whose content cannot be read.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Fail on the first unreadable page.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Parse a file and run the full pipeline, keeping every intermediate value.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<Analysis> {
        let doc = PdfParser::open_with_options(path, self.parse_options.clone())?.parse()?;
        Ok(analyze(&doc))
    }

    /// Parse bytes and run the full pipeline, keeping every intermediate value.
    pub fn analyze_bytes(&self, data: &[u8]) -> Result<Analysis> {
        let doc = PdfParser::from_bytes_with_options(data, self.parse_options.clone())?.parse()?;
        Ok(analyze(&doc))
    }

    /// Infer the outline of a file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<OutlineResult> {
        Ok(self.analyze_file(path)?.result)
    }

    /// Infer the outline of an in-memory PDF.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<OutlineResult> {
        Ok(self.analyze_bytes(data)?.result)
    }
}
