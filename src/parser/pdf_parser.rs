//! PDF document parser using lopdf.

use std::io::Read;
use std::path::Path;

use crate::detect::{sniff_bytes, sniff_path, PdfHeader};
use crate::error::{Error, Result};
use crate::model::{SourceDocument, SourcePage};

use super::backend::{LopdfBackend, PageBox, PdfBackend};
use super::options::ParseOptions;
use super::spans::extract_page_spans;

/// PDF document parser.
pub struct PdfParser {
    backend: LopdfBackend,
    header: PdfHeader,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF before handing it to lopdf
        let header = sniff_path(path)?;
        let backend = LopdfBackend::load_file(path)?;

        Ok(Self {
            backend,
            header,
            options,
        })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let header = sniff_bytes(data)?;
        let backend = LopdfBackend::load_bytes(data)?;

        Ok(Self {
            backend,
            header,
            options,
        })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Read every page into a [`SourceDocument`].
    pub fn parse(&self) -> Result<SourceDocument> {
        read_document(&self.backend, &self.options)
    }

    /// Read a single page (1-indexed).
    pub fn parse_page(&self, page_num: u32) -> Result<SourcePage> {
        let pages = self.backend.pages();
        let page_id = pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;
        read_page(&self.backend, page_num, *page_id, &self.options)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Get the PDF version declared by the file header.
    pub fn version(&self) -> &str {
        &self.header.version
    }
}

/// Read every page of a backend in page-number order.
pub(crate) fn read_document<B: PdfBackend + ?Sized>(
    backend: &B,
    options: &ParseOptions,
) -> Result<SourceDocument> {
    let mut document = SourceDocument::new();

    for (page_num, page_id) in backend.pages() {
        document.add_page(read_page(backend, page_num, page_id, options)?);
    }

    log::debug!(
        "parsed {} pages, {} spans",
        document.page_count(),
        document.span_count()
    );
    Ok(document)
}

fn read_page<B: PdfBackend + ?Sized>(
    backend: &B,
    page_num: u32,
    page_id: super::backend::PageId,
    options: &ParseOptions,
) -> Result<SourcePage> {
    let page_box = backend.page_box(page_id).unwrap_or(PageBox::LETTER);
    let mut page = SourcePage::new(
        page_num,
        f64::from(page_box.width()),
        f64::from(page_box.height()),
    );

    match extract_page_spans(backend, page_id, page_box) {
        Ok(spans) => page.spans = spans,
        Err(e) => {
            if options.is_strict() {
                return Err(e);
            }
            // In lenient mode, keep the page but without text
            log::warn!("Failed to extract text from page {}: {}", page_num, e);
        }
    }

    Ok(page)
}
