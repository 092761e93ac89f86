//! Normalized text runs grouped by page.

use std::collections::BTreeMap;

/// One contiguous styled text fragment on one page.
///
/// Runs are built once by the collector and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Trimmed, non-empty text
    pub text: String,
    /// Font size in points, rounded to 2 decimals
    pub font_size: f64,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font name marks a bold face
    pub is_bold: bool,
    /// Left edge, page-local
    pub x: f64,
    /// Top edge, page-local (grows downwards)
    pub y: f64,
    /// Page number (1-indexed)
    pub page: u32,
}

impl TextRun {
    /// Create a new run, deriving boldness from the font name.
    pub fn new(
        text: impl Into<String>,
        font_size: f64,
        font_name: impl Into<String>,
        x: f64,
        y: f64,
        page: u32,
    ) -> Self {
        let font_name = font_name.into();
        let lower = font_name.to_lowercase();
        let is_bold = lower.contains("bold") || lower.contains("heavy");

        Self {
            text: text.into(),
            font_size,
            font_name,
            is_bold,
            x,
            y,
            page,
        }
    }
}

/// Runs of a document keyed by page, in extractor order within each page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRunSet {
    page_count: u32,
    pages: BTreeMap<u32, Vec<TextRun>>,
    page_heights: BTreeMap<u32, f64>,
    font_sizes: Vec<f64>,
}

impl PageRunSet {
    /// Create an empty run set for a document with `page_count` pages.
    pub fn new(page_count: u32) -> Self {
        Self {
            page_count,
            ..Self::default()
        }
    }

    /// Register a page and its height. Pages without runs still count.
    pub fn add_page(&mut self, page: u32, height: f64) {
        self.page_heights.insert(page, height);
        self.pages.entry(page).or_default();
    }

    /// Append a run to its page and record its font size.
    pub fn push(&mut self, run: TextRun) {
        self.font_sizes.push(run.font_size);
        self.pages.entry(run.page).or_default().push(run);
    }

    /// Number of pages in the source document.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Runs on a page, in extractor order.
    pub fn runs_on(&self, page: u32) -> &[TextRun] {
        self.pages.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Height of a page, if the page is known.
    pub fn page_height(&self, page: u32) -> Option<f64> {
        self.page_heights.get(&page).copied()
    }

    /// Font sizes of every retained run, in capture order.
    pub fn font_sizes(&self) -> &[f64] {
        &self.font_sizes
    }

    /// Total number of runs.
    pub fn len(&self) -> usize {
        self.font_sizes.len()
    }

    /// Whether the document produced no runs at all.
    pub fn is_empty(&self) -> bool {
        self.font_sizes.is_empty()
    }

    /// All runs in document order: page ascending, then top-to-bottom,
    /// then left-to-right.
    pub fn reading_order(&self) -> Vec<&TextRun> {
        let mut ordered = Vec::with_capacity(self.len());
        for page_runs in self.pages.values() {
            let mut runs: Vec<&TextRun> = page_runs.iter().collect();
            runs.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
            ordered.extend(runs);
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_detection() {
        assert!(TextRun::new("a b", 12.0, "Helvetica-Bold", 0.0, 0.0, 1).is_bold);
        assert!(TextRun::new("a b", 12.0, "Arial-HeavyItalic", 0.0, 0.0, 1).is_bold);
        assert!(TextRun::new("a b", 12.0, "TIMES-BOLD", 0.0, 0.0, 1).is_bold);
        assert!(!TextRun::new("a b", 12.0, "Helvetica-Black", 0.0, 0.0, 1).is_bold);
        assert!(!TextRun::new("a b", 12.0, "Helvetica", 0.0, 0.0, 1).is_bold);
    }

    #[test]
    fn test_reading_order() {
        let mut set = PageRunSet::new(2);
        set.add_page(1, 792.0);
        set.add_page(2, 792.0);
        set.push(TextRun::new("p2 top", 12.0, "F", 50.0, 10.0, 2));
        set.push(TextRun::new("p1 bottom", 12.0, "F", 50.0, 700.0, 1));
        set.push(TextRun::new("p1 top right", 12.0, "F", 300.0, 100.0, 1));
        set.push(TextRun::new("p1 top left", 12.0, "F", 50.0, 100.0, 1));

        let texts: Vec<&str> = set
            .reading_order()
            .iter()
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec!["p1 top left", "p1 top right", "p1 bottom", "p2 top"]
        );
        assert_eq!(set.len(), 4);
        assert_eq!(set.font_sizes().len(), 4);
    }

    #[test]
    fn test_unknown_page() {
        let set = PageRunSet::new(1);
        assert!(set.runs_on(1).is_empty());
        assert!(set.page_height(1).is_none());
        assert!(set.is_empty());
    }
}
