//! Normalizes parser spans into page-indexed text runs.

use super::round_to;
use crate::model::{PageRunSet, SourceDocument, TextRun};

/// Turn a parsed document into a [`PageRunSet`].
///
/// Text is trimmed and empty spans are dropped, as are spans whose font
/// size is not a positive number. Font sizes are rounded to 2 decimals.
/// Spans keep the order the parser produced them in.
pub fn collect(doc: &SourceDocument) -> PageRunSet {
    let mut runs = PageRunSet::new(doc.page_count());

    for page in &doc.pages {
        runs.add_page(page.number, page.height);

        for span in &page.spans {
            let text = span.text.trim();
            if text.is_empty() {
                continue;
            }
            if !span.font_size.is_finite() || span.font_size <= 0.0 {
                log::trace!(
                    "dropping span with font size {} on page {}",
                    span.font_size,
                    page.number
                );
                continue;
            }

            runs.push(TextRun::new(
                text,
                round_to(span.font_size, 2),
                span.font_name.clone(),
                span.bbox.x0,
                span.bbox.y0,
                page.number,
            ));
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, RawSpan, SourcePage};

    fn span(text: &str, size: f64) -> RawSpan {
        RawSpan::new(text, size, "Helvetica", BBox::new(10.0, 20.0, 50.0, 32.0))
    }

    #[test]
    fn test_trims_and_drops_empty() {
        let mut doc = SourceDocument::new();
        doc.add_page(
            SourcePage::letter(1)
                .with_span(span("  Heading text \n", 14.0))
                .with_span(span("   ", 14.0))
                .with_span(span("", 12.0)),
        );

        let runs = collect(&doc);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs.runs_on(1)[0].text, "Heading text");
        assert_eq!(runs.runs_on(1)[0].x, 10.0);
        assert_eq!(runs.runs_on(1)[0].y, 20.0);
    }

    #[test]
    fn test_rounds_font_size() {
        let mut doc = SourceDocument::new();
        doc.add_page(SourcePage::letter(1).with_span(span("body text", 11.95517)));

        let runs = collect(&doc);
        assert_eq!(runs.font_sizes(), &[11.96]);
    }

    #[test]
    fn test_drops_invalid_sizes() {
        let mut doc = SourceDocument::new();
        doc.add_page(
            SourcePage::letter(1)
                .with_span(span("zero size", 0.0))
                .with_span(span("nan size", f64::NAN))
                .with_span(span("fine", 10.0)),
        );

        let runs = collect(&doc);
        assert_eq!(runs.len(), 1);
    }

    #[test]
    fn test_keeps_empty_pages() {
        let mut doc = SourceDocument::new();
        doc.add_page(SourcePage::new(1, 612.0, 792.0));
        doc.add_page(SourcePage::new(2, 595.0, 842.0).with_span(span("text", 10.0)));

        let runs = collect(&doc);
        assert_eq!(runs.page_count(), 2);
        assert_eq!(runs.page_height(1), Some(792.0));
        assert_eq!(runs.page_height(2), Some(842.0));
        assert_eq!(runs.runs_on(2).len(), 1);
    }
}
