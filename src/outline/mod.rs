//! Heading classification engine.
//!
//! Infers a title and an H1/H2/H3 outline from typography alone. Each
//! stage is a plain function over immutable values:
//!
//! ```text
//! SourceDocument ─collect─▶ PageRunSet ─┬─▶ FontStatistics ─▶ SizeThresholds ─┐
//!                                       └─▶ Title ◀─(body size)               │
//!                                                   │                         ▼
//!                                                   └──────────────────▶ classify ─▶ repair ─▶ OutlineResult
//! ```
//!
//! # Example
//!
//! ```
//! use pdfoutline::model::{BBox, RawSpan, SourceDocument, SourcePage};
//! use pdfoutline::outline::extract_outline;
//!
//! let mut page = SourcePage::letter(1).with_span(RawSpan::new(
//!     "Annual Report",
//!     24.0,
//!     "Helvetica-Bold",
//!     BBox::new(72.0, 50.0, 300.0, 74.0),
//! ));
//! for i in 0..6 {
//!     let y = 100.0 + 14.0 * i as f64;
//!     page.add_span(RawSpan::new(
//!         "Plain body text",
//!         11.0,
//!         "Helvetica",
//!         BBox::new(72.0, y, 300.0, y + 11.0),
//!     ));
//! }
//! let mut doc = SourceDocument::new();
//! doc.add_page(page);
//!
//! let result = extract_outline(&doc);
//! assert_eq!(result.title, "Annual Report");
//! assert!(result.outline.is_empty());
//! ```

mod classify;
mod collector;
mod repair;
mod stats;
mod thresholds;
mod title;

pub use classify::{classify, is_bare_number, is_numbered_heading, level_for};
pub use collector::collect;
pub use repair::repair;
pub use stats::{FontHistogram, FontStatistics};
pub use thresholds::SizeThresholds;
pub use title::{select_title, Title};

use crate::model::{OutlineEntry, OutlineResult, PageRunSet, SourceDocument};

/// Every intermediate value of one pipeline run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Normalized runs
    pub runs: PageRunSet,
    /// Font-size histogram and inferred body size
    pub statistics: FontStatistics,
    /// Accepted title, if any
    pub title: Option<Title>,
    /// Size bands for each heading level
    pub thresholds: SizeThresholds,
    /// Classifier output before hierarchy repair
    pub provisional: Vec<OutlineEntry>,
    /// Final result
    pub result: OutlineResult,
}

/// Run the full pipeline and keep every intermediate value.
pub fn analyze(doc: &SourceDocument) -> Analysis {
    let runs = collect(doc);
    let statistics = FontStatistics::from_runs(&runs);
    let title = select_title(&runs, statistics.body_size);
    let thresholds = SizeThresholds::derive(runs.font_sizes(), statistics.body_size);

    log::debug!(
        "{} runs on {} pages, body size {:?}, thresholds h1={:.2} h2={:.2} h3={:.2} min={:.2}",
        runs.len(),
        runs.page_count(),
        statistics.body_size,
        thresholds.h1,
        thresholds.h2,
        thresholds.h3,
        thresholds.min_heading_size
    );

    let provisional = classify(&runs, &thresholds, title.as_ref());
    let outline = repair(provisional.clone());
    let result = OutlineResult::new(
        title.as_ref().map(|t| t.text.clone()).unwrap_or_default(),
        outline,
    );

    Analysis {
        runs,
        statistics,
        title,
        thresholds,
        provisional,
        result,
    }
}

/// Infer the title and heading outline of a parsed document.
///
/// Never fails: documents without text yield an empty result.
pub fn extract_outline(doc: &SourceDocument) -> OutlineResult {
    analyze(doc).result
}

/// Round to a fixed number of decimal places.
///
/// Rounds the exact binary value, so 11.25 becomes 11.2 and 10.125
/// becomes 10.12: exact ties go to the even digit.
pub(crate) fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(11.955, 1), 12.0);
        assert_eq!(round_to(14.016, 2), 14.02);
        assert_eq!(round_to(9.04, 1), 9.0);
    }

    #[test]
    fn test_round_to_ties_to_even() {
        assert_eq!(round_to(11.25, 1), 11.2);
        assert_eq!(round_to(11.35, 1), 11.3);
        assert_eq!(round_to(10.125, 2), 10.12);
        assert_eq!(round_to(10.375, 2), 10.38);
        assert_eq!(round_to(0.5, 0), 0.0);
    }

    #[test]
    fn test_empty_document() {
        let result = extract_outline(&SourceDocument::new());
        assert_eq!(result, OutlineResult::default());
    }
}
