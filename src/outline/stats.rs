//! Font-size statistics and body-size inference.

use std::collections::BTreeMap;

use super::round_to;
use crate::model::PageRunSet;

/// Body text is never set at or above this size.
const BODY_SIZE_CEILING: f64 = 20.0;

/// A body-size bucket must be seen more than this many times per page.
const BODY_RUNS_PER_PAGE: usize = 5;

/// Font-size frequencies, bucketed to 0.1pt.
///
/// Entries are ordered by descending count; equal counts put the larger
/// size first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontHistogram {
    entries: Vec<(f64, usize)>,
}

impl FontHistogram {
    /// Build a histogram from raw font sizes.
    pub fn from_sizes(sizes: &[f64]) -> Self {
        // Keyed by tenths of a point so equal buckets compare exactly.
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for &size in sizes {
            let key = (round_to(size, 1) * 10.0).round() as i64;
            *counts.entry(key).or_insert(0) += 1;
        }

        let mut entries: Vec<(i64, usize)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        Self {
            entries: entries
                .into_iter()
                .map(|(key, count)| (key as f64 / 10.0, count))
                .collect(),
        }
    }

    /// `(size, count)` pairs in histogram order.
    pub fn entries(&self) -> &[(f64, usize)] {
        &self.entries
    }

    /// Number of distinct buckets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no sizes were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occurrences of a bucketed size.
    pub fn count(&self, size: f64) -> usize {
        let size = round_to(size, 1);
        self.entries
            .iter()
            .find(|(s, _)| *s == size)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// The smallest bucketed size.
    pub fn smallest(&self) -> Option<f64> {
        self.entries.iter().map(|(s, _)| *s).min_by(f64::total_cmp)
    }
}

/// Document-wide font statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontStatistics {
    /// Bucketed size frequencies
    pub histogram: FontHistogram,
    /// Inferred size of ordinary paragraph text, `None` without any text
    pub body_size: Option<f64>,
}

impl FontStatistics {
    /// Gather statistics over every run of a document.
    pub fn from_runs(runs: &PageRunSet) -> Self {
        Self::from_sizes(runs.font_sizes(), runs.page_count())
    }

    /// Gather statistics from raw sizes for a document of `page_count` pages.
    pub fn from_sizes(sizes: &[f64], page_count: u32) -> Self {
        let histogram = FontHistogram::from_sizes(sizes);
        let body_size = infer_body_size(&histogram, page_count);
        Self {
            histogram,
            body_size,
        }
    }
}

/// The first small size that is frequent enough to be body text,
/// else the smallest size present.
fn infer_body_size(histogram: &FontHistogram, page_count: u32) -> Option<f64> {
    let min_count = page_count as usize * BODY_RUNS_PER_PAGE;

    histogram
        .entries()
        .iter()
        .find(|(size, count)| *size < BODY_SIZE_CEILING && *count > min_count)
        .map(|(size, _)| *size)
        .or_else(|| histogram.smallest())
}
