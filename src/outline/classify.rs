//! Per-run heading level assignment.

use std::sync::LazyLock;

use regex::Regex;

use super::{SizeThresholds, Title};
use crate::model::{HeadingLevel, OutlineEntry, PageRunSet, TextRun};

/// A bare section number such as "3" or "3.2".
static BARE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(\.\d+)*$").unwrap());

/// A decimal, Roman-numeral or single-letter enumerator followed by content.
/// Decimal enumerators may end in a dot ("1. Overview").
static NUMBERED_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((\d+(\.\d+)*\.?)|([IVXLCDM]+\.)|([A-Z]\.))\s+.*").unwrap()
});

/// Runs this close to the title's size that repeat its text are the title.
const TITLE_SIZE_TOLERANCE: f64 = 1.0;

/// Numbered headings may be slightly smaller than the minimum heading size.
const NUMBERED_SIZE_SLACK: f64 = 0.9;

/// Whether text is only a dotted section number.
pub fn is_bare_number(text: &str) -> bool {
    BARE_NUMBER.is_match(text.trim())
}

/// Whether text starts with an enumerator followed by content.
pub fn is_numbered_heading(text: &str) -> bool {
    NUMBERED_HEADING.is_match(text.trim())
}

/// Assign a level to a run, or `None` if it is not a heading.
///
/// Rules are tried in order and the first match wins. Size-banded
/// levels require bold or numbered text; the last rule rescues numbered
/// headings set at body size.
pub fn level_for(run: &TextRun, t: &SizeThresholds, numbered: bool) -> Option<HeadingLevel> {
    let size = run.font_size;
    let emphasized = run.is_bold || numbered;
    let large_enough = size >= t.min_heading_size;

    if size >= t.h1 && large_enough && emphasized {
        Some(HeadingLevel::H1)
    } else if size >= t.h2 && size < t.h1 && large_enough && emphasized {
        Some(HeadingLevel::H2)
    } else if size >= t.h3 && size < t.h2 && large_enough && emphasized {
        Some(HeadingLevel::H3)
    } else if numbered && size >= t.min_heading_size * NUMBERED_SIZE_SLACK {
        if size >= t.h3 {
            Some(HeadingLevel::H3)
        } else if size >= t.h2 {
            Some(HeadingLevel::H2)
        } else {
            Some(HeadingLevel::H3)
        }
    } else {
        None
    }
}

fn repeats_title(run: &TextRun, title: &Title) -> bool {
    run.text.trim().to_lowercase() == title.text.trim().to_lowercase()
        && (run.font_size - title.font_size).abs() < TITLE_SIZE_TOLERANCE
}

/// Classify every run in document order into a provisional outline.
///
/// Runs repeating the title, and single words that are not section
/// numbers, are skipped. A heading is dropped when it repeats the text
/// and page of the entry just before it, which merges headings the
/// source split into several spans.
pub fn classify(
    runs: &PageRunSet,
    thresholds: &SizeThresholds,
    title: Option<&Title>,
) -> Vec<OutlineEntry> {
    let mut outline: Vec<OutlineEntry> = Vec::new();

    for run in runs.reading_order() {
        if title.is_some_and(|t| repeats_title(run, t)) {
            continue;
        }

        let text = run.text.trim();
        if text.split_whitespace().count() < 2 && !is_bare_number(text) {
            continue;
        }

        let numbered = is_numbered_heading(text);
        let Some(level) = level_for(run, thresholds, numbered) else {
            continue;
        };

        let duplicate = outline.last().is_some_and(|prev| {
            prev.page == run.page && prev.text.to_lowercase() == text.to_lowercase()
        });
        if duplicate {
            continue;
        }

        outline.push(OutlineEntry::new(level, text, run.page));
    }

    outline
}
