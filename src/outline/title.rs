//! Title selection from the top of the first pages.

use crate::model::{PageRunSet, TextRun};

/// Only the first pages are searched for a title.
const TITLE_SCAN_PAGES: u32 = 3;

/// A title must sit in the top third of its page.
const TITLE_ZONE_FRACTION: f64 = 1.0 / 3.0;

/// With a known body size, a title must exceed it by this factor.
const TITLE_BODY_RATIO: f64 = 1.5;

/// Without a body size, a title must exceed this many points.
const TITLE_MIN_SIZE: f64 = 18.0;

/// The accepted document title.
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    /// Title text
    pub text: String,
    /// Largest font size seen among title candidates
    pub font_size: f64,
}

/// Pick the document title, if one stands out.
///
/// Walks the first pages in extractor order and keeps every run in the
/// top third of its page that is strictly larger than all candidates
/// before it. The largest, topmost, leftmost candidate wins if it is big
/// enough relative to the body text.
pub fn select_title(runs: &PageRunSet, body_size: Option<f64>) -> Option<Title> {
    let mut candidates: Vec<&TextRun> = Vec::new();
    let mut max_size = 0.0_f64;

    for page in 1..=runs.page_count().min(TITLE_SCAN_PAGES) {
        let Some(height) = runs.page_height(page) else {
            continue;
        };
        let zone = height * TITLE_ZONE_FRACTION;

        for run in runs.runs_on(page) {
            if run.y < zone && run.font_size > max_size {
                max_size = run.font_size;
                candidates.push(run);
            }
        }
    }

    candidates.sort_by(|a, b| {
        b.font_size
            .total_cmp(&a.font_size)
            .then(a.y.total_cmp(&b.y))
            .then(a.x.total_cmp(&b.x))
    });
    let top = candidates.first()?;

    // A zero body size carries no information.
    let accepted = match body_size {
        Some(body) if body != 0.0 => top.font_size > body * TITLE_BODY_RATIO,
        _ => top.font_size > TITLE_MIN_SIZE,
    };

    if !accepted {
        log::debug!(
            "title candidate {:?} at {}pt rejected (body size {:?})",
            top.text,
            top.font_size,
            body_size
        );
        return None;
    }

    Some(Title {
        text: top.text.clone(),
        font_size: max_size,
    })
}
