//! Hierarchy repair: no outline starts at, or skips down to, a deeper tier.

use crate::model::{HeadingLevel, OutlineEntry};

/// Promote entries so that every H2 follows an H1 and every H3 follows
/// an H2 within the current H1 section.
///
/// - An H2 before any H1 becomes an H1.
/// - An H3 before any H1 becomes an H1; an H3 under an H1 with no H2
///   yet becomes an H2.
///
/// A new H1 starts a fresh section with no H2 seen.
pub fn repair(outline: Vec<OutlineEntry>) -> Vec<OutlineEntry> {
    let mut seen_h1 = false;
    let mut seen_h2 = false;

    outline
        .into_iter()
        .map(|mut entry| {
            entry.level = match entry.level {
                HeadingLevel::H1 => HeadingLevel::H1,
                HeadingLevel::H2 if !seen_h1 => HeadingLevel::H1,
                HeadingLevel::H2 => HeadingLevel::H2,
                HeadingLevel::H3 if !seen_h1 && !seen_h2 => HeadingLevel::H1,
                HeadingLevel::H3 if !seen_h2 => HeadingLevel::H2,
                HeadingLevel::H3 => HeadingLevel::H3,
            };

            match entry.level {
                HeadingLevel::H1 => {
                    seen_h1 = true;
                    seen_h2 = false;
                }
                HeadingLevel::H2 => seen_h2 = true,
                HeadingLevel::H3 => {}
            }

            entry
        })
        .collect()
}
