//! Document model types for outline extraction.
//!
//! Three layers of values flow through the crate: what the PDF parser
//! reports ([`SourceDocument`]), the normalized runs the heading engine
//! works on ([`PageRunSet`]), and the outline it produces
//! ([`OutlineResult`]).

mod outline;
mod run;
mod source;

pub use outline::{DocumentOutcome, ErrorReport, HeadingLevel, OutlineEntry, OutlineResult};
pub use run::{PageRunSet, TextRun};
pub use source::{BBox, RawSpan, SourceDocument, SourcePage};
