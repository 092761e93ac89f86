//! Outline result types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading tier of an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric depth (1 for H1).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Label used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single heading in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The title and heading outline inferred for one document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Document title, empty when none was found
    pub title: String,
    /// Headings in document order
    pub outline: Vec<OutlineEntry>,
}

impl OutlineResult {
    /// Create a result from a title and outline.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Whether neither a title nor any heading was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }

    /// Number of entries at the given level.
    pub fn count_level(&self, level: HeadingLevel) -> usize {
        self.outline.iter().filter(|e| e.level == level).count()
    }
}

/// Output written in place of an outline when a document fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Display form of the underlying error
    pub error: String,
    /// Human-readable summary naming the document
    pub message: String,
}

impl ErrorReport {
    /// Build a report for a document identified by `file_name`.
    pub fn new(error: impl fmt::Display, file_name: &str) -> Self {
        Self {
            error: error.to_string(),
            message: format!("Failed to process {}", file_name),
        }
    }
}

/// What a single document produced: an outline or an error report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentOutcome {
    Outline(OutlineResult),
    Failed(ErrorReport),
}

impl DocumentOutcome {
    /// Whether the document failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentOutcome::Failed(_))
    }
}
