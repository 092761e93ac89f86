//! Directory batch processing.
//!
//! Every PDF in an input directory is parsed and outlined independently,
//! and its result (or an error report) is written as `<stem>.json` into
//! the output directory. One broken document never stops the batch.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::model::{DocumentOutcome, ErrorReport};
use crate::parser::{ParseOptions, PdfParser};
use crate::render::{write_json, JsonFormat};

/// Default input directory, relative to the working directory.
pub const DEFAULT_INPUT_DIR: &str = "app/input";

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "app/output";

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for `.pdf` files
    pub input_dir: PathBuf,
    /// Directory receiving one JSON file per document
    pub output_dir: PathBuf,
    /// Worker threads (`None` = available parallelism)
    pub jobs: Option<usize>,
    /// Whether to process documents concurrently
    pub parallel: bool,
    /// Output JSON layout
    pub format: JsonFormat,
    /// Options passed to the parser for every document
    pub parse: ParseOptions,
}

impl BatchOptions {
    /// Create batch options for the given directories.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Set the number of worker threads.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the output JSON layout.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the parse options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            jobs: None,
            parallel: true,
            format: JsonFormat::Pretty,
            parse: ParseOptions::default(),
        }
    }
}

/// What happened to one document of a batch.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    /// Source PDF
    pub input: PathBuf,
    /// JSON file written for it
    pub output: PathBuf,
    /// Number of headings found (0 on failure)
    pub headings: usize,
    /// Processing or write error, if any
    pub error: Option<String>,
    /// Wall-clock time spent on this document
    pub elapsed: Duration,
}

impl DocumentReport {
    /// Whether the document produced an outline and it was written.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// File name of the source PDF.
    pub fn file_name(&self) -> String {
        display_name(&self.input)
    }
}

/// Result of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// One report per input document, sorted by input path
    pub documents: Vec<DocumentReport>,
    /// Wall-clock time for the whole batch
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Number of documents processed.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the input directory held no PDF files.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of documents that succeeded.
    pub fn succeeded(&self) -> usize {
        self.documents.iter().filter(|d| d.is_ok()).count()
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }
}

/// List the PDF files directly inside `dir`, sorted by path.
pub fn list_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && has_pdf_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Parse one PDF and infer its outline, turning any failure (a parser
/// panic included) into a report.
pub fn process_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> DocumentOutcome {
    let path = path.as_ref();
    let outlined = contain_panic(|| {
        let doc = PdfParser::open_with_options(path, options.clone())?.parse()?;
        Ok(crate::outline::extract_outline(&doc))
    });

    match outlined {
        Ok(result) => DocumentOutcome::Outline(result),
        Err(e) => {
            log::warn!("Failed to process {}: {}", path.display(), e);
            DocumentOutcome::Failed(ErrorReport::new(e, &display_name(path)))
        }
    }
}

/// Run `f`, turning a panic into an error so one malformed document
/// cannot take down the batch.
fn contain_panic<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown cause".to_string());
        Err(Error::PdfParse(format!("parser panicked: {}", reason)))
    })
}

/// Process every PDF in the input directory.
pub fn process_directory(options: &BatchOptions) -> Result<BatchSummary> {
    process_directory_with_progress(options, |_| {})
}

/// Process every PDF in the input directory, calling `progress` after
/// each document finishes.
///
/// Only failing to create the directories or to list the input aborts the
/// batch; per-document failures are recorded in the summary.
pub fn process_directory_with_progress<F>(
    options: &BatchOptions,
    progress: F,
) -> Result<BatchSummary>
where
    F: Fn(&DocumentReport) + Sync,
{
    let start = Instant::now();

    fs::create_dir_all(&options.input_dir)?;
    fs::create_dir_all(&options.output_dir)?;
    let inputs = list_pdfs(&options.input_dir)?;

    log::info!(
        "Processing {} PDF files from {}",
        inputs.len(),
        options.input_dir.display()
    );

    let run_one = |path: &PathBuf| {
        let report = process_into(path, options);
        progress(&report);
        report
    };

    let mut documents: Vec<DocumentReport> = if options.parallel && inputs.len() > 1 {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(jobs) = options.jobs.filter(|&n| n > 0) {
            builder = builder.num_threads(jobs);
        }
        let pool = builder
            .build()
            .map_err(|e| Error::Other(format!("failed to start worker pool: {}", e)))?;
        pool.install(|| inputs.par_iter().map(run_one).collect())
    } else {
        inputs.iter().map(run_one).collect()
    };

    documents.sort_by(|a, b| a.input.cmp(&b.input));

    Ok(BatchSummary {
        documents,
        elapsed: start.elapsed(),
    })
}

/// Outline one document and write its JSON next to the others.
fn process_into(path: &Path, options: &BatchOptions) -> DocumentReport {
    let start = Instant::now();
    let output = output_path(path, &options.output_dir);

    let outcome = process_file(path, &options.parse);
    let (headings, mut error) = match &outcome {
        DocumentOutcome::Outline(result) => (result.outline.len(), None),
        DocumentOutcome::Failed(report) => (0, Some(report.error.clone())),
    };

    if let Err(e) = write_outcome(&output, &outcome, options.format) {
        log::warn!("Failed to write {}: {}", output.display(), e);
        error.get_or_insert_with(|| e.to_string());
    }

    let elapsed = start.elapsed();
    if error.is_none() {
        log::info!(
            "Processed {} in {:.2}s ({} headings)",
            display_name(path),
            elapsed.as_secs_f64(),
            headings
        );
    }

    DocumentReport {
        input: path.to_path_buf(),
        output,
        headings,
        error,
        elapsed,
    }
}

fn write_outcome(path: &Path, outcome: &DocumentOutcome, format: JsonFormat) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    write_json(writer, outcome, format)
}

/// `<output_dir>/<stem>.json` for an input PDF.
fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{}.json", stem))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
