//! pdfoutline CLI - PDF heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{
    list_pdfs, process_directory_with_progress, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR,
};
use pdfoutline::{analyze, render, BatchOptions, JsonFormat, Outliner, ParseOptions, PdfParser};

/// Histogram rows shown by `inspect`.
const INSPECT_HISTOGRAM_ROWS: usize = 10;

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract a title and H1-H3 heading outline from PDF files as JSON", long_about = None)]
struct Cli {
    /// Input PDF file or directory of PDFs
    #[arg(value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output file (for a PDF) or directory (for a directory)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of one PDF
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Fail on the first unreadable page
        #[arg(long)]
        strict: bool,
    },

    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(short, long, value_name = "DIR", env = "PDFOUTLINE_INPUT", default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        /// Directory receiving one JSON file per PDF
        #[arg(short, long, value_name = "DIR", env = "PDFOUTLINE_OUTPUT", default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Number of worker threads (defaults to available cores)
        #[arg(short, long, value_name = "N", env = "PDFOUTLINE_JOBS")]
        jobs: Option<usize>,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Fail a document on its first unreadable page
        #[arg(long)]
        strict: bool,
    },

    /// Show the font statistics and thresholds behind an outline
    Inspect {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            compact,
            strict,
        }) => cmd_outline(&input, output.as_deref(), compact, strict),
        Some(Commands::Batch {
            input,
            output,
            jobs,
            sequential,
            compact,
            strict,
        }) => {
            let mut options = BatchOptions::new(input, output)
                .with_parallel(!sequential)
                .with_format(json_format(compact))
                .with_parse_options(parse_options(strict));
            options.jobs = jobs;
            cmd_batch(&options)
        }
        Some(Commands::Inspect { input }) => cmd_inspect(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match cli.input {
            // Default behavior: a directory is a batch, a file is a single outline
            Some(input) if input.is_dir() => {
                let output = cli
                    .output
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
                cmd_batch(&BatchOptions::new(input, output))
            }
            Some(input) => cmd_outline(&input, cli.output.as_deref(), false, false),
            None => {
                println!("{}", "Usage: pdfoutline <FILE|DIR> [OUTPUT]".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn parse_options(strict: bool) -> ParseOptions {
    if strict {
        ParseOptions::new().strict()
    } else {
        ParseOptions::new().lenient()
    }
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = Outliner::new()
        .with_parse_options(parse_options(strict))
        .extract_file(input)?;

    let json = render::to_json(&result, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(options: &BatchOptions) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(&options.input_dir)?;
    let total = list_pdfs(&options.input_dir)?.len();

    if total == 0 {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            options.input_dir.display()
        );
        println!("       Place PDF files there or pass --input <DIR>");
        return Ok(());
    }

    log::debug!(
        "batch: {} -> {} (jobs: {:?}, parallel: {})",
        options.input_dir.display(),
        options.output_dir.display(),
        options.jobs,
        options.parallel
    );

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let summary = process_directory_with_progress(options, |report| {
        pb.set_message(report.file_name());
        pb.inc(1);
    })?;

    pb.finish_and_clear();

    for report in &summary.documents {
        let name = report.file_name();
        let secs = report.elapsed.as_secs_f64();
        match &report.error {
            None => println!(
                "  {} {} ({} headings, {:.2}s)",
                "✓".green(),
                name,
                report.headings,
                secs
            ),
            Some(e) => println!("  {} {} {} ({:.2}s)", "✗".red(), name, e.red(), secs),
        }
    }

    println!();
    println!(
        "{} {} processed, {} failed in {:.2}s",
        "Done!".green().bold(),
        summary.succeeded(),
        summary.failed(),
        summary.elapsed.as_secs_f64()
    );
    println!("Output: {}", options.output_dir.display());

    Ok(())
}

fn cmd_inspect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient so statistics can be shown even if some pages fail
    let parser = PdfParser::open_with_options(input, ParseOptions::new().lenient())?;
    let analysis = analyze(&parser.parse()?);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), parser.version());
    println!("{}: {}", "Pages".bold(), parser.page_count());
    println!("{}: {}", "Text runs".bold(), analysis.runs.len());

    println!();
    println!("{}", "Font Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    match analysis.statistics.body_size {
        Some(size) => println!("{}: {:.1}pt", "Body size".bold(), size),
        None => println!("{}: {}", "Body size".bold(), "unknown".dimmed()),
    }
    for (size, count) in analysis
        .statistics
        .histogram
        .entries()
        .iter()
        .take(INSPECT_HISTOGRAM_ROWS)
    {
        println!("  {:>6.1}pt  {}", size, count);
    }

    println!();
    println!("{}", "Heading Thresholds".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let t = &analysis.thresholds;
    println!("{}: {:.2}", "H1".bold(), t.h1);
    println!("{}: {:.2}", "H2".bold(), t.h2);
    println!("{}: {:.2}", "H3".bold(), t.h3);
    println!("{}: {:.2}", "Minimum".bold(), t.min_heading_size);

    println!();
    match &analysis.title {
        Some(title) => println!(
            "{}: {} ({:.1}pt)",
            "Title".bold(),
            title.text,
            title.font_size
        ),
        None => println!("{}: {}", "Title".bold(), "none".dimmed()),
    }
    println!(
        "{}: {} provisional, {} final",
        "Headings".bold(),
        analysis.provisional.len(),
        analysis.result.outline.len()
    );

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pdfoutline".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("PDF heading outline extraction tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/pdfoutline".dimmed()
    );
    println!("License: MIT");
}
