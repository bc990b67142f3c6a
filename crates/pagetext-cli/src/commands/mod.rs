//! Subcommands and the helpers they share.

pub mod config;
pub mod extract;
pub mod pages;
pub mod stats;

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use pagetext_core::models::config::PagetextConfig;
use pagetext_core::report::ExtractionReport;
use pagetext_core::stats::format_count;
use pagetext_core::{Download, PdfDocument, TextEngine};

/// How statistics are printed.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary
    Text,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

/// Load the configuration named by `--config`, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PagetextConfig> {
    Ok(PagetextConfig::load_or_default(config_path.map(Path::new))?)
}

/// An input PDF opened for extraction.
pub struct OpenedPdf {
    /// File name including extension, used to name downloads.
    pub file_name: String,
    pub document: PdfDocument,
}

pub fn open_pdf(input: &Path, engine: TextEngine) -> anyhow::Result<OpenedPdf> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());

    info!("Processing file: {}", input.display());

    let data = fs::read(input)?;
    let document = PdfDocument::load(&data, engine)?;

    Ok(OpenedPdf {
        file_name,
        document,
    })
}

/// Progress bar with one tick per page.
pub fn page_progress(pages: u32) -> ProgressBar {
    let pb = ProgressBar::new(pages as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pages")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb
}

/// Where a download should be written: `--output`, else `--output-dir`/name,
/// else the configured output directory, else the current directory.
pub fn output_path(
    download: &Download,
    output: Option<&Path>,
    output_dir: Option<&Path>,
    config: &PagetextConfig,
) -> PathBuf {
    if let Some(path) = output {
        return path.to_path_buf();
    }

    output_dir
        .map(Path::to_path_buf)
        .or_else(|| config.output.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
        .join(&download.file_name)
}

pub fn write_download(download: &Download, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, download.as_bytes())?;
    debug!("Wrote {} bytes to {}", download.content.len(), path.display());
    Ok(())
}

pub fn format_report(report: &ExtractionReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
    }
}

fn format_text(report: &ExtractionReport) -> String {
    let stats = &report.stats;
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", report.file_name));
    output.push_str(&format!("Pages extracted: {}\n", report.range));
    output.push_str("\n");
    output.push_str(&format!("Total Pages: {}\n", stats.page_count));
    output.push_str(&format!("Total Words: {}\n", format_count(stats.word_count)));
    output.push_str(&format!("Total Characters: {}\n", format_count(stats.char_count)));
    output.push_str(&format!("Average Words per Page: {}\n", stats.avg_words_per_page));

    output
}

fn format_csv(report: &ExtractionReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "file_name",
        "pages",
        "total_pages",
        "total_words",
        "total_characters",
        "avg_words_per_page",
    ])?;

    let stats = &report.stats;
    wtr.write_record([
        report.file_name.clone(),
        report.range.to_string(),
        stats.page_count.to_string(),
        stats.word_count.to_string(),
        stats.char_count.to_string(),
        stats.avg_words_per_page.to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
