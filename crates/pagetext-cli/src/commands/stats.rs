//! Stats command - document statistics without writing any files.

use std::path::PathBuf;

use clap::Args;

use pagetext_core::{extract_all, DocumentStats, ExtractionReport, PageSource};

use super::{format_report, load_config, open_pdf, OutputFormat};

/// Arguments for the stats command.
#[derive(Args)]
pub struct StatsArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Include per-page text in JSON output
    #[arg(long)]
    with_pages: bool,
}

pub async fn run(args: StatsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let opened = open_pdf(&args.input, config.pdf.engine)?;

    let extraction = extract_all(&opened.document)?;
    let stats = DocumentStats::compute(&extraction.text, opened.document.page_count());

    let mut report = ExtractionReport::new(&opened.file_name, opened.document.engine(), &extraction, stats);
    if !args.with_pages {
        report = report.without_pages();
    }

    println!("{}", format_report(&report, args.format)?.trim_end());
    opened.document.close();

    Ok(())
}
