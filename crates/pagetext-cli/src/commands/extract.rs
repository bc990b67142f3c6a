//! Extract command - full text of a single PDF.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::debug;

use pagetext_core::text::extract_range_with;
use pagetext_core::{DocumentStats, Download, ExtractionReport, PageRange, PageSource};

use super::{format_report, load_config, open_pdf, output_path, page_progress, write_download, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: <name>_extracted.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the output file
    #[arg(long, conflicts_with = "output")]
    output_dir: Option<PathBuf>,

    /// Print the extracted text instead of writing a file
    #[arg(long, conflicts_with_all = ["output", "output_dir"])]
    stdout: bool,

    /// Statistics format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let opened = open_pdf(&args.input, config.pdf.engine)?;
    let document = &opened.document;
    let page_count = document.page_count();

    let pb = page_progress(page_count);
    if args.stdout {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    let extraction = extract_range_with(document, PageRange::full(page_count), |_| pb.inc(1))?;
    pb.finish_and_clear();

    let stats = DocumentStats::compute(&extraction.text, page_count);
    let download = Download::full_text(&opened.file_name, &extraction);

    if args.stdout {
        print!("{}", download.content);
    } else {
        let path = output_path(&download, args.output.as_deref(), args.output_dir.as_deref(), &config);
        write_download(&download, &path)?;
        println!("{} Loaded {}", style("✓").green(), opened.file_name);
        println!("{} Text written to {}", style("✓").green(), path.display());
        println!();

        let report = ExtractionReport::new(&opened.file_name, document.engine(), &extraction, stats)
            .without_pages();
        println!("{}", format_report(&report, args.format)?);
    }

    opened.document.close();
    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
