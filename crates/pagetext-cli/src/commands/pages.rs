//! Pages command - extract a range of pages.

use std::path::PathBuf;

use clap::Args;
use console::style;

use pagetext_core::{extract_range, Download, PageRange, PageSource};

use super::{load_config, open_pdf, output_path, write_download};

/// Arguments for the pages command.
#[derive(Args)]
pub struct PagesArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// First page, 1-indexed (default: 1)
    #[arg(short, long)]
    start: Option<u32>,

    /// Last page, inclusive (default: first page + configured span - 1, capped at the page count)
    #[arg(short, long)]
    end: Option<u32>,

    /// Output file (default: <name>_pages_<start>-<end>.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the output file
    #[arg(long, conflicts_with = "output")]
    output_dir: Option<PathBuf>,

    /// Print the extracted text instead of writing a file
    #[arg(long, conflicts_with_all = ["output", "output_dir"])]
    stdout: bool,
}

pub async fn run(args: PagesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let opened = open_pdf(&args.input, config.pdf.engine)?;
    let page_count = opened.document.page_count();

    let range = PageRange::resolve(args.start, args.end, page_count, config.output.default_range_span)?;

    let extraction = extract_range(&opened.document, range)?;
    let download = Download::page_range(&opened.file_name, &extraction);

    if args.stdout {
        print!("{}", download.content);
    } else {
        let path = output_path(&download, args.output.as_deref(), args.output_dir.as_deref(), &config);
        write_download(&download, &path)?;
        println!(
            "{} Pages {} of {} written to {}",
            style("✓").green(),
            range,
            page_count,
            path.display()
        );
    }

    opened.document.close();
    Ok(())
}
