use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use log::error;
use pdf_spread::constants::*;
use pdf_spread::{BookOptions, MergeOptions, MergeOutcome, SplitOptions, SplitReport};
use std::path::PathBuf;
use std::process::ExitCode;

mod logger;

use logger::ConsoleLogger;

#[derive(Parser)]
#[command(
    name = "spread",
    about = "Split scanned two-page PDF sheets into page images and merge them back",
    version
)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render each sheet and write its right and left halves as numbered JPGs
    Split {
        /// Scanned PDF, two book pages per sheet
        #[arg(short, long, default_value = DEFAULT_SOURCE_PDF)]
        input: PathBuf,

        /// Output directory (deleted and recreated)
        #[arg(short, long, default_value = DEFAULT_PAGES_DIR)]
        output: PathBuf,

        /// Rendering resolution in dots per inch
        #[arg(long, default_value_t = DEFAULT_DPI)]
        dpi: u32,

        /// JPEG quality of the page images
        #[arg(long, default_value_t = DEFAULT_SPLIT_QUALITY)]
        quality: u8,

        /// pdfium library file or directory
        #[arg(long)]
        pdfium: Option<PathBuf>,
    },

    /// Merge the *.jpg files of a directory, in filename order, into one PDF
    Merge {
        /// Directory holding the page images
        #[arg(short, long, default_value = DEFAULT_PAGES_DIR)]
        input: PathBuf,

        /// Merged PDF file
        #[arg(short, long, default_value = DEFAULT_MERGED_PDF)]
        output: PathBuf,

        /// Pixels per inch used to size the pages
        #[arg(long, default_value_t = DEFAULT_MERGE_RESOLUTION)]
        resolution: f32,

        /// JPEG quality of the embedded pages
        #[arg(long, default_value_t = DEFAULT_MERGE_QUALITY)]
        quality: u8,
    },

    /// Split a scanned PDF, then merge its pages into a single-page-per-sheet PDF
    Book {
        /// Load options from a JSON file; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the effective options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Scanned PDF
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Merged PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Intermediate page image directory (deleted and recreated)
        #[arg(long)]
        pages_dir: Option<PathBuf>,

        /// Rendering resolution in dots per inch
        #[arg(long)]
        dpi: Option<u32>,

        /// Pixels per inch used to size the merged pages
        #[arg(long)]
        resolution: Option<f32>,

        /// pdfium library file or directory
        #[arg(long)]
        pdfium: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    ConsoleLogger::new(ConsoleLogger::level_for(cli.verbose, cli.quiet)).init()?;

    let succeeded = match cli.command {
        Commands::Split {
            input,
            output,
            dpi,
            quality,
            pdfium,
        } => {
            let options = SplitOptions {
                source: input,
                output_dir: output,
                dpi,
                jpeg_quality: quality,
                pdfium_library: pdfium,
            };
            let report = pdf_spread::split_pdf(&options).await?;
            print_split(&report)
        }

        Commands::Merge {
            input,
            output,
            resolution,
            quality,
        } => {
            let options = MergeOptions {
                input_dir: input,
                output,
                resolution,
                jpeg_quality: quality,
            };
            print_merge(&options, pdf_spread::merge_images(&options).await)
        }

        Commands::Book {
            config,
            save_config,
            input,
            output,
            pages_dir,
            dpi,
            resolution,
            pdfium,
        } => {
            let mut options = match config {
                Some(path) => BookOptions::load(&path).await?,
                None => BookOptions::default(),
            };
            if let Some(input) = input {
                options.split.source = input;
            }
            if let Some(output) = output {
                options.merge.output = output;
            }
            if let Some(pages_dir) = pages_dir {
                options.split.output_dir = pages_dir;
            }
            if let Some(dpi) = dpi {
                options.split.dpi = dpi;
            }
            if let Some(resolution) = resolution {
                options.merge.resolution = resolution;
            }
            if pdfium.is_some() {
                options.split.pdfium_library = pdfium;
            }

            if let Some(path) = save_config {
                options.save(&path).await?;
                println!("Saved options → {}", path.display());
            }

            let report = pdf_spread::convert_book(&options).await?;
            let split_ok = print_split(&report.split);
            match report.merge {
                Some(merge) => split_ok && print_merge(&options.linked_merge(), merge),
                None => false,
            }
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print the split summary; the written count is shown even after a failure
fn print_split(report: &SplitReport) -> bool {
    if let Some(err) = &report.error {
        error!("Split failed: {}", err);
    }
    println!(
        "Split {} page images → {}",
        report.pages_written(),
        report.output_dir.display()
    );
    report.is_complete()
}

fn print_merge(options: &MergeOptions, outcome: pdf_spread::Result<MergeOutcome>) -> bool {
    match outcome {
        Ok(MergeOutcome::NoImages) => {
            println!("No JPG files found in '{}'", options.input_dir.display());
            true
        }
        Ok(MergeOutcome::Written { path, pages }) => {
            println!("Merged {} images → {}", pages, path.display());
            true
        }
        Err(e) => {
            error!("Merge failed: {}", e);
            false
        }
    }
}
