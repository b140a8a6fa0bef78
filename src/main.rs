//! This program turns a Wikimedia page view dump, like the monthly ones from
//! <https://dumps.wikimedia.org/other/pagecounts-ez/>, into the documents and
//! terms files of a title search index.
//!
//! All input and output files live in the current working directory.

mod config;
mod counts;
mod output;
mod pageviews;
mod pipeline;
mod progress;
mod terms;
mod top;

use crate::{config::Config, progress::ProgressReport};
use clap::Parser;
use log::LevelFilter;

/// Build title search index inputs from a page view dump
///
/// Reads `raw.txt`, keeps English Wikipedia records, ranks article titles by
/// total view count, and writes `documents.txt`, `terms.txt` and
/// `default-results.txt`.
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {}
//
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Set up logging
    setup_logging().map_err(|e| anyhow::format_err!("{e}"))?;

    // Decode CLI arguments (only --help and --version exist)
    let Args {} = Args::parse();

    // Run the pipeline in the current directory
    let config = Config::in_working_dir();
    let report = ProgressReport::new();
    let summary = pipeline::run(config, &report).await?;
    log::info!("Done: {summary}");
    Ok(())
}

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Case-sensitive article title, as found in the dump
pub type Title = Box<str>;

/// Number of page views
///
/// Monthly dumps of the most popular articles reach into the hundreds of
/// millions of views per title, and we sum across desktop and mobile sites,
/// so 32 bits would be too tight. Counts are signed: any base-10 integer in the
/// dump is taken at face value.
pub type ViewCount = i64;

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}
