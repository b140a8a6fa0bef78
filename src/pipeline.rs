//! The whole page views to index files transformation

use crate::{
    config::Config,
    output::{self, IndexStats},
    pageviews::{self, ReadStats},
    progress::ProgressReport,
    top, Result,
};
use std::{fmt, sync::Arc};

/// Read the dump, rank titles and write all output files
///
/// The default results file is written even if building the index failed,
/// since its content does not depend on the dump. The first error is the
/// one that gets reported.
pub async fn run(config: Arc<Config>, report: &ProgressReport) -> Result<Summary> {
    log::debug!("Processing page views in {}", config.data_dir().display());
    let index = build_index(config.clone(), report).await;
    let default_results = output::write_default_results(&config).await;
    let summary = match index {
        Ok(summary) => summary,
        Err(e) => {
            if let Err(placeholder_error) = &default_results {
                log::warn!("Also failed to write default results: {placeholder_error:#}");
            }
            return Err(e);
        }
    };
    default_results?;
    Ok(summary)
}

/// Read the dump, rank titles and write the documents and terms files
async fn build_index(config: Arc<Config>, report: &ProgressReport) -> Result<Summary> {
    let (counts, read) = pageviews::read_view_counts(config.clone(), report).await?;
    let titles = counts.len();
    let ranked = top::rank_by_views(counts);
    log::debug!("Ranked {titles} titles by decreasing views");
    let index = output::write_index(&config, &ranked, report).await?;
    Ok(Summary {
        read,
        titles,
        index,
    })
}

/// Outcome of a successful run
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Summary {
    /// What was read from the dump
    pub read: ReadStats,

    /// Number of distinct accepted titles
    pub titles: usize,

    /// What was written to the index files
    pub index: IndexStats,
}
//
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} records accepted, {} distinct titles, {}",
            self.read.accepted, self.read.records, self.titles, self.index
        )
    }
}
