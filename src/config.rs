//! Processing pipeline configuration

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Language code of the records that we keep
pub const LANGUAGE: &str = "en";

/// Project code of the records that we keep, after mobile normalization
///
/// In pagecounts-ez dumps, "z" stands for Wikipedia.
pub const PROJECT: &str = "z";

/// Raw page view dump
pub const RAW_FILE: &str = "raw.txt";

/// Null-terminated document titles, by decreasing popularity
pub const DOCUMENTS_FILE: &str = "documents.txt";

/// Null-terminated term groups, parallel to [`DOCUMENTS_FILE`]
pub const TERMS_FILE: &str = "terms.txt";

/// Results to be served when a query matches nothing
pub const DEFAULT_RESULTS_FILE: &str = "default-results.txt";

/// Final process configuration
///
/// Nothing here is user-tunable, but carrying it around explicitly lets the
/// pipeline run against any directory.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    /// Language code of accepted records
    pub language: &'static str,

    /// Normalized project code of accepted records
    pub project: &'static str,

    /// Directory where the input is read and the outputs are written
    data_dir: PathBuf,
}
//
impl Config {
    /// Configuration for a run in the current working directory
    pub fn in_working_dir() -> Arc<Self> {
        Self::in_dir(".")
    }

    /// Configuration for a run in some other directory
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Arc<Self> {
        Arc::new(Self {
            language: LANGUAGE,
            project: PROJECT,
            data_dir: data_dir.into(),
        })
    }

    /// Directory holding input and outputs
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Location of the raw page view dump
    pub fn raw_path(&self) -> PathBuf {
        self.data_dir.join(RAW_FILE)
    }

    /// Location of the documents output
    pub fn documents_path(&self) -> PathBuf {
        self.data_dir.join(DOCUMENTS_FILE)
    }

    /// Location of the terms output
    pub fn terms_path(&self) -> PathBuf {
        self.data_dir.join(TERMS_FILE)
    }

    /// Location of the default results output
    pub fn default_results_path(&self) -> PathBuf {
        self.data_dir.join(DEFAULT_RESULTS_FILE)
    }
}
