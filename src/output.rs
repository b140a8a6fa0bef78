//! Writing of the search index input files
//!
//! `documents.txt` holds one null-terminated title per document, and
//! `terms.txt` holds, for each document in the same order, its
//! null-terminated terms followed by an extra null byte.

use crate::{
    config::Config,
    progress::{ProgressReport, ProgressTracker, Work},
    terms::extract_terms,
    Result, Title, ViewCount,
};
use anyhow::Context;
use serde::Serialize;
use std::{
    fmt,
    path::{Path, PathBuf},
};
use tokio::{
    fs::{self, File},
    io::{AsyncWriteExt, BufWriter},
};

/// Terminator of titles, terms and term groups
const NUL: &[u8] = b"\0";

/// Write the documents and terms files from a ranked list of titles
///
/// Both files are staged next to their final location and only moved into
/// place once completely written, so that they either both describe the
/// whole ranked list or are left untouched.
pub async fn write_index(
    config: &Config,
    ranked: &[(Title, ViewCount)],
    report: &ProgressReport,
) -> Result<IndexStats> {
    let mut documents = StagedFile::create(config.documents_path()).await?;
    let mut terms = match StagedFile::create(config.terms_path()).await {
        Ok(terms) => terms,
        Err(e) => {
            documents.discard().await;
            return Err(e);
        }
    };
    let progress = report.add("Writing documents", Work::PercentSteps(ranked.len()));
    let written = write_documents(&mut documents, &mut terms, ranked, &progress).await;
    progress.finish();

    let result = match written {
        Ok(stats) => commit_both(&mut documents, &mut terms).await.map(|()| stats),
        Err(e) => Err(e),
    };
    if result.is_err() {
        documents.discard().await;
        terms.discard().await;
    }
    result
}

/// Emit every document that has at least one term
async fn write_documents(
    documents: &mut StagedFile,
    terms: &mut StagedFile,
    ranked: &[(Title, ViewCount)],
    progress: &ProgressTracker,
) -> Result<IndexStats> {
    let mut stats = IndexStats::default();
    for (title, _views) in ranked {
        progress.make_progress(1);
        let title_terms = extract_terms(title);
        if title_terms.is_empty() {
            log::trace!("Dropped title {title:?} because it has no search term");
            stats.dropped += 1;
            continue;
        }

        documents.write(title.as_bytes()).await?;
        documents.write(NUL).await?;
        for term in &title_terms {
            terms.write(term.as_bytes()).await?;
            terms.write(NUL).await?;
        }
        terms.write(NUL).await?;
        stats.documents += 1;
    }
    Ok(stats)
}

/// Move both staged files into place
async fn commit_both(documents: &mut StagedFile, terms: &mut StagedFile) -> Result<()> {
    documents.flush().await?;
    terms.flush().await?;
    documents.commit().await?;
    terms.commit().await.inspect_err(|e| {
        log::warn!(
            "{} was replaced but {} was not, they no longer describe the same documents: {e:#}",
            documents.path.display(),
            terms.path.display()
        )
    })
}

/// What went into the index files
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct IndexStats {
    /// Number of documents written
    pub documents: usize,

    /// Number of titles skipped because they have no term
    pub dropped: usize,
}
//
impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents written, {} titles without terms dropped",
            self.documents, self.dropped
        )
    }
}

/// Output file that is written under a temporary name, then renamed
#[derive(Debug)]
struct StagedFile {
    /// Where the file should end up
    path: PathBuf,

    /// Where the file is being written
    staging_path: PathBuf,

    /// Buffered writer to the staging file
    writer: BufWriter<File>,
}
//
impl StagedFile {
    /// Start writing a new file
    async fn create(path: PathBuf) -> Result<Self> {
        let staging_path = staging_path(&path);
        let file = File::create(&staging_path)
            .await
            .with_context(|| format!("creating {}", staging_path.display()))?;
        Ok(Self {
            path,
            staging_path,
            writer: BufWriter::new(file),
        })
    }

    /// Append some bytes
    async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer
            .write_all(bytes)
            .await
            .with_context(|| format!("writing {}", self.staging_path.display()))
    }

    /// Make sure everything has reached the staging file
    async fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .await
            .with_context(|| format!("writing {}", self.staging_path.display()))
    }

    /// Move the staging file to its final location
    async fn commit(&mut self) -> Result<()> {
        fs::rename(&self.staging_path, &self.path)
            .await
            .with_context(|| {
                format!(
                    "moving {} to {}",
                    self.staging_path.display(),
                    self.path.display()
                )
            })
    }

    /// Remove the staging file after a failure
    async fn discard(&mut self) {
        if let Err(e) = fs::remove_file(&self.staging_path).await {
            log::debug!(
                "Failed to remove staging file {}: {e}",
                self.staging_path.display()
            );
        }
    }
}

/// Temporary name of an output file while it's being written
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Results served when a query doesn't match anything
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DefaultResults(Vec<Title>);

/// Write the default results file, which is always an empty result list
pub async fn write_default_results(config: &Config) -> Result<()> {
    let path = config.default_results_path();
    let json = serde_json::to_vec(&DefaultResults::default())
        .context("serializing default results")?;
    fs::write(&path, json)
        .await
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(entries: &[(&str, ViewCount)]) -> Vec<(Title, ViewCount)> {
        entries
            .iter()
            .map(|&(title, count)| (Title::from(title), count))
            .collect()
    }

    #[tokio::test]
    async fn index_layout() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::in_dir(dir.path());

        let stats = write_index(
            &config,
            &ranked(&[("Dog", 15), ("___", 9), ("3-D_Movie!!", 4), ("Cat", 3)]),
            &ProgressReport::hidden(),
        )
        .await
        .unwrap();
        assert_eq!(
            stats,
            IndexStats {
                documents: 3,
                dropped: 1
            }
        );

        let documents = std::fs::read(config.documents_path()).unwrap();
        assert_eq!(documents, b"Dog\03-D_Movie!!\0Cat\0");
        let terms = std::fs::read(config.terms_path()).unwrap();
        assert_eq!(terms, b"dog\0\03\0d\0movie\0\0cat\0\0");

        // Nothing staged is left behind
        assert!(!staging_path(&config.documents_path()).exists());
        assert!(!staging_path(&config.terms_path()).exists());
    }

    #[tokio::test]
    async fn empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::in_dir(dir.path());
        let stats = write_index(&config, &[], &ProgressReport::hidden())
            .await
            .unwrap();
        assert_eq!(stats, IndexStats::default());
        assert!(std::fs::read(config.documents_path()).unwrap().is_empty());
        assert!(std::fs::read(config.terms_path()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::in_dir(dir.path().join("missing"));
        let error = write_index(&config, &ranked(&[("Dog", 1)]), &ProgressReport::hidden())
            .await
            .unwrap_err();
        assert!(error.to_string().contains("documents.txt.tmp"));
    }

    #[tokio::test]
    async fn terms_commit_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::in_dir(dir.path());

        // A non-empty directory can't be replaced by a file
        std::fs::create_dir(config.terms_path()).unwrap();
        std::fs::write(config.terms_path().join("keep"), b"").unwrap();

        let error = write_index(&config, &ranked(&[("Dog", 1)]), &ProgressReport::hidden())
            .await
            .unwrap_err();
        assert!(error.to_string().contains("terms.txt"));
        assert_eq!(std::fs::read(config.documents_path()).unwrap(), b"Dog\0");
        assert!(!staging_path(&config.terms_path()).exists());
    }

    #[test]
    fn staging_names() {
        assert_eq!(
            staging_path(Path::new("out/terms.txt")),
            Path::new("out/terms.txt.tmp")
        );
    }

    #[tokio::test]
    async fn default_results() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::in_dir(dir.path());
        write_default_results(&config).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(config.default_results_path()).unwrap(),
            "[]"
        );
    }
}
