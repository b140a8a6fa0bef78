//! Processing of the raw page view dump
//!
//! Each line of the dump reads `<language>.<project> <title> <count>`. Fields
//! are separated by a single ASCII space, and only by that, because some
//! titles contain other kinds of whitespace.

pub mod filter;

use crate::{
    config::Config,
    counts::{ViewCounts, ViewCountsBuilder},
    progress::{ProgressReport, Work},
    Result, Title, ViewCount,
};
use anyhow::Context;
use std::{num::ParseIntError, str::Utf8Error, sync::Arc};
use thiserror::Error;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader},
};

/// Project prefix of mobile site records, e.g. "en.m.z"
const MOBILE_PREFIX: &str = "m.";

/// Entry from the dump
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Record {
    /// Language code, e.g. "en"
    pub language: Box<str>,

    /// Project code, with the mobile prefix stripped
    pub project: Box<str>,

    /// Truth that the record came from a mobile site
    pub mobile: bool,

    /// Article title
    pub title: Title,

    /// Number of page views
    pub count: ViewCount,
}

/// Reasons why a line of the dump is not a valid record
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RecordError {
    #[error("expected 3 space-separated fields, found {0}")]
    FieldCount(usize),

    #[error("code {0:?} is not of the form <language>.<project>")]
    MissingProject(Box<str>),

    #[error("line is not valid UTF-8")]
    Encoding(#[source] Utf8Error),

    #[error("view count {raw:?} is not a base-10 integer")]
    Count {
        raw: Box<str>,
        #[source]
        source: ParseIntError,
    },
}

/// Malformed line of the dump
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("malformed record on line {line_number}")]
pub struct ParseError {
    /// 1-based line number
    pub line_number: usize,

    /// What is wrong with the line
    #[source]
    pub source: RecordError,
}

/// Parse one line of the dump
pub fn parse_line(line: &str) -> Result<Record, RecordError> {
    let line = line.trim();
    let mut fields = line.splitn(4, ' ');
    let (Some(code), Some(title), Some(count), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(RecordError::FieldCount(line.split(' ').count()));
    };

    let (language, project) = code
        .split_once('.')
        .ok_or_else(|| RecordError::MissingProject(code.into()))?;
    let (project, mobile) = match project.strip_prefix(MOBILE_PREFIX) {
        Some(desktop) => (desktop, true),
        None => (project, false),
    };

    let count = count.parse::<ViewCount>().map_err(|source| RecordError::Count {
        raw: count.into(),
        source,
    })?;

    Ok(Record {
        language: language.into(),
        project: project.into(),
        mobile,
        title: title.into(),
        count,
    })
}

/// Read the whole dump and sum up the views of every accepted title
pub async fn read_view_counts(
    config: Arc<Config>,
    report: &ProgressReport,
) -> Result<(ViewCounts, ReadStats)> {
    // Open the dump and measure it for progress reporting
    let path = config.raw_path();
    let context = || format!("reading page view dump {}", path.display());
    let file = File::open(&path).await.with_context(context)?;
    let size = file.metadata().await.with_context(context)?.len();
    let bytes = report.add("Reading page views", Work::Bytes(size));

    // Parse, filter and accumulate records line by line
    let mut filter = filter::make_record_filter(config);
    let mut counts = ViewCountsBuilder::new();
    let mut stats = ReadStats::default();
    let mut lines = BufReader::new(file).split(b'\n');
    while let Some(line) = lines.next_segment().await.with_context(context)? {
        stats.records += 1;
        bytes.make_progress(line.len() as u64 + 1);
        let record = std::str::from_utf8(&line)
            .map_err(RecordError::Encoding)
            .and_then(parse_line)
            .map_err(|source| ParseError {
                line_number: stats.records,
                source,
            })?;
        if filter(&record) {
            stats.accepted += 1;
            stats.mobile += usize::from(record.mobile);
            counts.add_record(record)?;
        }
    }
    bytes.finish();

    let counts = counts.finish();
    log::debug!(
        "Kept {} of {} records from {} ({} from mobile), covering {} titles",
        stats.accepted,
        stats.records,
        path.display(),
        stats.mobile,
        counts.len()
    );
    Ok((counts, stats))
}

/// What happened while reading the dump
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReadStats {
    /// Number of records in the dump
    pub records: usize,

    /// Number of records that passed the filter
    pub accepted: usize,

    /// Number of accepted records that came from the mobile site
    pub mobile: usize,
}
