//! Page view totals per title

use crate::{pageviews::Record, Result, Title, ViewCount};
use anyhow::Context;
use std::collections::{hash_map, HashMap};

/// Total page views of each title
///
/// Accumulated using [`ViewCountsBuilder`]
pub type ViewCounts = HashMap<Title, ViewCount>;

/// Accumulator of page views across the records of a dump
#[derive(Debug, Default)]
pub struct ViewCountsBuilder {
    /// Views accumulated so far
    counts: ViewCounts,
}
//
impl ViewCountsBuilder {
    /// Set up the accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate a new (already filtered) record
    pub fn add_record(&mut self, record: Record) -> Result<()> {
        let Record { title, count, .. } = record;
        match self.counts.entry(title) {
            hash_map::Entry::Occupied(mut o) => {
                let total = o
                    .get()
                    .checked_add(count)
                    .with_context(|| format!("view count of {:?} overflowed", o.key()))?;
                *o.get_mut() = total;
            }
            hash_map::Entry::Vacant(v) => {
                v.insert(count);
            }
        }
        Ok(())
    }

    /// Export final view counts
    pub fn finish(self) -> ViewCounts {
        self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, count: ViewCount) -> Record {
        Record {
            language: "en".into(),
            project: "z".into(),
            mobile: false,
            title: title.into(),
            count,
        }
    }

    #[test]
    fn sums_per_title() {
        let mut builder = ViewCountsBuilder::new();
        for (title, count) in [("Dog", 10), ("Cat", 3), ("Dog", 5), ("dog", 1), ("Cat", 0)] {
            builder.add_record(record(title, count)).unwrap();
        }
        let counts = builder.finish();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts["Dog"], 15);
        assert_eq!(counts["dog"], 1);
        assert_eq!(counts["Cat"], 3);
    }

    #[test]
    fn overflow_is_an_error() {
        let mut builder = ViewCountsBuilder::new();
        builder.add_record(record("Dog", ViewCount::MAX)).unwrap();
        let error = builder.add_record(record("Dog", 1)).unwrap_err();
        assert!(error.to_string().contains("\"Dog\""));
    }
}
