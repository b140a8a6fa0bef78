//! Rank titles from the aggregated view counts

use crate::{counts::ViewCounts, Title, ViewCount};
use std::cmp::Reverse;

/// Sort titles by decreasing view count
///
/// Titles with the same view count come in lexicographic order, so that the
/// output does not depend on hash map iteration order.
pub fn rank_by_views(counts: ViewCounts) -> Vec<(Title, ViewCount)> {
    let mut ranked = counts.into_iter().collect::<Vec<_>>();
    ranked.sort_unstable_by(|(title1, count1), (title2, count2)| {
        (Reverse(count1), title1).cmp(&(Reverse(count2), title2))
    });
    ranked
}
