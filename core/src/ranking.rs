//! Ranking primitives shared by every panel.
//!
//! RULES:
//!   - Sorting is stable and descending by metric; equal metrics keep
//!     their input order.
//!   - Ranks are assigned over the whole population before any slicing.
//!   - Top-N slicing only drops entries (non-positive metrics, overflow),
//!     it never reorders.

use crate::types::ScoringParameters;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An entity that can be placed in a ranked list.
pub trait Rankable {
    fn label(&self) -> &str;
    fn metric(&self) -> f64;
    fn set_rank(&mut self, rank: usize);
}

/// Result shape consumed by chart panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult<T> {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub detail: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_ranked: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ResolvedParameters>,
}

impl<T> RankedResult<T> {
    pub fn empty() -> Self {
        Self {
            labels: Vec::new(),
            values: Vec::new(),
            detail: Vec::new(),
            all_ranked: None,
            parameters: None,
        }
    }
}

impl<T> Default for RankedResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Echo of the scoring parameters: as supplied, and after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedParameters {
    pub supplied: ScoringParameters,
    pub women_ratio: f64,
    pub disabled_ratio: f64,
    pub min_year: i32,
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Stable descending sort, then 1-based ranks in sorted order.
pub fn rank_all<T: Rankable>(items: &mut [T]) {
    items.sort_by(|a, b| descending(a.metric(), b.metric()));
    for (i, item) in items.iter_mut().enumerate() {
        item.set_rank(i + 1);
    }
}

/// First `n` entries with a strictly positive metric. Expects a ranked slice.
pub fn top_positive<T: Rankable + Clone>(ranked: &[T], n: usize) -> Vec<T> {
    ranked
        .iter()
        .filter(|item| item.metric() > 0.0)
        .take(n)
        .cloned()
        .collect()
}

/// Rank the whole population and build the top-`n` presentation slice.
/// When `positive_only` is set, non-positive entries stay out of the slice
/// but remain in `all_ranked`.
pub fn build_ranked<T: Rankable + Clone>(
    mut items: Vec<T>,
    n: usize,
    positive_only: bool,
) -> RankedResult<T> {
    rank_all(&mut items);
    let detail: Vec<T> = if positive_only {
        top_positive(&items, n)
    } else {
        items.iter().take(n).cloned().collect()
    };
    RankedResult {
        labels: detail.iter().map(|d| d.label().to_string()).collect(),
        values: detail.iter().map(Rankable::metric).collect(),
        detail,
        all_ranked: Some(items),
        parameters: None,
    }
}

/// Look up an entry's position in a full ranking by predicate.
pub fn find_rank<T: Rankable>(ranked: &[T], pred: impl Fn(&T) -> bool) -> Option<usize> {
    ranked.iter().position(pred).map(|i| i + 1)
}
