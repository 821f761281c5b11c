//! Sustainability compliance ranking.
//!
//! Uses only the latest forecast per firm. Firms with no forecast history
//! score 0: they keep a rank in the full population but never appear in
//! the top-7 slice, which is not padded when fewer firms qualify.

use crate::{
    forecast::latest_by_firm,
    normalize::finite_or_zero,
    ranking::{build_ranked, Rankable, RankedResult},
    types::{FirmId, FirmRecord, ForecastRecord},
};
use serde::{Deserialize, Serialize};

pub const TOP_N: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityEntry {
    pub id: FirmId,
    pub name: String,
    pub score: f64,
    pub rank: usize,
}

impl SustainabilityEntry {
    pub fn new(id: FirmId, name: impl Into<String>, score: Option<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            score: finite_or_zero(score),
            rank: 0,
        }
    }
}

impl Rankable for SustainabilityEntry {
    fn label(&self) -> &str {
        &self.name
    }
    fn metric(&self) -> f64 {
        self.score
    }
    fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }
}

/// Rank firms whose latest score has already been resolved.
pub fn rank_latest_scores(entries: Vec<SustainabilityEntry>) -> RankedResult<SustainabilityEntry> {
    let result = build_ranked(entries, TOP_N, true);
    log::debug!(
        "sustainability: ranked {} firms, {} in top slice",
        result.all_ranked.as_ref().map_or(0, Vec::len),
        result.detail.len()
    );
    result
}

/// Join firms with their latest forecast, then rank.
pub fn rank_sustainability(
    firms: &[FirmRecord],
    forecasts: &[ForecastRecord],
) -> RankedResult<SustainabilityEntry> {
    let latest = latest_by_firm(forecasts);
    let entries = firms
        .iter()
        .map(|firm| {
            let score = latest.get(&firm.id).and_then(|f| f.sustainability_score);
            SustainabilityEntry::new(firm.id, firm.display_name(), score)
        })
        .collect();
    rank_latest_scores(entries)
}
