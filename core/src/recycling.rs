//! Recycling efficiency ranking.
//!
//! recovered = waste_volume * (recycling_rate / 100)

use crate::{
    normalize::finite_or_zero,
    ranking::{build_ranked, Rankable, RankedResult},
    types::{FirmId, FirmRecord},
};
use serde::{Deserialize, Serialize};

pub const TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecyclingEntry {
    pub id: FirmId,
    pub name: String,
    pub waste_volume: f64,
    pub recycling_rate: f64,
    pub recovered: f64,
    pub rank: usize,
}

impl From<&FirmRecord> for RecyclingEntry {
    fn from(firm: &FirmRecord) -> Self {
        let waste_volume = finite_or_zero(firm.waste_volume);
        let recycling_rate = finite_or_zero(firm.recycling_rate);
        Self {
            id: firm.id,
            name: firm.display_name().to_string(),
            waste_volume,
            recycling_rate,
            recovered: recovered_waste(waste_volume, recycling_rate),
            rank: 0,
        }
    }
}

impl Rankable for RecyclingEntry {
    fn label(&self) -> &str {
        &self.name
    }
    fn metric(&self) -> f64 {
        self.recovered
    }
    fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }
}

/// Rate is on the 0–100 scale. Overflow reads as 0.
pub fn recovered_waste(waste_volume: f64, recycling_rate: f64) -> f64 {
    finite_or_zero(Some(waste_volume * (recycling_rate / 100.0)))
}

pub fn rank_recycling(firms: &[FirmRecord]) -> RankedResult<RecyclingEntry> {
    let entries: Vec<RecyclingEntry> = firms.iter().map(RecyclingEntry::from).collect();
    let result = build_ranked(entries, TOP_N, true);
    log::debug!(
        "recycling: ranked {} firms, {} with recovered waste in top slice",
        firms.len(),
        result.detail.len()
    );
    result
}
