//! Parametric entrepreneur scoring for the what-if panel.
//!
//! Each candidate is scored by proximity to three analyst-supplied
//! reference values. Moving a reference re-ranks the population, so
//! candidates closest to the target win, not merely those above it.
//!
//! score = 0.4 * women + 0.3 * disabled + 0.3 * year
//!
//!   women/disabled: ref > 0.001 → max(0, 1 − |ratio − ref| / max(ref, 0.01))
//!                   otherwise   → 1 − ratio
//!   year:           year ≥ ref  → 1
//!                   otherwise   → max(0, 1 − (ref − year) / 10)

use crate::{
    normalize::{normalize01, to_percent01},
    ranking::{build_ranked, Rankable, RankedResult, ResolvedParameters},
    types::{EntrepreneurRecord, RecordId, ScoringParameters},
};
use serde::{Deserialize, Serialize};

pub const WOMEN_WEIGHT: f64 = 0.4;
pub const DISABLED_WEIGHT: f64 = 0.3;
pub const YEAR_WEIGHT: f64 = 0.3;

/// Entries shown in the chart.
pub const TOP_N: usize = 10;

/// References at or below this count as "no target set".
const TARGET_EPSILON: f64 = 0.001;
/// Floor for the proximity denominator.
const MIN_DENOMINATOR: f64 = 0.01;
/// Years short of the minimum that decay the year component to zero.
const YEAR_DECAY_SPAN: f64 = 10.0;

/// Weighted contribution of each factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub women: f64,
    pub disabled: f64,
    pub year: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntrepreneur {
    pub id: RecordId,
    pub name: String,
    /// Normalized ratio re-expressed on the 0–100 scale.
    pub women_ratio_pct: f64,
    pub disabled_ratio_pct: f64,
    pub established_year: i32,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub rank: usize,
}

impl Rankable for ScoredEntrepreneur {
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

/// Proximity of `ratio` to `reference`, both already on [0, 1].
pub fn proximity_score(ratio: f64, reference: f64) -> f64 {
    if reference > TARGET_EPSILON {
        (1.0 - (ratio - reference).abs() / reference.max(MIN_DENOMINATOR)).max(0.0)
    } else {
        1.0 - ratio
    }
}

/// Linear decay of one point per ten years short of `min_year`.
pub fn year_score(year: i32, min_year: i32) -> f64 {
    if year >= min_year {
        1.0
    } else {
        let short = f64::from(min_year) - f64::from(year);
        (1.0 - short / YEAR_DECAY_SPAN).max(0.0)
    }
}

pub fn resolve_parameters(params: &ScoringParameters) -> ResolvedParameters {
    ResolvedParameters {
        supplied: *params,
        women_ratio: normalize01(Some(params.ref_women_ratio)),
        disabled_ratio: normalize01(Some(params.ref_disabled_ratio)),
        min_year: params.ref_min_year,
    }
}

pub fn score_entrepreneur(
    record: &EntrepreneurRecord,
    resolved: &ResolvedParameters,
) -> ScoredEntrepreneur {
    let women_ratio = normalize01(record.women_ratio);
    let disabled_ratio = normalize01(record.disabled_ratio);
    let year = record.established_year.unwrap_or(0);

    let breakdown = ScoreBreakdown {
        women: proximity_score(women_ratio, resolved.women_ratio) * WOMEN_WEIGHT,
        disabled: proximity_score(disabled_ratio, resolved.disabled_ratio) * DISABLED_WEIGHT,
        year: year_score(year, resolved.min_year) * YEAR_WEIGHT,
    };

    ScoredEntrepreneur {
        id: record.id,
        name: record.display_name().to_string(),
        women_ratio_pct: to_percent01(Some(women_ratio)),
        disabled_ratio_pct: to_percent01(Some(disabled_ratio)),
        established_year: year,
        score: breakdown.women + breakdown.disabled + breakdown.year,
        breakdown,
        rank: 0,
    }
}

/// Score every candidate and return the top ten with the parameter echo.
pub fn rank_entrepreneurs(
    records: &[EntrepreneurRecord],
    params: &ScoringParameters,
) -> RankedResult<ScoredEntrepreneur> {
    let resolved = resolve_parameters(params);
    let scored: Vec<ScoredEntrepreneur> = records
        .iter()
        .map(|r| score_entrepreneur(r, &resolved))
        .collect();

    log::debug!(
        "entrepreneur: scored {} candidates (women={:.3} disabled={:.3} min_year={})",
        scored.len(),
        resolved.women_ratio,
        resolved.disabled_ratio,
        resolved.min_year
    );

    let mut result = build_ranked(scored, TOP_N, false);
    result.all_ranked = None;
    result.parameters = Some(resolved);
    result
}
