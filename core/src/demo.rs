//! Deterministic demo dataset, for running the dashboard without an
//! upstream database. Same seed, same dataset.
//!
//! The generator deliberately mixes the messy shapes real rows arrive in:
//! ratios on both scales, firms without forecast history, and forecast
//! returns above the money ceiling.

use crate::{
    dataset::Dataset,
    kpi::DEFAULT_ALLOCATION_PERCENTAGE,
    money::MAX_MONEY,
    name_generator::NameGenerator,
    normalize::PERCENT_THRESHOLD,
    rng::{DemoRng, Stream},
    types::{EntrepreneurRecord, FirmRecord, ForecastRecord},
};
use chrono::{DateTime, Utc};

/// 2024-01-01T00:00:00Z
const FORECAST_EPOCH_SECS: i64 = 1_704_067_200;
const SECS_PER_DAY: i64 = 86_400;

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Percentages at or below the threshold would read back as fractions,
/// so those are always stored as fractions.
fn stored_ratio(pct: f64, as_percent: bool) -> f64 {
    let pct = round1(pct);
    if as_percent && pct > PERCENT_THRESHOLD {
        pct
    } else {
        pct / 100.0
    }
}

pub fn generate(seed: u64, firm_count: usize, entrepreneur_count: usize) -> Dataset {
    let firms = generate_firms(seed, firm_count);
    let forecasts = generate_forecasts(seed, &firms);
    let entrepreneurs = generate_entrepreneurs(seed, entrepreneur_count);
    log::info!(
        "demo: seed={seed} firms={} forecasts={} entrepreneurs={}",
        firms.len(),
        forecasts.len(),
        entrepreneurs.len()
    );
    Dataset {
        firms,
        forecasts,
        entrepreneurs,
        allocation_percentage: Some(DEFAULT_ALLOCATION_PERCENTAGE),
    }
}

fn generate_firms(seed: u64, count: usize) -> Vec<FirmRecord> {
    let mut rng = DemoRng::new(seed, Stream::Firms);
    (1..=count)
        .map(|i| {
            let recycling_rate = if rng.chance(0.1) {
                0.0
            } else {
                round1(rng.between(5.0, 95.0))
            };
            FirmRecord {
                id: i as i64,
                name: Some(NameGenerator::firm_name(&mut rng)),
                waste_volume: Some(round1(rng.between(100.0, 5_000.0))),
                recycling_rate: Some(recycling_rate),
                revenue: Some(rng.between(1.0e6, 5.0e8).round()),
            }
        })
        .collect()
}

fn generate_forecasts(seed: u64, firms: &[FirmRecord]) -> Vec<ForecastRecord> {
    let mut rng = DemoRng::new(seed, Stream::Forecasts);
    let mut forecasts = Vec::new();
    for firm in firms {
        // Some firms have no forecast history at all.
        if rng.chance(0.1) {
            continue;
        }
        let history = 1 + rng.index(3);
        for k in 0..history {
            let day = (k as i64) * 90 + rng.index(30) as i64;
            let forecast_return = if rng.chance(0.05) {
                MAX_MONEY * rng.between(1.0, 3.0)
            } else {
                rng.between(1.0e6, 2.0e8).round()
            };
            forecasts.push(ForecastRecord {
                id: forecasts.len() as i64 + 1,
                firm_id: firm.id,
                forecast_return: Some(forecast_return),
                sustainability_score: Some(round1(rng.between(0.0, 100.0))),
                created_at: DateTime::<Utc>::from_timestamp(
                    FORECAST_EPOCH_SECS + day * SECS_PER_DAY,
                    0,
                ),
            });
        }
    }
    forecasts
}

fn generate_entrepreneurs(seed: u64, count: usize) -> Vec<EntrepreneurRecord> {
    let mut rng = DemoRng::new(seed, Stream::Entrepreneurs);
    (1..=count)
        .map(|i| {
            let women_pct = rng.between(0.0, 80.0);
            let disabled_pct = rng.between(0.0, 15.0);
            // Half the rows store fractions, half percentages.
            let as_percent = rng.chance(0.5);
            let women_ratio = stored_ratio(women_pct, as_percent);
            let disabled_ratio = stored_ratio(disabled_pct, as_percent);
            EntrepreneurRecord {
                id: i as i64,
                name: Some(NameGenerator::venture_name(&mut rng)),
                women_ratio: Some(women_ratio),
                disabled_ratio: Some(disabled_ratio),
                established_year: Some(1995 + rng.index(30) as i32),
            }
        })
        .collect()
}
