//! Latest-forecast selection.
//!
//! Forecasts are sorted newest first (stable; undated records last) and the
//! first record seen for each firm wins. Equal timestamps therefore resolve
//! to whichever record the supplier listed first.

use crate::types::{FirmId, ForecastRecord};
use std::cmp::Ordering;
use std::collections::HashMap;

fn newest_first(a: &ForecastRecord, b: &ForecastRecord) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Most recent forecast per firm.
pub fn latest_by_firm(forecasts: &[ForecastRecord]) -> HashMap<FirmId, &ForecastRecord> {
    let mut sorted: Vec<&ForecastRecord> = forecasts.iter().collect();
    sorted.sort_by(|a, b| newest_first(a, b));

    let mut latest = HashMap::new();
    for f in sorted {
        latest.entry(f.firm_id).or_insert(f);
    }
    latest
}

/// Most recent forecast for a single firm.
pub fn latest_for_firm(forecasts: &[ForecastRecord], firm_id: FirmId) -> Option<&ForecastRecord> {
    let mut best: Option<&ForecastRecord> = None;
    for f in forecasts.iter().filter(|f| f.firm_id == firm_id) {
        best = match best {
            Some(b) if newest_first(f, b) != Ordering::Less => Some(b),
            _ => Some(f),
        };
    }
    best
}
