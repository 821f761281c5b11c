//! Headline KPIs: forecast return and the allocation budget derived from it.
//!
//! allocation_budget = clamp(clamp(forecast_return) * allocation_percentage)
//!
//! The inconsistency flag is an invariant check for the caller to surface.
//! With clamping and a percentage <= 1 it should never be set; the values
//! are reported as computed, not corrected.

use crate::{
    forecast::latest_by_firm,
    money::clamp_money,
    types::{FirmId, FirmRecord, ForecastRecord},
};
use serde::{Deserialize, Serialize};

/// Share of forecast return earmarked for the diversity budget line when
/// no setting is available.
pub const DEFAULT_ALLOCATION_PERCENTAGE: f64 = 0.72;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub firm_id: Option<FirmId>,
    pub firm_name: Option<String>,
    pub forecast_return: f64,
    pub allocation_budget: f64,
    pub allocation_percentage: f64,
    pub inconsistent: bool,
}

impl KpiSummary {
    /// Zero-valued result for "no firm selected".
    pub fn neutral(allocation_percentage: f64) -> Self {
        Self {
            allocation_percentage,
            ..Self::default()
        }
    }

    pub fn with_firm_name(mut self, name: impl Into<String>) -> Self {
        self.firm_name = Some(name.into());
        self
    }
}

/// Returns `(forecast_return, allocation_budget)`, both clamped.
pub fn derive_budget(raw_return: Option<f64>, allocation_percentage: f64) -> (f64, f64) {
    let forecast_return = clamp_money(raw_return);
    let allocation_budget = clamp_money(Some(forecast_return * allocation_percentage));
    (forecast_return, allocation_budget)
}

pub fn is_inconsistent(forecast_return: f64, allocation_budget: f64) -> bool {
    !forecast_return.is_finite()
        || !allocation_budget.is_finite()
        || allocation_budget > forecast_return
}

pub fn compute_kpis(
    firm_id: Option<FirmId>,
    latest: Option<&ForecastRecord>,
    allocation_percentage: f64,
) -> KpiSummary {
    let Some(firm_id) = firm_id else {
        return KpiSummary::neutral(allocation_percentage);
    };

    let (forecast_return, allocation_budget) =
        derive_budget(latest.and_then(|f| f.forecast_return), allocation_percentage);
    let inconsistent = is_inconsistent(forecast_return, allocation_budget);
    if inconsistent {
        log::warn!(
            "kpi: firm {firm_id} allocation {allocation_budget} exceeds forecast return {forecast_return}"
        );
    }

    KpiSummary {
        firm_id: Some(firm_id),
        firm_name: None,
        forecast_return,
        allocation_budget,
        allocation_percentage,
        inconsistent,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmReturn {
    pub id: FirmId,
    pub name: String,
    pub forecast_return: f64,
    pub allocation_budget: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllReturns {
    pub firms: Vec<FirmReturn>,
    pub allocation_percentage: f64,
}

/// Every firm with its clamped latest return and budget, ordered by name.
pub fn all_returns(
    firms: &[FirmRecord],
    forecasts: &[ForecastRecord],
    allocation_percentage: f64,
) -> AllReturns {
    let latest = latest_by_firm(forecasts);
    let mut rows: Vec<FirmReturn> = firms
        .iter()
        .map(|firm| {
            let raw = latest.get(&firm.id).and_then(|f| f.forecast_return);
            let (forecast_return, allocation_budget) = derive_budget(raw, allocation_percentage);
            FirmReturn {
                id: firm.id,
                name: firm.display_name().to_string(),
                forecast_return,
                allocation_budget,
            }
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    AllReturns {
        firms: rows,
        allocation_percentage,
    }
}
