//! Dashboard boundary: validation, fetching, and panel assembly.
//!
//! This is the only place where the store and the scorers meet. The store
//! and config are injected; nothing here holds a global handle.
//!
//! RULES:
//!   - Caller input is range-checked here, never inside the scorers.
//!   - Each panel fetches what it needs and hands plain slices to a scorer.
//!   - `snapshot()` fetches once and computes every panel in parallel.

use crate::{
    config::{KdsConfig, ParameterBounds},
    entrepreneur::{rank_entrepreneurs, ScoredEntrepreneur},
    error::{KdsError, KdsResult},
    forecast::latest_for_firm,
    kpi::{all_returns, compute_kpis, AllReturns, KpiSummary},
    ranking::{find_rank, RankedResult},
    recycling::{rank_recycling, RecyclingEntry},
    store::{FirmSummary, KdsStore},
    sustainability::{rank_sustainability, SustainabilityEntry},
    types::{EntrepreneurRecord, FirmId, FirmRecord, ForecastRecord, ScoringParameters},
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::thread;

/// Where a selected firm sits in the full-population rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedFirmRanks {
    pub firm_id: FirmId,
    pub sustainability_rank: Option<usize>,
    pub recycling_rank: Option<usize>,
}

/// Every panel, computed from a single fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub kpis: KpiSummary,
    pub sustainability: RankedResult<SustainabilityEntry>,
    pub recycling: RankedResult<RecyclingEntry>,
    pub entrepreneurs: RankedResult<ScoredEntrepreneur>,
    pub all_returns: AllReturns,
    pub selected: Option<SelectedFirmRanks>,
}

/// Range-check caller-supplied scoring parameters.
pub fn check_parameters(
    bounds: &ParameterBounds,
    params: &ScoringParameters,
    current_year: i32,
) -> KdsResult<()> {
    let ratio_range = bounds.ratio_min..=bounds.ratio_max;
    if !ratio_range.contains(&params.ref_women_ratio) {
        return Err(KdsError::InvalidParameter {
            name: "ref_women_ratio",
            reason: format!(
                "must be between {} and {}",
                bounds.ratio_min, bounds.ratio_max
            ),
        });
    }
    if !ratio_range.contains(&params.ref_disabled_ratio) {
        return Err(KdsError::InvalidParameter {
            name: "ref_disabled_ratio",
            reason: format!(
                "must be between {} and {}",
                bounds.ratio_min, bounds.ratio_max
            ),
        });
    }
    if params.ref_min_year < bounds.earliest_year || params.ref_min_year > current_year {
        return Err(KdsError::InvalidParameter {
            name: "ref_min_year",
            reason: format!(
                "must be between {} and {current_year}",
                bounds.earliest_year
            ),
        });
    }
    Ok(())
}

pub fn check_firm_id(firm_id: FirmId) -> KdsResult<()> {
    if firm_id <= 0 {
        return Err(KdsError::InvalidParameter {
            name: "firm_id",
            reason: format!("must be a positive id, got {firm_id}"),
        });
    }
    Ok(())
}

/// Parse a firm id as a caller sends it, as text.
pub fn parse_firm_id(raw: &str) -> KdsResult<FirmId> {
    let firm_id = raw
        .trim()
        .parse::<FirmId>()
        .map_err(|_| KdsError::InvalidParameter {
            name: "firm_id",
            reason: format!("not an integer id: {raw:?}"),
        })?;
    check_firm_id(firm_id)?;
    Ok(firm_id)
}

pub struct Dashboard<'a> {
    store: &'a KdsStore,
    config: &'a KdsConfig,
}

impl<'a> Dashboard<'a> {
    pub fn new(store: &'a KdsStore, config: &'a KdsConfig) -> Self {
        Self { store, config }
    }

    pub fn validate_parameters(&self, params: &ScoringParameters) -> KdsResult<()> {
        let current_year = chrono::Utc::now().year();
        check_parameters(&self.config.parameter_bounds, params, current_year)
    }

    /// Stored setting if usable, otherwise the configured default.
    pub fn allocation_percentage(&self) -> f64 {
        let fallback = self.config.allocation_percentage;
        match self.store.allocation_percentage() {
            Ok(Some(pct)) if pct.is_finite() && pct > 0.0 => pct,
            Ok(stored) => {
                log::warn!("dashboard: allocation setting {stored:?} unusable, using {fallback}");
                fallback
            }
            Err(e) => {
                log::warn!("dashboard: cannot read allocation setting, using {fallback}: {e}");
                fallback
            }
        }
    }

    pub fn firm_directory(&self) -> KdsResult<Vec<FirmSummary>> {
        self.store.firm_directory()
    }

    pub fn kpis(&self, firm_id: Option<FirmId>) -> KdsResult<KpiSummary> {
        let pct = self.allocation_percentage();
        let Some(firm_id) = firm_id else {
            return Ok(KpiSummary::neutral(pct));
        };
        check_firm_id(firm_id)?;

        let firm = self
            .store
            .firm(firm_id)?
            .ok_or(KdsError::FirmNotFound { firm_id })?;
        let latest = self.store.latest_forecast_for_firm(firm_id)?;
        Ok(compute_kpis(Some(firm_id), latest.as_ref(), pct).with_firm_name(firm.display_name()))
    }

    pub fn sustainability_top7(&self) -> KdsResult<RankedResult<SustainabilityEntry>> {
        let firms = self.store.firms()?;
        let forecasts = self.store.forecasts()?;
        Ok(rank_sustainability(&firms, &forecasts))
    }

    pub fn recycling_top10(&self) -> KdsResult<RankedResult<RecyclingEntry>> {
        let firms = self.store.firms()?;
        Ok(rank_recycling(&firms))
    }

    pub fn entrepreneur_top10(
        &self,
        params: &ScoringParameters,
    ) -> KdsResult<RankedResult<ScoredEntrepreneur>> {
        self.validate_parameters(params)?;
        let records = self.store.entrepreneurs()?;
        Ok(rank_entrepreneurs(&records, params))
    }

    pub fn all_returns(&self) -> KdsResult<AllReturns> {
        let firms = self.store.firms()?;
        let forecasts = self.store.forecasts()?;
        Ok(all_returns(&firms, &forecasts, self.allocation_percentage()))
    }

    pub fn snapshot(
        &self,
        params: &ScoringParameters,
        firm_id: Option<FirmId>,
    ) -> KdsResult<DashboardSnapshot> {
        self.validate_parameters(params)?;
        let selected_firm = match firm_id {
            Some(id) => {
                check_firm_id(id)?;
                Some(
                    self.store
                        .firm(id)?
                        .ok_or(KdsError::FirmNotFound { firm_id: id })?,
                )
            }
            None => None,
        };

        let firms = self.store.firms()?;
        let forecasts = self.store.forecasts()?;
        let entrepreneurs = self.store.entrepreneurs()?;
        let pct = self.allocation_percentage();

        Ok(compute_snapshot(
            &firms,
            &forecasts,
            &entrepreneurs,
            params,
            selected_firm.as_ref(),
            pct,
        ))
    }
}

/// Compute every panel concurrently over shared, read-only collections.
pub fn compute_snapshot(
    firms: &[FirmRecord],
    forecasts: &[ForecastRecord],
    entrepreneurs: &[EntrepreneurRecord],
    params: &ScoringParameters,
    selected_firm: Option<&FirmRecord>,
    allocation_percentage: f64,
) -> DashboardSnapshot {
    let (sustainability, recycling, scored, returns) = thread::scope(|s| {
        let sustainability = s.spawn(|| rank_sustainability(firms, forecasts));
        let recycling = s.spawn(|| rank_recycling(firms));
        let scored = s.spawn(|| rank_entrepreneurs(entrepreneurs, params));
        (
            join_panel(sustainability, "sustainability"),
            join_panel(recycling, "recycling"),
            join_panel(scored, "entrepreneur"),
            all_returns(firms, forecasts, allocation_percentage),
        )
    });

    let kpis = match selected_firm {
        Some(firm) => compute_kpis(
            Some(firm.id),
            latest_for_firm(forecasts, firm.id),
            allocation_percentage,
        )
        .with_firm_name(firm.display_name()),
        None => KpiSummary::neutral(allocation_percentage),
    };

    let selected = selected_firm.map(|firm| SelectedFirmRanks {
        firm_id: firm.id,
        sustainability_rank: sustainability
            .all_ranked
            .as_deref()
            .and_then(|all| find_rank(all, |e| e.id == firm.id)),
        recycling_rank: recycling
            .all_ranked
            .as_deref()
            .and_then(|all| find_rank(all, |e| e.id == firm.id)),
    });

    DashboardSnapshot {
        kpis,
        sustainability,
        recycling,
        entrepreneurs: scored,
        all_returns: returns,
        selected,
    }
}

/// A scorer panicking is a contract violation; report it once and
/// degrade that panel to an empty result.
fn join_panel<T>(
    handle: thread::ScopedJoinHandle<'_, RankedResult<T>>,
    panel: &str,
) -> RankedResult<T> {
    handle.join().unwrap_or_else(|_| {
        log::error!("dashboard: {panel} panel failed, returning empty result");
        RankedResult::empty()
    })
}
