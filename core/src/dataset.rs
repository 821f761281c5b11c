//! JSON dataset import.
//!
//! A dataset is the raw record dump a data-access layer would hand to the
//! core. Unreadable entries are dropped on load; see `types::lenient`.

use crate::{
    error::KdsResult,
    types::{lenient, EntrepreneurRecord, FirmRecord, ForecastRecord},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "lenient::present")]
    pub firms: Vec<FirmRecord>,
    #[serde(default, deserialize_with = "lenient::present")]
    pub forecasts: Vec<ForecastRecord>,
    #[serde(default, deserialize_with = "lenient::present")]
    pub entrepreneurs: Vec<EntrepreneurRecord>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub allocation_percentage: Option<f64>,
}

impl Dataset {
    pub fn from_json(raw: &str) -> KdsResult<Self> {
        let dataset: Dataset = serde_json::from_str(raw)?;
        log::info!(
            "dataset: {} firms, {} forecasts, {} entrepreneurs",
            dataset.firms.len(),
            dataset.forecasts.len(),
            dataset.entrepreneurs.len()
        );
        Ok(dataset)
    }

    pub fn from_path(path: &str) -> KdsResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&raw)
    }
}
