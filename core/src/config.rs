use crate::{kpi::DEFAULT_ALLOCATION_PERCENTAGE, types::ScoringParameters};
use serde::{Deserialize, Serialize};

/// Accepted ranges for caller-supplied scoring parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterBounds {
    pub ratio_min: f64,
    pub ratio_max: f64,
    pub earliest_year: i32,
}

impl Default for ParameterBounds {
    fn default() -> Self {
        Self {
            ratio_min: 0.0,
            ratio_max: 100.0,
            earliest_year: 1900,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KdsConfig {
    /// Used when the store holds no allocation setting.
    #[serde(default = "default_allocation_percentage")]
    pub allocation_percentage: f64,
    #[serde(default)]
    pub default_parameters: ScoringParameters,
    #[serde(default)]
    pub parameter_bounds: ParameterBounds,
}

fn default_allocation_percentage() -> f64 {
    DEFAULT_ALLOCATION_PERCENTAGE
}

impl KdsConfig {
    /// Load from the data/ directory.
    /// In tests, use KdsConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/settings/kds_settings.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: KdsConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;

        if !(0.0..=1.0).contains(&config.allocation_percentage) {
            anyhow::bail!(
                "{path}: allocation_percentage must be within 0..=1, got {}",
                config.allocation_percentage
            );
        }
        Ok(config)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self::default()
    }
}

impl Default for KdsConfig {
    fn default() -> Self {
        Self {
            allocation_percentage: DEFAULT_ALLOCATION_PERCENTAGE,
            default_parameters: ScoringParameters::default(),
            parameter_bounds: ParameterBounds::default(),
        }
    }
}
