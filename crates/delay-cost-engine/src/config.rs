//! Engine configuration

use cost_model::{Haul, ScenarioTier};
use serde::{Deserialize, Serialize};

/// Unit callers use for exact per-dimension rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    #[default]
    PerMinute,
    PerHour,
}

impl RateUnit {
    /// Convert a rate in this unit to a per-minute rate
    pub fn per_minute(&self, rate: f64) -> f64 {
        match self {
            RateUnit::PerMinute => rate,
            RateUnit::PerHour => rate / 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub exact_rate_unit: RateUnit,
    /// Haul used for passenger hard costs when no flight length is known
    pub fallback_haul: Haul,
    /// Tier used by crew, maintenance and passengers when nothing else applies
    pub baseline_scenario: ScenarioTier,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exact_rate_unit: RateUnit::PerMinute,
            fallback_haul: Haul::Medium,
            baseline_scenario: ScenarioTier::Base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_hour_rates_are_divided() {
        assert_eq!(RateUnit::PerMinute.per_minute(12.0), 12.0);
        assert_eq!(RateUnit::PerHour.per_minute(120.0), 2.0);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"exact_rate_unit": "per_hour"}"#).unwrap();
        assert_eq!(config.exact_rate_unit, RateUnit::PerHour);
        assert_eq!(config.fallback_haul, Haul::Medium);
        assert_eq!(config.baseline_scenario, ScenarioTier::Base);
    }
}
