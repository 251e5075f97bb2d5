//! Per-dimension resolution
//!
//! Crew, maintenance and fuel share one resolution function. Each caller
//! supplies an optional exact rate and an optional scenario; the pair is
//! folded into a [`DimensionInput`] and dispatched through
//! [`resolve_dimension`] with a lookup callback for the scenario tables.
//! Curfew follows the same shape gated by the violation flag.

use crate::config::RateUnit;
use crate::request::CurfewSpec;
use crate::{CostResolutionError, Result};
use cost_model::{CostDimension, CostFunction, ScenarioTier};
use tracing::debug;

/// What the caller supplied for one dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionInput {
    Absent,
    Exact(f64),
    Scenario(ScenarioTier),
    Conflict { exact: f64, scenario: ScenarioTier },
}

impl DimensionInput {
    pub fn from_parts(exact: Option<f64>, scenario: Option<ScenarioTier>) -> Self {
        match (exact, scenario) {
            (None, None) => DimensionInput::Absent,
            (Some(exact), None) => DimensionInput::Exact(exact),
            (None, Some(scenario)) => DimensionInput::Scenario(scenario),
            (Some(exact), Some(scenario)) => DimensionInput::Conflict { exact, scenario },
        }
    }
}

/// Resolution of a dimension the caller left fully unspecified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Zero,
    Lookup(ScenarioTier),
}

/// How one dimension treats derived tiers and missing input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionPolicy {
    pub dimension: CostDimension,
    /// Whether a scenario derived from airline and destination may fill it
    pub accepts_derived: bool,
    pub fallback: Fallback,
}

impl DimensionPolicy {
    pub fn crew(baseline: ScenarioTier) -> Self {
        Self {
            dimension: CostDimension::Crew,
            accepts_derived: true,
            fallback: Fallback::Lookup(baseline),
        }
    }

    pub fn maintenance(baseline: ScenarioTier) -> Self {
        Self {
            dimension: CostDimension::Maintenance,
            accepts_derived: true,
            fallback: Fallback::Lookup(baseline),
        }
    }

    pub fn fuel() -> Self {
        Self {
            dimension: CostDimension::Fuel,
            accepts_derived: false,
            fallback: Fallback::Zero,
        }
    }
}

/// Resolve one dimension into a cost function.
///
/// An exact rate becomes a linear function of delay, a scenario is looked
/// up, and an unspecified dimension takes the derived tier (if the policy
/// accepts one) or its fallback. Derived tiers never cause a conflict.
pub fn resolve_dimension<F>(
    policy: &DimensionPolicy,
    input: DimensionInput,
    derived: Option<ScenarioTier>,
    rate_unit: RateUnit,
    lookup: F,
) -> Result<CostFunction>
where
    F: FnOnce(ScenarioTier) -> Result<CostFunction>,
{
    let dimension = policy.dimension;
    match input {
        DimensionInput::Conflict { exact, scenario } => {
            debug!("{} conflict: exact {} and scenario {}", dimension, exact, scenario);
            Err(CostResolutionError::ParameterConflict { dimension })
        }
        DimensionInput::Exact(rate) => {
            debug!("{} from exact rate {}", dimension, rate);
            Ok(CostFunction::linear(rate_unit.per_minute(rate)))
        }
        DimensionInput::Scenario(scenario) => {
            debug!("{} from scenario {}", dimension, scenario);
            lookup(scenario)
        }
        DimensionInput::Absent => match derived.filter(|_| policy.accepts_derived) {
            Some(scenario) => {
                debug!("{} from derived scenario {}", dimension, scenario);
                lookup(scenario)
            }
            None => match policy.fallback {
                Fallback::Lookup(scenario) => {
                    debug!("{} defaults to scenario {}", dimension, scenario);
                    lookup(scenario)
                }
                Fallback::Zero => Ok(CostFunction::zero()),
            },
        },
    }
}

/// Fuel has no scenario tables
pub fn fuel_lookup(_scenario: ScenarioTier) -> Result<CostFunction> {
    Err(CostResolutionError::UnsupportedOperation {
        dimension: CostDimension::Fuel,
    })
}

/// Resolve the curfew dimension.
///
/// Without a violation every curfew input is ignored. A violated curfew
/// costs the exact lump sum when one is given, or the curfew table for the
/// affected passengers from the specification's threshold on. `Uniform`
/// specifications affect `passengers_on_board`.
pub fn resolve_curfew<F>(
    violated: bool,
    exact: Option<f64>,
    spec: Option<CurfewSpec>,
    passengers_on_board: u32,
    lookup: F,
) -> Result<CostFunction>
where
    F: FnOnce(u32) -> Result<CostFunction>,
{
    if !violated {
        if exact.is_some() || spec.is_some() {
            debug!("Curfew not violated, ignoring curfew inputs");
        }
        return Ok(CostFunction::zero());
    }

    match (exact, spec) {
        (Some(_), Some(_)) => Err(CostResolutionError::ParameterConflict {
            dimension: CostDimension::Curfew,
        }),
        (Some(amount), None) => {
            debug!("Curfew lump sum {}", amount);
            Ok(CostFunction::constant(amount))
        }
        (None, Some(spec)) => {
            let affected = spec.affected_passengers().unwrap_or(passengers_on_board);
            debug!(
                "Curfew from {} min affecting {} passengers",
                spec.threshold(),
                affected
            );
            Ok(lookup(affected)?.starting_at(spec.threshold()))
        }
        (None, None) => Ok(CostFunction::zero()),
    }
}
