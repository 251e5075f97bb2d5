//! Composable cost functions of delay
//!
//! A [`CostFunction`] is a small tagged value rather than a closure so that a
//! resolved result can be inspected, serialized and evaluated without keeping
//! the tables that produced it alive. Delays are minutes; amounts are in the
//! currency of the reference tables (EUR for the built-in ones).

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Pure mapping from a non-negative delay in minutes to a non-negative amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostFunction {
    /// No cost at any delay
    Zero,
    /// Lump sum independent of the delay
    Constant { amount: f64 },
    /// `rate_per_minute × delay`
    Linear { rate_per_minute: f64 },
    /// Linear interpolation over `(delay, cost)` breakpoints sorted by delay.
    /// Flat before the first breakpoint, extrapolated with the last
    /// segment's slope after the last one.
    Piecewise { points: Vec<(f64, f64)> },
    /// `factor × inner(delay)`
    Scaled { factor: f64, inner: Box<CostFunction> },
    /// Zero while `delay < from`, `inner(delay)` afterwards
    Threshold { from: f64, inner: Box<CostFunction> },
    /// `inner(delay)` while `delay < threshold`, `inner(perceived_delay)` afterwards.
    /// Models a passenger who misses a connection and is rebooked: from the
    /// threshold on, their delay is the one realized by the new itinerary.
    Capped {
        threshold: f64,
        perceived_delay: f64,
        inner: Box<CostFunction>,
    },
    /// Pointwise sum of the terms
    Sum { terms: Vec<CostFunction> },
}

impl Default for CostFunction {
    fn default() -> Self {
        CostFunction::Zero
    }
}

impl CostFunction {
    pub fn zero() -> Self {
        CostFunction::Zero
    }

    pub fn constant(amount: f64) -> Self {
        CostFunction::Constant { amount }
    }

    pub fn linear(rate_per_minute: f64) -> Self {
        CostFunction::Linear { rate_per_minute }
    }

    /// Build a piecewise-linear function; breakpoints are sorted by delay
    pub fn piecewise(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut points: Vec<(f64, f64)> = points.into_iter().collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        CostFunction::Piecewise { points }
    }

    pub fn scaled(self, factor: f64) -> Self {
        if self.is_zero() {
            return self;
        }
        CostFunction::Scaled {
            factor,
            inner: Box::new(self),
        }
    }

    /// Only charge this function from `from` minutes of delay on
    pub fn starting_at(self, from: f64) -> Self {
        if self.is_zero() {
            return self;
        }
        CostFunction::Threshold {
            from,
            inner: Box::new(self),
        }
    }

    /// Freeze the delay at `perceived_delay` once `threshold` is reached
    pub fn capped(self, threshold: f64, perceived_delay: f64) -> Self {
        CostFunction::Capped {
            threshold,
            perceived_delay,
            inner: Box::new(self),
        }
    }

    /// Sum several functions, flattening nested sums and dropping zero terms
    pub fn sum(functions: impl IntoIterator<Item = CostFunction>) -> Self {
        let mut terms = Vec::new();
        for function in functions {
            match function {
                CostFunction::Zero => {}
                CostFunction::Sum { terms: nested } => terms.extend(nested),
                other => terms.push(other),
            }
        }

        match terms.len() {
            0 => CostFunction::Zero,
            1 => terms.pop().unwrap_or_default(),
            _ => CostFunction::Sum { terms },
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, CostFunction::Zero)
    }

    /// Cost at `delay` minutes. Negative and NaN delays are evaluated as 0.
    pub fn cost(&self, delay: f64) -> f64 {
        self.evaluate(sanitize_delay(delay))
    }

    /// Sample the function over a delay grid
    pub fn costs_at(&self, delays: &[f64]) -> Vec<f64> {
        delays.iter().map(|&d| self.cost(d)).collect()
    }

    fn evaluate(&self, delay: f64) -> f64 {
        match self {
            CostFunction::Zero => 0.0,
            CostFunction::Constant { amount } => *amount,
            CostFunction::Linear { rate_per_minute } => rate_per_minute * delay,
            CostFunction::Piecewise { points } => interpolate(points, delay),
            CostFunction::Scaled { factor, inner } => factor * inner.evaluate(delay),
            CostFunction::Threshold { from, inner } => {
                if delay < *from {
                    0.0
                } else {
                    inner.evaluate(delay)
                }
            }
            CostFunction::Capped {
                threshold,
                perceived_delay,
                inner,
            } => {
                if delay < *threshold {
                    inner.evaluate(delay)
                } else {
                    inner.cost(*perceived_delay)
                }
            }
            CostFunction::Sum { terms } => terms.iter().map(|t| t.evaluate(delay)).sum(),
        }
    }
}

impl Add for CostFunction {
    type Output = CostFunction;

    fn add(self, rhs: CostFunction) -> CostFunction {
        CostFunction::sum([self, rhs])
    }
}

impl std::iter::Sum for CostFunction {
    fn sum<I: Iterator<Item = CostFunction>>(iter: I) -> Self {
        CostFunction::sum(iter)
    }
}

fn sanitize_delay(delay: f64) -> f64 {
    if delay.is_nan() || delay < 0.0 {
        0.0
    } else {
        delay
    }
}

fn interpolate(points: &[(f64, f64)], delay: f64) -> f64 {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return 0.0,
    };

    if delay <= first.0 {
        return first.1;
    }

    for window in points.windows(2) {
        let (x0, y0) = window[0];
        let (x1, y1) = window[1];
        if delay <= x1 {
            return lerp((x0, y0), (x1, y1), delay);
        }
    }

    // Past the last breakpoint: keep the slope of the last segment
    match points.len().checked_sub(2).and_then(|i| points.get(i)) {
        Some(&previous) => lerp(previous, last, delay),
        None => last.1,
    }
}

fn lerp((x0, y0): (f64, f64), (x1, y1): (f64, f64), x: f64) -> f64 {
    if x1 == x0 {
        return y1;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_curve() -> CostFunction {
        CostFunction::piecewise([(0.0, 0.0), (30.0, 3.0), (60.0, 9.0)])
    }

    #[test]
    fn test_zero_and_constant() {
        assert_eq!(CostFunction::zero().cost(120.0), 0.0);
        assert_eq!(CostFunction::constant(2500.0).cost(0.0), 2500.0);
        assert_eq!(CostFunction::constant(2500.0).cost(300.0), 2500.0);
    }

    #[test]
    fn test_linear_is_rate_times_delay() {
        let crew = CostFunction::linear(12.5);
        assert_eq!(crew.cost(0.0), 0.0);
        assert_eq!(crew.cost(10.0), 125.0);
        assert_eq!(crew.cost(-5.0), 0.0);
        assert_eq!(crew.cost(f64::NAN), 0.0);
    }

    #[test]
    fn test_piecewise_interpolates_and_extrapolates() {
        let f = unit_curve();
        assert_eq!(f.cost(0.0), 0.0);
        assert!((f.cost(15.0) - 1.5).abs() < 1e-9);
        assert!((f.cost(45.0) - 6.0).abs() < 1e-9);
        // Last slope is 0.2 per minute
        assert!((f.cost(90.0) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_piecewise_sorts_breakpoints() {
        let f = CostFunction::piecewise([(60.0, 9.0), (0.0, 0.0), (30.0, 3.0)]);
        assert_eq!(f, unit_curve());
    }

    #[test]
    fn test_piecewise_single_point_is_flat() {
        let f = CostFunction::piecewise([(10.0, 4.0)]);
        assert_eq!(f.cost(0.0), 4.0);
        assert_eq!(f.cost(500.0), 4.0);
        assert_eq!(CostFunction::piecewise([]).cost(10.0), 0.0);
    }

    #[test]
    fn test_threshold_starts_charging_at_from() {
        let curfew = CostFunction::constant(10_000.0).starting_at(90.0);
        assert_eq!(curfew.cost(89.9), 0.0);
        assert_eq!(curfew.cost(90.0), 10_000.0);
        assert_eq!(curfew.cost(200.0), 10_000.0);
    }

    #[test]
    fn test_capped_jumps_to_perceived_delay_at_threshold() {
        let passenger = unit_curve().capped(20.0, 60.0);
        assert!((passenger.cost(19.0) - unit_curve().cost(19.0)).abs() < 1e-9);
        assert_eq!(passenger.cost(20.0), 9.0);
        assert_eq!(passenger.cost(250.0), 9.0);
    }

    #[test]
    fn test_sum_flattens_and_drops_zero() {
        let f = CostFunction::linear(1.0) + CostFunction::zero();
        assert_eq!(f, CostFunction::linear(1.0));

        let g = CostFunction::sum([
            CostFunction::linear(1.0) + CostFunction::linear(2.0),
            CostFunction::constant(5.0),
        ]);
        match &g {
            CostFunction::Sum { terms } => assert_eq!(terms.len(), 3),
            other => panic!("expected a flat sum, got {:?}", other),
        }
        assert_eq!(g.cost(10.0), 35.0);
        assert_eq!(CostFunction::sum(Vec::new()), CostFunction::Zero);
    }

    #[test]
    fn test_scaled_multiplies() {
        let f = unit_curve().scaled(170.0);
        assert!((f.cost(30.0) - 510.0).abs() < 1e-9);
        assert!(CostFunction::zero().scaled(3.0).is_zero());
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let f = CostFunction::linear(2.0).starting_at(15.0);
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["kind"], "threshold");
        assert_eq!(json["inner"]["kind"], "linear");

        let back: CostFunction = serde_json::from_value(json).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn test_costs_at_samples_grid() {
        let f = CostFunction::linear(2.0);
        assert_eq!(f.costs_at(&[0.0, 5.0, 10.0]), vec![0.0, 10.0, 20.0]);
    }
}

// ============================================================================
// Property-based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn delay_strategy() -> impl Strategy<Value = f64> {
        0.0f64..600.0
    }

    fn increasing_curve() -> impl Strategy<Value = CostFunction> {
        prop::collection::vec((1.0f64..60.0, 0.0f64..50.0), 1..8).prop_map(|steps| {
            let mut delay = 0.0;
            let mut cost = 0.0;
            let mut points = vec![(0.0, 0.0)];
            for (dx, dy) in steps {
                delay += dx;
                cost += dy;
                points.push((delay, cost));
            }
            CostFunction::piecewise(points)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2000))]

        #[test]
        fn fuzz_linear_matches_rate_times_delay(rate in 0.0f64..500.0, delay in delay_strategy()) {
            let f = CostFunction::linear(rate);
            prop_assert!((f.cost(delay) - rate * delay).abs() < 1e-6);
        }

        #[test]
        fn fuzz_sum_is_pointwise(
            a in increasing_curve(),
            b in increasing_curve(),
            rate in 0.0f64..100.0,
            delay in delay_strategy(),
        ) {
            let expected = a.cost(delay) + b.cost(delay) + rate * delay;
            let total = a + b + CostFunction::linear(rate);
            prop_assert!((total.cost(delay) - expected).abs() < 1e-6);
        }

        #[test]
        fn fuzz_non_decreasing_curves_stay_non_decreasing(
            curve in increasing_curve(),
            d1 in delay_strategy(),
            d2 in delay_strategy(),
        ) {
            let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            prop_assert!(curve.cost(lo) <= curve.cost(hi) + 1e-9);
            prop_assert!(curve.cost(lo) >= 0.0);
        }

        #[test]
        fn fuzz_capped_is_constant_past_threshold(
            curve in increasing_curve(),
            threshold in 0.0f64..300.0,
            perceived in 0.0f64..400.0,
            extra in 0.0f64..300.0,
        ) {
            let capped = curve.clone().capped(threshold, perceived);
            prop_assert_eq!(capped.cost(threshold + extra), curve.cost(perceived));
        }
    }
}
