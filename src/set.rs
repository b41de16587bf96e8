use num::Float;

use crate::error::{ConfigError, Result};
use crate::range::FuzzyRange;

/// A named linguistic term: contiguous ranges covering the breakpoints
/// from the first to the last.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzySet<F = f64> {
    name: String,
    ranges: Vec<FuzzyRange<F>>,
}

impl<F: Float> FuzzySet<F> {
    /// Builds one range per pair of consecutive `(breakpoint, is_core)` points.
    ///
    /// Breakpoints must be finite and non-decreasing. Two equal breakpoints
    /// make a vertical edge.
    pub fn from_points(name: impl Into<String>, points: &[(F, bool)]) -> Result<Self> {
        let name = name.into();

        if points.len() < 2 {
            return Err(ConfigError::TooFewPoints {
                name,
                got: points.len(),
            });
        }

        if let Some(index) = points.iter().position(|(x, _)| !x.is_finite()) {
            return Err(ConfigError::NonFiniteBreakpoint { name, index });
        }

        let mut ranges = Vec::with_capacity(points.len() - 1);

        for (i, window) in points.windows(2).enumerate() {
            let (start, start_core) = window[0];
            let (end, end_core) = window[1];

            if end < start {
                return Err(ConfigError::DecreasingBreakpoints { name, index: i + 1 });
            }

            ranges.push(FuzzyRange::new(start, end, start_core, end_core));
        }

        Ok(Self { name, ranges })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ranges(&self) -> &[FuzzyRange<F>] {
        &self.ranges
    }

    /// First breakpoint
    pub fn start(&self) -> F {
        self.first().start()
    }

    /// Last breakpoint
    pub fn end(&self) -> F {
        self.last().end()
    }

    /// Membership of `value` in this term. Total over the reals: values
    /// outside the breakpoints take the core flag of the nearest boundary.
    pub fn compute_membership(&self, value: F) -> F {
        if let Some(mu) = self.ranges.iter().find_map(|range| range.membership(value)) {
            return mu;
        }

        let core = if value < self.start() {
            self.first().start_core()
        } else {
            self.last().end_core()
        };

        if core {
            F::one()
        } else {
            F::zero()
        }
    }

    // `from_points` guarantees at least one range
    fn first(&self) -> &FuzzyRange<F> {
        &self.ranges[0]
    }

    fn last(&self) -> &FuzzyRange<F> {
        &self.ranges[self.ranges.len() - 1]
    }
}

#[test]
fn test_trapezoid() {
    let comfortable = FuzzySet::from_points(
        "comfortable",
        &[(18., false), (22., true), (24., true), (26., false)],
    )
    .unwrap();

    assert_eq!(comfortable.name(), "comfortable");
    assert_eq!(comfortable.ranges().len(), 3);
    assert_eq!(comfortable.start(), 18.);
    assert_eq!(comfortable.end(), 26.);

    assert_eq!(comfortable.compute_membership(17.), 0.);
    assert_eq!(comfortable.compute_membership(19.), 0.25);
    assert_eq!(comfortable.compute_membership(23.), 1.);
    assert_eq!(comfortable.compute_membership(25.), 0.5);
    assert_eq!(comfortable.compute_membership(26.), 0.);
    assert_eq!(comfortable.compute_membership(1000.), 0.);
}

#[test]
fn test_saturates_to_core_boundaries() {
    let cold = FuzzySet::from_points("cold", &[(0., true), (18., true), (22., false), (50., false)]).unwrap();
    let hot = FuzzySet::from_points("hot", &[(0., false), (24., false), (26., true), (50., true)]).unwrap();

    assert_eq!(cold.compute_membership(-40.), 1.);
    assert_eq!(cold.compute_membership(19.), 0.75);
    assert_eq!(cold.compute_membership(80.), 0.);
    assert_eq!(hot.compute_membership(-40.), 0.);
    assert_eq!(hot.compute_membership(25.), 0.5);
    assert_eq!(hot.compute_membership(50.), 1.);
    assert_eq!(hot.compute_membership(f64::INFINITY), 1.);
    assert_eq!(hot.compute_membership(f64::NEG_INFINITY), 0.);
}

#[test]
fn test_vertical_edge() {
    let low = FuzzySet::from_points("low", &[(0., false), (0., true), (5., true), (8., false)]).unwrap();

    assert_eq!(low.compute_membership(-0.01), 0.);
    assert_eq!(low.compute_membership(0.), 1.);
    assert_eq!(low.compute_membership(6.5), 0.5);
    assert_eq!(low.compute_membership(8.), 0.);
}

#[test]
fn test_rejects_malformed_points() {
    assert!(matches!(
        FuzzySet::from_points("a", &[(1., true)]),
        Err(ConfigError::TooFewPoints { got: 1, .. })
    ));
    assert!(matches!(
        FuzzySet::<f64>::from_points("a", &[]),
        Err(ConfigError::TooFewPoints { got: 0, .. })
    ));
    assert!(matches!(
        FuzzySet::from_points("a", &[(1., true), (f64::NAN, false)]),
        Err(ConfigError::NonFiniteBreakpoint { index: 1, .. })
    ));
    assert!(matches!(
        FuzzySet::from_points("a", &[(1., true), (3., false), (2., false)]),
        Err(ConfigError::DecreasingBreakpoints { index: 2, .. })
    ));
}
