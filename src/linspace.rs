use num::Float;

use crate::config::ScanMode;

/// Ascending values from `min` to `max` inclusive, `step` apart.
pub struct Linspace<F> {
    start: F,
    max: F,
    step: F,
    mode: ScanMode,
    index: usize,
    len: usize,
    current: F,
}

impl<F: Float> Linspace<F> {
    pub fn new(min: F, max: F, step: F, mode: ScanMode) -> Self {
        let len = if max < min { 0 } else { num_points(max - min, step) };

        Linspace {
            start: min,
            max,
            step,
            mode,
            index: 0,
            len,
            current: min,
        }
    }
}

/// floor(span / step) + 1, except that a quotient within rounding noise of a
/// whole number counts as that number, so an evenly divisible span keeps
/// its end point.
fn num_points<F: Float>(span: F, step: F) -> usize {
    let quotient = span / step;
    let nearest = quotient.round();
    let tolerance = F::epsilon() * F::max(nearest, F::one()) * F::from(16.).unwrap_or_else(F::one);
    let steps = if (quotient - nearest).abs() <= tolerance {
        nearest
    } else {
        quotient.floor()
    };

    steps.to_usize().map_or(0, |steps| steps.saturating_add(1))
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        match self.mode {
            ScanMode::Indexed => {
                if self.index >= self.len {
                    return None;
                }

                let i = self.index;
                self.index += 1;

                // Clamp the last point so it never lands a rounding error past max
                let value = self.start + self.step * F::from(i).unwrap_or_else(F::max_value);

                Some(F::min(value, self.max))
            },
            ScanMode::Accumulated => {
                if self.current > self.max {
                    return None;
                }

                let value = self.current;
                let next = value + self.step;

                // A step below one ulp of `value` no longer moves the scan
                self.current = if next > value { next } else { F::infinity() };

                Some(value)
            },
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.mode {
            ScanMode::Indexed => {
                let n = self.len - self.index;
                (n, Some(n))
            },
            ScanMode::Accumulated => (0, None),
        }
    }
}

#[test]
fn test_indexed_includes_end() {
    let values: Vec<f64> = Linspace::new(0., 1., 0.25, ScanMode::Indexed).collect();

    assert_eq!(values, vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(0., 26., 0.01, ScanMode::Indexed).count(), 2601);
    assert_eq!(Linspace::new(0., 26., 0.01, ScanMode::Indexed).last(), Some(26.));
}

#[test]
fn test_indexed_stops_before_overshoot() {
    let values: Vec<f64> = Linspace::new(0., 1., 0.4, ScanMode::Indexed).collect();

    assert_eq!(values, vec![0., 0.4, 0.8]);
}

#[test]
fn test_accumulated_drifts() {
    let indexed: Vec<f64> = Linspace::new(0., 1., 0.1, ScanMode::Indexed).collect();
    let accumulated: Vec<f64> = Linspace::new(0., 1., 0.1, ScanMode::Accumulated).collect();

    assert_eq!(indexed.len(), 11);
    assert_eq!(indexed[3], 0.30000000000000004);
    assert_eq!(accumulated[3], 0.30000000000000004);
    assert_eq!(indexed[8], 0.8);
    assert_eq!(accumulated[8], 0.7999999999999999);
    assert_eq!(accumulated.len(), 11);
}

#[test]
fn test_accumulated_stops_when_step_vanishes() {
    let values: Vec<f64> = Linspace::new(1e17, 100000000000000064., 0.01, ScanMode::Accumulated).collect();

    assert_eq!(values, vec![1e17]);
    assert_eq!(Linspace::new(1e17, 100000000000000064., 0.01, ScanMode::Indexed).count(), 6401);
}

#[test]
fn test_empty_and_degenerate() {
    assert_eq!(Linspace::new(1., 0., 0.1, ScanMode::Indexed).count(), 0);
    assert_eq!(Linspace::new(1., 0., 0.1, ScanMode::Accumulated).count(), 0);
    assert_eq!(Linspace::new(3., 3., 0.1, ScanMode::Indexed).collect::<Vec<f64>>(), vec![3.]);
    assert_eq!(Linspace::new(3., 3., 0.1, ScanMode::Accumulated).collect::<Vec<f64>>(), vec![3.]);
}
