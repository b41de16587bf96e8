use num::Float;

/// Result of one inference run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outputs<F = f64> {
    output: F,
    membership: F,
    scanned: usize,
}

impl<F: Float> Outputs<F> {
    pub(crate) fn new(output: F, membership: F, scanned: usize) -> Self {
        Self {
            output,
            membership,
            scanned,
        }
    }

    /// Crisp regulator value
    pub fn output(&self) -> F {
        self.output
    }

    /// Aggregated membership at `output`. Zero when no rule fired anywhere.
    pub fn membership(&self) -> F {
        self.membership
    }

    /// Number of output values evaluated before the scan finished
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// `output` rounded to `decimals` places for display. Exact ties go to
    /// the even neighbour, so `0.125` shows as `0.12`.
    pub fn rounded(&self, decimals: i32) -> F {
        let scale = F::from(10.).unwrap_or_else(F::one).powi(decimals);
        let scaled = self.output * scale;
        let floor = scaled.floor();
        let half = F::from(0.5).unwrap_or_else(F::zero);

        let rounded = if scaled - floor == half {
            // Exact error of the product: a tie only if the stored value is one
            let residual = self.output.mul_add(scale, -scaled);
            let two = F::one() + F::one();

            if residual < F::zero() || (residual == F::zero() && (floor / two).fract() == F::zero()) {
                floor
            } else {
                floor + F::one()
            }
        } else {
            scaled.round()
        };

        rounded / scale
    }
}

#[test]
fn test_rounded() {
    let outputs = Outputs::new(16.75999999999982, 0.75, 1677);

    assert_eq!(outputs.rounded(2), 16.76);
    assert_eq!(outputs.rounded(0), 17.);
    assert_eq!(outputs.membership(), 0.75);
    assert_eq!(outputs.scanned(), 1677);
}

#[test]
fn test_rounded_ties_to_even() {
    assert_eq!(Outputs::new(0.125, 1., 1).rounded(2), 0.12);
    assert_eq!(Outputs::new(0.375, 1., 1).rounded(2), 0.38);
    assert_eq!(Outputs::new(2.5, 1., 1).rounded(0), 2.);
    assert_eq!(Outputs::new(3.5, 1., 1).rounded(0), 4.);
    assert_eq!(Outputs::new(-2.5, 1., 1).rounded(0), -2.);
    // 2.675 is stored just below the tie
    assert_eq!(Outputs::new(2.675, 1., 1).rounded(2), 2.67);
}
