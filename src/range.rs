use num::Float;

/// Shape of a single linear segment, selected by whether each boundary is core.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Shape {
    /// Both boundaries core: membership is 1 across the segment
    Plateau,
    /// Neither boundary core: membership is 0 across the segment
    Gap,
    /// Core at the start only: 1 down to 0
    Falling,
    /// Core at the end only: 0 up to 1
    Rising,
}

impl Shape {
    pub fn new(start_core: bool, end_core: bool) -> Self {
        match (start_core, end_core) {
            (true, true) => Self::Plateau,
            (false, false) => Self::Gap,
            (true, false) => Self::Falling,
            (false, true) => Self::Rising,
        }
    }
}

/// One segment `[start, end)` of a piecewise-linear membership function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FuzzyRange<F = f64> {
    start: F,
    end: F,
    start_core: bool,
    end_core: bool,
}

impl<F: Float> FuzzyRange<F> {
    /// `start <= end` is upheld by `FuzzySet`, which is the only place ranges
    /// are built from user data. A zero width range is a vertical edge and
    /// contains no points.
    pub fn new(start: F, end: F, start_core: bool, end_core: bool) -> Self {
        debug_assert!(start <= end);

        Self {
            start,
            end,
            start_core,
            end_core,
        }
    }

    pub fn start(&self) -> F {
        self.start
    }

    pub fn end(&self) -> F {
        self.end
    }

    pub fn start_core(&self) -> bool {
        self.start_core
    }

    pub fn end_core(&self) -> bool {
        self.end_core
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.start_core, self.end_core)
    }

    pub fn contains(&self, x: F) -> bool {
        self.start <= x && x < self.end
    }

    /// Membership of `x`, or `None` when `x` lies outside `[start, end)`.
    pub fn membership(&self, x: F) -> Option<F> {
        if self.contains(x) {
            Some(self.eval(x))
        } else {
            None
        }
    }

    // Caller guarantees start <= x < end, so end - start is never zero here
    fn eval(&self, x: F) -> F {
        match self.shape() {
            Shape::Plateau => F::one(),
            Shape::Gap => F::zero(),
            Shape::Falling => F::one() - (x - self.start) / (self.end - self.start),
            Shape::Rising => (x - self.start) / (self.end - self.start),
        }
    }
}

#[test]
fn test_shapes() {
    let plateau = FuzzyRange::new(5., 13., true, true);
    let gap = FuzzyRange::new(22., 50., false, false);
    let falling = FuzzyRange::new(18., 22., true, false);
    let rising = FuzzyRange::new(13., 18., false, true);

    assert_eq!(plateau.shape(), Shape::Plateau);
    assert_eq!(gap.shape(), Shape::Gap);
    assert_eq!(falling.shape(), Shape::Falling);
    assert_eq!(rising.shape(), Shape::Rising);

    assert_eq!(plateau.membership(5.), Some(1.));
    assert_eq!(plateau.membership(12.5), Some(1.));
    assert_eq!(gap.membership(30.), Some(0.));
    assert_eq!(falling.membership(18.), Some(1.));
    assert_eq!(falling.membership(19.), Some(0.75));
    assert_eq!(rising.membership(13.), Some(0.));
    assert_eq!(rising.membership(16.75), Some(0.75));
}

#[test]
fn test_half_open_bounds() {
    let rising = FuzzyRange::new(13., 18., false, true);

    assert_eq!(rising.membership(18.), None);
    assert_eq!(rising.membership(12.99), None);
    assert!(rising.membership(17.999).unwrap() < 1.);
}

#[test]
fn test_zero_width_contains_nothing() {
    let edge = FuzzyRange::new(0., 0., false, true);

    assert!(!edge.contains(0.));
    assert_eq!(edge.membership(0.), None);
}
