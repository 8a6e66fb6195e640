//! CSS-like cubic Bézier easing for scalar progress values.
//!
//! A [`CubicBezier`] has its endpoints fixed at (0,0) and (1,1) and two free
//! control points (x1,y1), (x2,y2).  Construction precomputes a small table
//! of x(t) samples; [`CubicBezier::evaluate`] uses it to bracket the curve
//! parameter `t` for a given `x`, refines `t`, and returns y(t).
//!
//! # Example
//!
//! ```
//! use bezier_ease::bezier::CubicBezier;
//!
//! let curve = CubicBezier::new(0.42, 0.0, 0.58, 1.0).unwrap();
//! assert_eq!(curve.evaluate(0.0), 0.0);
//! assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-6);
//! assert_eq!(curve.evaluate(1.0), 1.0);
//! ```

use log::{debug, trace};

const SAMPLE_TABLE_SIZE: usize = 11;
const SAMPLE_STEP: f64 = 1.0 / (SAMPLE_TABLE_SIZE - 1) as f64;

const NEWTON_ITERATIONS: usize = 4;
/// Below this slope Newton-Raphson is unreliable and subdivision is used.
const NEWTON_MIN_SLOPE: f64 = 0.001;
const SUBDIVISION_PRECISION: f64 = 1e-7;
const SUBDIVISION_MAX_ITERATIONS: usize = 10;

/// Error from constructing a [`CubicBezier`] with unusable control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    /// One of the four coordinates is NaN or infinite.
    #[error("points should be finite numbers")]
    InvalidControlPoint,
    /// `x1` or `x2` lies outside `[0, 1]`, so the curve is not a function of x.
    #[error("x values must be in [0,1] range")]
    OutOfRange,
}

/// A unit cubic Bézier easing curve.
///
/// Control points are (0,0), (x1,y1), (x2,y2), (1,1).  `x1` and `x2` are
/// restricted to `[0, 1]`; `y1` and `y2` may leave that range to produce
/// overshoot ("back" or "bounce" style) easings.
///
/// The curve is immutable once built, so a single instance can be shared
/// between threads and queried concurrently.
#[derive(Debug, Clone, Copy)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    /// `x1 == y1 && x2 == y2`: the curve is the identity line.
    linear: bool,
    /// x(t) at `t = i / 10`.  Left zeroed for linear curves.
    samples: [f64; SAMPLE_TABLE_SIZE],
}

impl PartialEq for CubicBezier {
    fn eq(&self, other: &Self) -> bool {
        self.control_points() == other.control_points()
    }
}

//  Polynomial helpers
//
// With endpoints fixed at 0 and 1 the cubic collapses to
// ((a*t + b)*t + c)*t for either axis.

#[inline]
fn coeff_a(a1: f64, a2: f64) -> f64 {
    1.0 - 3.0 * a2 + 3.0 * a1
}

#[inline]
fn coeff_b(a1: f64, a2: f64) -> f64 {
    3.0 * a2 - 6.0 * a1
}

#[inline]
fn coeff_c(a1: f64) -> f64 {
    3.0 * a1
}

/// One axis of the curve at parameter `t`.
#[inline]
fn calc_bezier(t: f64, a1: f64, a2: f64) -> f64 {
    ((coeff_a(a1, a2) * t + coeff_b(a1, a2)) * t + coeff_c(a1)) * t
}

/// d/dt of [`calc_bezier`].
#[inline]
fn slope(t: f64, a1: f64, a2: f64) -> f64 {
    3.0 * coeff_a(a1, a2) * t * t + 2.0 * coeff_b(a1, a2) * t + coeff_c(a1)
}

impl CubicBezier {
    /// Build a curve from its two free control points.
    ///
    /// Fails with [`CurveError::InvalidControlPoint`] if any coordinate is
    /// not finite, and with [`CurveError::OutOfRange`] if `x1` or `x2` is
    /// outside `[0, 1]`.  The finiteness check runs first.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, CurveError> {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return Err(CurveError::InvalidControlPoint);
        }
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(CurveError::OutOfRange);
        }
        let curve = Self::from_valid(x1, y1, x2, y2);
        debug!(
            "built cubic-bezier({}, {}, {}, {}) (linear: {})",
            x1, y1, x2, y2, curve.linear
        );
        Ok(curve)
    }

    /// The identity curve, `cubic-bezier(0, 0, 1, 1)`.
    pub fn linear() -> Self {
        Self::from_valid(0.0, 0.0, 1.0, 1.0)
    }

    /// Build a curve from control points already known to be valid.
    pub(crate) fn from_valid(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let linear = x1 == y1 && x2 == y2;
        let mut samples = [0.0; SAMPLE_TABLE_SIZE];
        if !linear {
            for (i, sample) in samples.iter_mut().enumerate() {
                *sample = calc_bezier(i as f64 * SAMPLE_STEP, x1, x2);
            }
        }
        Self {
            x1,
            y1,
            x2,
            y2,
            linear,
            samples,
        }
    }

    //  Accessors

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn y1(&self) -> f64 {
        self.y1
    }

    pub fn x2(&self) -> f64 {
        self.x2
    }

    pub fn y2(&self) -> f64 {
        self.y2
    }

    /// The control points as `[x1, y1, x2, y2]`.
    pub fn control_points(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Whether the curve degenerates to the identity line.
    pub fn is_linear(&self) -> bool {
        self.linear
    }

    //  Evaluation

    /// Map progress `x` to the eased value y.
    ///
    /// `x` is clamped to `[0, 1]` first.  The endpoints are returned
    /// exactly: `evaluate(0.0) == 0.0` and `evaluate(1.0) == 1.0`.
    /// A NaN input yields an unspecified value but never panics.
    pub fn evaluate(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if self.linear {
            return x;
        }
        if x == 0.0 {
            return 0.0;
        }
        if x == 1.0 {
            return 1.0;
        }
        calc_bezier(self.solve_t_for_x(x), self.y1, self.y2)
    }

    /// Interpolate between two scalars using this curve.
    ///
    /// `x` is normalized progress in `[0, 1]`; the result is
    /// `a + (b - a) * evaluate(x)`.
    pub fn interpolate(&self, a: f64, b: f64, x: f64) -> f64 {
        a + (b - a) * self.evaluate(x)
    }

    /// Find `t` such that x(t) = `x`.
    pub(crate) fn solve_t_for_x(&self, x: f64) -> f64 {
        let last = SAMPLE_TABLE_SIZE - 1;
        let interval = (1..last).take_while(|&i| self.samples[i] <= x).count();
        let interval_start = interval as f64 * SAMPLE_STEP;

        let lo = self.samples[interval];
        let hi = self.samples[interval + 1];
        let guess_t = interval_start + (x - lo) / (hi - lo) * SAMPLE_STEP;

        let initial_slope = slope(guess_t, self.x1, self.x2);
        if initial_slope >= NEWTON_MIN_SLOPE {
            self.newton_raphson(x, guess_t)
        } else if initial_slope == 0.0 {
            guess_t
        } else {
            trace!(
                "slope {} at t={} too flat for x={}, subdividing",
                initial_slope,
                guess_t,
                x
            );
            self.binary_subdivide(x, interval_start, interval_start + SAMPLE_STEP)
        }
    }

    fn newton_raphson(&self, x: f64, mut t: f64) -> f64 {
        for _ in 0..NEWTON_ITERATIONS {
            let current_slope = slope(t, self.x1, self.x2);
            if current_slope == 0.0 {
                return t;
            }
            t -= (calc_bezier(t, self.x1, self.x2) - x) / current_slope;
        }
        t
    }

    fn binary_subdivide(&self, x: f64, mut lo: f64, mut hi: f64) -> f64 {
        let mut t = lo;
        for _ in 0..SUBDIVISION_MAX_ITERATIONS {
            t = lo + (hi - lo) / 2.0;
            let error = calc_bezier(t, self.x1, self.x2) - x;
            if error > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            if error.abs() <= SUBDIVISION_PRECISION {
                break;
            }
        }
        t
    }
}
