//! Rating range repair.
//!
//! Range inputs are never rejected: out-of-domain bounds are pulled back into
//! `[RATING_MIN, RATING_MAX]`, and an inverted range widens to the full domain
//! ("show everything") instead of failing the request.

use tracing::debug;

/// Lowest rating a movie can carry.
pub const RATING_MIN: f64 = 0.0;

/// Highest rating a movie can carry.
pub const RATING_MAX: f64 = 5.0;

/// Clamp `value` into `[min, max]`.
///
/// Values that compare neither below `min` nor above `max` (including NaN for
/// floats) are returned unchanged; callers that care about NaN handle it first.
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp a single rating into the rating domain. NaN maps to [`RATING_MIN`].
#[inline]
pub fn clamp_rating(value: f64) -> f64 {
    clamp_rating_or(value, RATING_MIN)
}

#[inline]
fn clamp_rating_or(value: f64, nan_fallback: f64) -> f64 {
    if value.is_nan() {
        nan_fallback
    } else {
        clamp(value, RATING_MIN, RATING_MAX)
    }
}

/// Inclusive rating interval with `lower <= upper`, both inside the domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingRange {
    lower: f64,
    upper: f64,
}

impl RatingRange {
    /// The whole rating domain.
    pub const FULL: RatingRange = RatingRange {
        lower: RATING_MIN,
        upper: RATING_MAX,
    };

    /// Repair a caller-supplied `(lower, upper)` pair.
    ///
    /// Each bound is clamped independently (a NaN lower bound becomes
    /// [`RATING_MIN`], a NaN upper bound [`RATING_MAX`]). If the clamped lower
    /// bound still exceeds the upper one the range silently widens to
    /// [`RatingRange::FULL`].
    pub fn normalize(lower: f64, upper: f64) -> Self {
        let clamped_lower = clamp_rating_or(lower, RATING_MIN);
        let clamped_upper = clamp_rating_or(upper, RATING_MAX);

        if clamped_lower > clamped_upper {
            debug!(
                lower,
                upper, "inverted rating range widened to full domain"
            );
            return Self::FULL;
        }

        Self {
            lower: clamped_lower,
            upper: clamped_upper,
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn contains(&self, rating: f64) -> bool {
        rating >= self.lower && rating <= self.upper
    }
}

impl Default for RatingRange {
    fn default() -> Self {
        Self::FULL
    }
}
