//! # Monotonic boundary search
//!
//! Every event the engine reports (rise, set, twilight boundaries, culminations) is located
//! by the same advance-then-shrink refinement:
//!
//! ```text
//! loop while |step| >= |min_step|:
//!     if holds(time, step) { time += step } else { step /= 2 }
//! ```
//!
//! This is **not** a bisection: the current time only ever moves in the direction of the
//! step, and a failed check only shrinks the step. The search therefore assumes the
//! predicate keeps holding up to the boundary and stops holding after it; with more than
//! one crossing in reach, the first one from the starting point is found. Callers are
//! responsible for choosing a start point and a window on which that is true.
//!
//! Predicates receive the current time and the step, and usually test `time + step`:
//! the result is then the last instant known to satisfy the predicate, less than two
//! minimum steps before the boundary.
//!
//! The second half of the module builds the culmination searches on top of the
//! primitive, using the sign of the numeric altitude slope as predicate.
use hifitime::{Duration, Epoch};

use crate::constants::{
    Degree, CULMINATION_MAX_OFFSET, SEARCH_INITIAL_STEP, SEARCH_MAX_ITERATIONS, SEARCH_MIN_STEP,
    SECONDS_PER_DAY, SLOPE_SAMPLE_GAP,
};
use crate::time::seconds;

/// Advance from `start` while `holds` is true, halving the step on every failure.
///
/// Arguments
/// -----------------
/// * `start`: the instant the search starts from; assumed to satisfy the predicate.
/// * `initial_step`: first step. A negative step searches backwards in time.
/// * `min_step`: the search stops once `|step| < |min_step|`.
/// * `holds`: predicate called with the current time and the current step.
///
/// Return
/// ----------
/// * The last instant reached, less than twice `min_step` before the boundary. If the
///   predicate never fails, the search stops after [`SEARCH_MAX_ITERATIONS`] advances.
pub fn boundary_search<F>(
    start: Epoch,
    initial_step: Duration,
    min_step: Duration,
    mut holds: F,
) -> Epoch
where
    F: FnMut(Epoch, Duration) -> bool,
{
    let min_step = min_step.abs();
    let mut time = start;
    let mut step = initial_step;

    for _ in 0..SEARCH_MAX_ITERATIONS {
        if step.abs() < min_step {
            break;
        }
        if holds(time, step) {
            time = time + step;
        } else {
            step = seconds(step.to_seconds() * 0.5);
        }
    }

    time
}

/// [`boundary_search`] with the engine's standard 6 h initial step and 60 s minimum step.
///
/// `forward = false` walks backwards in time.
pub fn standard_search<F>(start: Epoch, forward: bool, holds: F) -> Epoch
where
    F: FnMut(Epoch, Duration) -> bool,
{
    let step = if forward {
        SEARCH_INITIAL_STEP
    } else {
        -SEARCH_INITIAL_STEP
    };
    boundary_search(start, seconds(step), seconds(SEARCH_MIN_STEP), holds)
}

/// Numeric altitude slope at `epoch`: the altitude change over the next second.
pub fn altitude_slope<F>(altitude: &F, epoch: Epoch) -> Degree
where
    F: Fn(Epoch) -> Degree,
{
    altitude(epoch + seconds(SLOPE_SAMPLE_GAP)) - altitude(epoch)
}

/// Upper culmination on the monotonic branch containing `seed`.
///
/// If the body is rising at `seed` the search walks forward to the maximum, otherwise it
/// walks backward to it. With a seed at local noon this is the culmination closest to noon
/// for bodies culminating near noon, which is what the sun needs.
///
/// A search ending more than [`CULMINATION_MAX_OFFSET`] away from `seed` has not found a
/// daily maximum (e.g. the sun seen from a pole) and `seed` is returned instead.
pub fn nearest_culmination<F>(seed: Epoch, altitude: F) -> Epoch
where
    F: Fn(Epoch) -> Degree,
{
    let found = if altitude_slope(&altitude, seed) >= 0.0 {
        standard_search(seed, true, |t, step| {
            altitude_slope(&altitude, t + step) > 0.0
        })
    } else {
        standard_search(seed, false, |t, step| {
            altitude_slope(&altitude, t + step) < 0.0
        })
    };

    if (found - seed).abs() > seconds(CULMINATION_MAX_OFFSET) {
        seed
    } else {
        found
    }
}

/// First upper culmination at or after `seed`.
///
/// When the body is descending at `seed`, the search first walks down to the lower
/// culmination and then up to the next maximum, so the result always lies within one
/// sidereal day after the seed. A body without a daily cycle (seen from a pole) may drift
/// further; past one day `seed` is returned instead.
pub fn culmination_after<F>(seed: Epoch, altitude: F) -> Epoch
where
    F: Fn(Epoch) -> Degree,
{
    let mut start = seed;
    if altitude_slope(&altitude, seed) < 0.0 {
        start = standard_search(seed, true, |t, step| {
            altitude_slope(&altitude, t + step) < 0.0
        });
    }
    let found = standard_search(start, true, |t, step| {
        altitude_slope(&altitude, t + step) > 0.0
    });

    if found - seed > seconds(SECONDS_PER_DAY) {
        seed
    } else {
        found
    }
}

/// Last instant before `altitude` climbs to `threshold`, searching forward from `start`.
///
/// `start` must be below the threshold and the body rising over the search window.
pub fn rising_crossing<F>(start: Epoch, threshold: Degree, altitude: F) -> Epoch
where
    F: Fn(Epoch) -> Degree,
{
    standard_search(start, true, |t, step| altitude(t + step) < threshold)
}

/// Last instant before `altitude` drops to `threshold`, searching forward from `start`.
///
/// `start` must be above the threshold and the body setting over the search window.
pub fn setting_crossing<F>(start: Epoch, threshold: Degree, altitude: F) -> Epoch
where
    F: Fn(Epoch) -> Degree,
{
    standard_search(start, true, |t, step| altitude(t + step) > threshold)
}

#[cfg(test)]
mod search_test {
    use super::*;
    use crate::constants::DPI;
    use approx::assert_abs_diff_eq;

    fn t0() -> Epoch {
        Epoch::from_gregorian_utc_hms(2024, 1, 1, 0, 0, 0)
    }

    /// A sinusoidal "altitude" with a 24 h period peaking at `peak_hours` after t0.
    fn sine_altitude(peak_hours: f64) -> impl Fn(Epoch) -> Degree {
        move |t: Epoch| {
            let hours = (t - t0()).to_seconds() / 3600.0;
            45.0 * (DPI * (hours - peak_hours) / 24.0).cos()
        }
    }

    #[test]
    fn test_boundary_search_finds_step_function_edge() {
        let edge = t0() + seconds(10_000.0);
        let found = boundary_search(t0(), seconds(21_600.0), seconds(60.0), |t, step| {
            t + step < edge
        });

        assert!(found < edge);
        assert!((edge - found).to_seconds() < 120.0);
    }

    #[test]
    fn test_boundary_search_backwards() {
        let edge = t0() - seconds(7_777.0);
        let found = boundary_search(t0(), seconds(-21_600.0), seconds(60.0), |t, step| {
            t + step > edge
        });

        assert!(found > edge);
        assert!((found - edge).to_seconds() < 120.0);
    }

    #[test]
    fn test_boundary_search_failing_predicate_returns_start() {
        let mut calls = 0;
        let found = boundary_search(t0(), seconds(21_600.0), seconds(60.0), |_, _| {
            calls += 1;
            false
        });
        assert_eq!(found, t0());
        // 21600 / 2^k >= 60 for k = 0..=8
        assert_eq!(calls, 9);
    }

    #[test]
    fn test_boundary_search_terminates_on_constant_predicate() {
        let found = boundary_search(t0(), seconds(1.0), seconds(60.0), |_, _| true);
        assert_eq!(found, t0());

        let found = boundary_search(t0(), seconds(120.0), seconds(60.0), |_, _| true);
        assert_abs_diff_eq!(
            (found - t0()).to_seconds(),
            120.0 * SEARCH_MAX_ITERATIONS as f64,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_culmination_after_rising_and_setting() {
        // rising at t0, peak 5 h later
        let peak = culmination_after(t0(), sine_altitude(5.0));
        assert_abs_diff_eq!((peak - t0()).to_seconds(), 5.0 * 3600.0, epsilon = 120.0);

        // setting at t0 (peak was 3 h earlier): next peak is 21 h later
        let peak = culmination_after(t0(), sine_altitude(-3.0));
        assert_abs_diff_eq!((peak - t0()).to_seconds(), 21.0 * 3600.0, epsilon = 120.0);
    }

    #[test]
    fn test_nearest_culmination_walks_back() {
        let peak = nearest_culmination(t0(), sine_altitude(-2.0));
        assert_abs_diff_eq!((peak - t0()).to_seconds(), -2.0 * 3600.0, epsilon = 120.0);

        let peak = nearest_culmination(t0(), sine_altitude(1.5));
        assert_abs_diff_eq!((peak - t0()).to_seconds(), 1.5 * 3600.0, epsilon = 120.0);
    }

    #[test]
    fn test_culmination_searches_stay_near_seed() {
        // ever rising, as the sun seen from a pole between the equinoxes
        let drifting = |t: Epoch| -7.0 + (t - t0()).to_seconds() * 1e-6;
        assert_eq!(nearest_culmination(t0(), drifting), t0());
        assert_eq!(culmination_after(t0(), drifting), t0());

        let sinking = |t: Epoch| 7.0 - (t - t0()).to_seconds() * 1e-6;
        assert_eq!(nearest_culmination(t0(), sinking), t0());
    }

    #[test]
    fn test_crossings() {
        // altitude = 45 cos(2π(h - 12)/24): crosses 0 at h = 6 (rising) and h = 18 (setting)
        let alt = sine_altitude(12.0);

        let rise = rising_crossing(t0(), 0.0, &alt);
        assert!(alt(rise) < 0.0);
        assert_abs_diff_eq!((rise - t0()).to_seconds(), 6.0 * 3600.0, epsilon = 120.0);

        let set = setting_crossing(t0() + seconds(12.0 * 3600.0), 0.0, &alt);
        assert!(alt(set) > 0.0);
        assert_abs_diff_eq!((set - t0()).to_seconds(), 18.0 * 3600.0, epsilon = 120.0);
    }
}
