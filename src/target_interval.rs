//! # Target rise / culmination / set
//!
//! For one target, one site, one date and one limiting altitude, [`TargetInterval::resolve`]
//! locates the culmination, derives the anti-culmination, and classifies the target:
//!
//! ```text
//! alt(culmination)      <= limit  →  Never
//! alt(anti-culmination) >= limit  →  Always
//! otherwise                       →  Sometimes([rise, set])
//! ```
//!
//! * The culmination is the first upper transit at or after local noon of the given date,
//!   found with the slope-sign boundary search, so it always falls inside the noon-to-noon
//!   window containing the night.
//! * The anti-culmination is taken [`ANTI_CULMINATION_OFFSET`] (43 080 s) before the
//!   culmination.
//! * The rise is searched forward from the anti-culmination and the set forward from the
//!   culmination, both with the standard 6 h / 60 s steps.
//!
//! Nothing is cached: every call recomputes from scratch.
use chrono::NaiveDate;
use hifitime::Epoch;

use crate::constants::{Degree, ANTI_CULMINATION_OFFSET};
use crate::horizontal::altitude;
use crate::observers::Location;
use crate::search::{culmination_after, rising_crossing, setting_crossing};
use crate::targets::Target;
use crate::time::{local_noon, seconds, DateInterval};

/// Whether, and when, a target clears the limiting altitude during one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visibility {
    /// The target never clears the limiting altitude.
    Never,
    /// The target never drops below the limiting altitude.
    Always,
    /// The target is above the limiting altitude from rise to set.
    Sometimes(DateInterval),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInterval {
    pub culmination: Epoch,
    pub anti_culmination: Epoch,
    pub visibility: Visibility,
}

impl TargetInterval {
    /// Resolve the daily visibility of a target.
    ///
    /// Arguments
    /// -----------------
    /// * `target`: the catalog object.
    /// * `location`: the observing site.
    /// * `date`: the evening date of the night.
    /// * `limiting_altitude`: minimum usable altitude, in degrees.
    ///
    /// Return
    /// ----------
    /// * The culmination/anti-culmination instants and the [`Visibility`] classification.
    pub fn resolve(
        target: &Target,
        location: &Location,
        date: NaiveDate,
        limiting_altitude: Degree,
    ) -> TargetInterval {
        let seed = local_noon(date, location.timezone());
        Self::resolve_from(target.ra, target.dec, location, seed, limiting_altitude)
    }

    /// Same as [`TargetInterval::resolve`] for a bare coordinate and an explicit seed instant.
    pub fn resolve_from(
        ra: Degree,
        dec: Degree,
        location: &Location,
        seed: Epoch,
        limiting_altitude: Degree,
    ) -> TargetInterval {
        let alt = |t: Epoch| altitude(location, t, ra, dec);

        let culmination = culmination_after(seed, alt);
        let anti_culmination = culmination - seconds(ANTI_CULMINATION_OFFSET);

        let visibility = if alt(culmination) <= limiting_altitude {
            Visibility::Never
        } else if alt(anti_culmination) >= limiting_altitude {
            Visibility::Always
        } else {
            let rise = rising_crossing(anti_culmination, limiting_altitude, alt);
            let set = setting_crossing(culmination, limiting_altitude, alt);
            Visibility::Sometimes(DateInterval::new(rise, set))
        };

        TargetInterval {
            culmination,
            anti_culmination,
            visibility,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self.visibility, Visibility::Never)
    }

    pub fn is_always(&self) -> bool {
        matches!(self.visibility, Visibility::Always)
    }

    /// Rise-to-set window, when the target rises and sets.
    pub fn window(&self) -> Option<DateInterval> {
        match self.visibility {
            Visibility::Sometimes(window) => Some(window),
            _ => None,
        }
    }
}

#[cfg(test)]
mod target_interval_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn site(lat: f64) -> Location {
        Location::new(lat, 0.0, chrono_tz::UTC).unwrap()
    }

    fn seed() -> Epoch {
        local_noon(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(), chrono_tz::UTC)
    }

    #[test]
    fn test_equatorial_target_culminates_at_50_degrees() {
        let location = site(40.0);
        let interval = TargetInterval::resolve_from(180.0, 0.0, &location, seed(), 0.0);

        let alt = altitude(&location, interval.culmination, 180.0, 0.0);
        assert_abs_diff_eq!(alt, 50.0, epsilon = 0.01);
        assert!(interval.culmination >= seed());
        assert!(interval.culmination < seed() + seconds(86_400.0));
    }

    #[test]
    fn test_anti_culmination_offset() {
        let interval = TargetInterval::resolve_from(83.8, -5.4, &site(40.0), seed(), 0.0);
        assert_eq!(
            interval.culmination - interval.anti_culmination,
            seconds(43_080.0)
        );
    }

    #[test]
    fn test_classification() {
        let location = site(40.0);

        // circumpolar
        let polaris_like = TargetInterval::resolve_from(37.95, 89.0, &location, seed(), 0.0);
        assert_eq!(polaris_like.visibility, Visibility::Always);

        // never above the horizon from 40°N
        let deep_south = TargetInterval::resolve_from(80.0, -60.0, &location, seed(), 0.0);
        assert_eq!(deep_south.visibility, Visibility::Never);

        // culminates at 20°: never clears a 30° limit
        let low = TargetInterval::resolve_from(80.0, -30.0, &location, seed(), 30.0);
        assert!(low.is_never());

        // rises and sets, about 12 h above the horizon
        let equatorial = TargetInterval::resolve_from(180.0, 0.0, &location, seed(), 0.0);
        let window = equatorial.window().unwrap();
        assert!(window.contains(equatorial.culmination));
        assert_abs_diff_eq!(window.duration_seconds() / 3600.0, 11.97, epsilon = 0.1);
    }

    #[test]
    fn test_rise_and_set_bracket_limit() {
        let location = site(48.0);
        let limit = 25.0;
        let interval = TargetInterval::resolve_from(10.7, 41.3, &location, seed(), limit);
        let window = interval.window().unwrap();

        let alt = |t: Epoch| altitude(&location, t, 10.7, 41.3);
        assert!(alt(window.start()) < limit);
        assert!(alt(window.start() + seconds(120.0)) > limit);
        assert!(alt(window.end()) > limit);
        assert!(alt(window.end() + seconds(120.0)) < limit);
    }
}
