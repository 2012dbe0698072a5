//! # Visibility and season scores
//!
//! Two numbers summarise how good a target is on a given night:
//!
//! * **Visibility score** – the fraction of the viewing interval during which the target is
//!   above the limiting altitude: `0` for [`Visibility::Never`], `1` for
//!   [`Visibility::Always`], `|viewing ∩ window| / |viewing|` otherwise. A zero-length
//!   viewing interval (a night that never gets dark enough) scores `0` for every target.
//! * **Season score** – how close the culmination falls to solar midnight:
//!
//!   ```text
//!   score = | 1 − (|culmination − solar midnight| in days) / 0.5 |
//!   ```
//!
//!   `1` when the target culminates at solar midnight, `0` at a 12 h offset. Beyond 12 h the
//!   inner term turns negative and the absolute value makes the score climb back towards `1`
//!   at a 24 h offset.
use chrono::NaiveDate;
use hifitime::Epoch;

use crate::constants::{Degree, SECONDS_PER_DAY};
use crate::horizontal::altitude;
use crate::observers::Location;
use crate::solar::SunData;
use crate::target_interval::{TargetInterval, Visibility};
use crate::targets::Target;
use crate::time::DateInterval;

/// Fraction of `viewing` during which the target is above the limiting altitude.
///
/// A zero-length viewing interval scores `0` whatever the classification.
pub fn visibility_score(viewing: &DateInterval, visibility: &Visibility) -> f64 {
    let total = viewing.duration_seconds();
    if total <= 0.0 {
        return 0.0;
    }
    match visibility {
        Visibility::Never => 0.0,
        Visibility::Always => 1.0,
        Visibility::Sometimes(window) => viewing.overlap(window).to_seconds() / total,
    }
}

/// Season score of a culmination relative to solar midnight.
pub fn season_score(culmination: Epoch, solar_midnight: Epoch) -> f64 {
    let offset_days = (culmination - solar_midnight).abs().to_seconds() / SECONDS_PER_DAY;
    (1.0 - offset_days / 0.5).abs()
}

/// Both scores of one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub visibility: f64,
    pub season: f64,
}

impl Scores {
    pub fn from_interval(
        interval: &TargetInterval,
        viewing: &DateInterval,
        solar_midnight: Epoch,
    ) -> Scores {
        Scores {
            visibility: visibility_score(viewing, &interval.visibility),
            season: season_score(interval.culmination, solar_midnight),
        }
    }
}

/// Everything a detail view shows about one target on one night.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetDetail {
    pub interval: TargetInterval,
    pub scores: Scores,
    /// Altitude reached at culmination, in degrees.
    pub culmination_altitude: Degree,
}

impl TargetDetail {
    /// Resolve and score a single target.
    ///
    /// Arguments
    /// -----------------
    /// * `target`: the catalog object.
    /// * `location`: the observing site.
    /// * `date`: the evening date of the night.
    /// * `sun`: the sun data of that night, providing solar midnight.
    /// * `viewing`: the viewing interval the visibility score is measured against.
    /// * `limiting_altitude`: minimum usable altitude, in degrees.
    pub fn compute(
        target: &Target,
        location: &Location,
        date: NaiveDate,
        sun: &SunData,
        viewing: &DateInterval,
        limiting_altitude: Degree,
    ) -> TargetDetail {
        let interval = TargetInterval::resolve(target, location, date, limiting_altitude);
        let scores = Scores::from_interval(&interval, viewing, sun.solar_midnight());
        let culmination_altitude =
            altitude(location, interval.culmination, target.ra, target.dec);

        TargetDetail {
            interval,
            scores,
            culmination_altitude,
        }
    }
}
