//! # Solar ephemeris and night intervals
//!
//! This module derives, for one observing site and one calendar date, everything the rest
//! of the engine needs to know about the sun:
//!
//! 1. **Position** – a low-precision solar position ([`SolarPosition`]): mean longitude and
//!    mean anomaly, a two-term equation of centre, then right ascension/declination through
//!    the obliquity of the ecliptic. Good to roughly 0.01° over this century.
//! 2. **Culminations** – solar noon is located with the slope-sign boundary search seeded at
//!    local calendar noon; solar midnight is twelve hours later.
//! 3. **Twilight boundaries** – for each of the thresholds 0°, −6°, −12° and −18° the
//!    dusk/dawn pair is searched only when the noon and midnight altitudes straddle the
//!    threshold.
//! 4. **Night intervals** – one dusk-to-dawn [`DateInterval`] per threshold. When the sun
//!    never crosses a threshold, the interval degenerates to zero length at solar midnight
//!    (sun stayed above) or to the full 24 h following solar noon (sun stayed below).
//!
//! ```text
//!  solar noon ──► dusk(0°) ─► dusk(−6°) ─► dusk(−12°) ─► dusk(−18°) ─┐
//!                                                                    │ solar midnight
//!  dawn(0°) ◄── dawn(−6°) ◄── dawn(−12°) ◄──────────── dawn(−18°) ◄──┘
//! ```
//!
//! The four intervals are nested: every darker tier lies inside the lighter ones.
//!
//! ## Date convention
//!
//! The date names the *evening* of the night: `SunData::compute(site, 2024-06-21)` describes
//! the night from the evening of June 21 to the morning of June 22.
use chrono::NaiveDate;
use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, ASTRONOMICAL_TWILIGHT_ALTITUDE, CIVIL_TWILIGHT_ALTITUDE, NAUTICAL_TWILIGHT_ALTITUDE,
    RADEG, SECONDS_PER_DAY, SOLAR_MIDNIGHT_OFFSET, SUNSET_ALTITUDE,
};
use crate::horizontal::altitude;
use crate::observers::Location;
use crate::search::{nearest_culmination, rising_crossing, setting_crossing};
use crate::time::{days_since_j2000, local_noon, seconds, DateInterval};

/// Apparent equatorial position of the sun, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub ra: Degree,
    pub dec: Degree,
}

impl SolarPosition {
    /// Low-precision solar position at `epoch`.
    pub fn at(epoch: Epoch) -> Self {
        let n = days_since_j2000(epoch);

        let mean_longitude = (280.460 + 0.985_647_4 * n).rem_euclid(360.0);
        let mean_anomaly = (357.528 + 0.985_600_3 * n).rem_euclid(360.0) * RADEG;

        let ecliptic_longitude = (mean_longitude
            + 1.915 * mean_anomaly.sin()
            + 0.020 * (2.0 * mean_anomaly).sin())
            * RADEG;
        let obliquity = (23.439 - 0.000_000_4 * n) * RADEG;

        let ra = (obliquity.cos() * ecliptic_longitude.sin())
            .atan2(ecliptic_longitude.cos())
            / RADEG;
        let dec = (obliquity.sin() * ecliptic_longitude.sin())
            .clamp(-1.0, 1.0)
            .asin()
            / RADEG;

        SolarPosition {
            ra: ra.rem_euclid(360.0),
            dec,
        }
    }
}

/// Altitude of the sun above the horizon of `location` at `epoch`, in degrees.
pub fn sun_altitude(location: &Location, epoch: Epoch) -> Degree {
    let sun = SolarPosition::at(epoch);
    altitude(location, epoch, sun.ra, sun.dec)
}

/// The four sun-altitude thresholds that bound a night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Twilight {
    /// Sun below the horizon.
    Sunset,
    /// Sun below −6°.
    Civil,
    /// Sun below −12°.
    Nautical,
    /// Sun below −18°: full dark.
    Astronomical,
}

impl Twilight {
    pub const ALL: [Twilight; 4] = [
        Twilight::Sunset,
        Twilight::Civil,
        Twilight::Nautical,
        Twilight::Astronomical,
    ];

    /// Sun altitude defining the tier, in degrees.
    pub fn threshold(&self) -> Degree {
        match self {
            Twilight::Sunset => SUNSET_ALTITUDE,
            Twilight::Civil => CIVIL_TWILIGHT_ALTITUDE,
            Twilight::Nautical => NAUTICAL_TWILIGHT_ALTITUDE,
            Twilight::Astronomical => ASTRONOMICAL_TWILIGHT_ALTITUDE,
        }
    }
}

/// How dark the sky must be for a night to count as viewing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Darkness {
    Civil,
    Nautical,
    #[default]
    Astronomical,
}

impl From<Darkness> for Twilight {
    fn from(darkness: Darkness) -> Self {
        match darkness {
            Darkness::Civil => Twilight::Civil,
            Darkness::Nautical => Twilight::Nautical,
            Darkness::Astronomical => Twilight::Astronomical,
        }
    }
}

/// Evening and morning crossings of one twilight threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuskDawn {
    pub dusk: Epoch,
    pub dawn: Epoch,
}

/// Solar events of one night.
///
/// Each pair is `None` when the sun did not cross the corresponding threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunEvents {
    pub solar_noon: Epoch,
    pub solar_midnight: Epoch,
    /// Sunset (dusk) and the following sunrise (dawn).
    pub sunset_sunrise: Option<DuskDawn>,
    pub civil: Option<DuskDawn>,
    pub nautical: Option<DuskDawn>,
    pub astronomical: Option<DuskDawn>,
}

impl SunEvents {
    pub fn pair(&self, tier: Twilight) -> Option<DuskDawn> {
        match tier {
            Twilight::Sunset => self.sunset_sunrise,
            Twilight::Civil => self.civil,
            Twilight::Nautical => self.nautical,
            Twilight::Astronomical => self.astronomical,
        }
    }

    pub fn sunset(&self) -> Option<Epoch> {
        self.sunset_sunrise.map(|p| p.dusk)
    }

    pub fn sunrise(&self) -> Option<Epoch> {
        self.sunset_sunrise.map(|p| p.dawn)
    }
}

/// Nested night intervals, from "sun below the horizon" to "full dark".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NightIntervals {
    pub sunset_to_sunrise: DateInterval,
    pub civil: DateInterval,
    pub nautical: DateInterval,
    pub astronomical: DateInterval,
}

impl NightIntervals {
    pub fn get(&self, tier: Twilight) -> DateInterval {
        match tier {
            Twilight::Sunset => self.sunset_to_sunrise,
            Twilight::Civil => self.civil,
            Twilight::Nautical => self.nautical,
            Twilight::Astronomical => self.astronomical,
        }
    }
}

/// Sun events and night intervals of one date at one site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunData {
    pub events: SunEvents,
    pub nights: NightIntervals,
    /// Sun altitude at solar noon, in degrees.
    pub noon_altitude: Degree,
    /// Sun altitude at solar midnight, in degrees.
    pub midnight_altitude: Degree,
}

impl SunData {
    /// Compute the sun events of the night starting on the evening of `date`.
    ///
    /// Arguments
    /// -----------------
    /// * `location`: the observing site; its time zone defines local noon.
    /// * `date`: the evening date of the night.
    ///
    /// Return
    /// ----------
    /// * The [`SunData`] for that night. Polar day and polar night are not errors: the
    ///   missing crossings are `None` and the intervals degenerate as described in the
    ///   module documentation.
    pub fn compute(location: &Location, date: NaiveDate) -> SunData {
        let alt = |t: Epoch| sun_altitude(location, t);

        let seed = local_noon(date, location.timezone());
        let solar_noon = nearest_culmination(seed, alt);
        let solar_midnight = solar_noon + seconds(SOLAR_MIDNIGHT_OFFSET);

        let noon_altitude = alt(solar_noon);
        let midnight_altitude = alt(solar_midnight);

        let crossing = |tier: Twilight| -> (Option<DuskDawn>, DateInterval) {
            let h = tier.threshold();
            if noon_altitude > h && midnight_altitude < h {
                let dusk = setting_crossing(solar_noon, h, alt);
                let dawn = rising_crossing(solar_midnight, h, alt);
                (Some(DuskDawn { dusk, dawn }), DateInterval::new(dusk, dawn))
            } else if midnight_altitude >= h {
                (None, DateInterval::zero_length(solar_midnight))
            } else {
                (
                    None,
                    DateInterval::from_duration(solar_noon, seconds(SECONDS_PER_DAY)),
                )
            }
        };

        let (sunset_sunrise, sunset_to_sunrise) = crossing(Twilight::Sunset);
        let (civil, civil_night) = crossing(Twilight::Civil);
        let (nautical, nautical_night) = crossing(Twilight::Nautical);
        let (astronomical, astronomical_night) = crossing(Twilight::Astronomical);

        SunData {
            events: SunEvents {
                solar_noon,
                solar_midnight,
                sunset_sunrise,
                civil,
                nautical,
                astronomical,
            },
            nights: NightIntervals {
                sunset_to_sunrise,
                civil: civil_night,
                nautical: nautical_night,
                astronomical: astronomical_night,
            },
            noon_altitude,
            midnight_altitude,
        }
    }

    /// Viewing interval for the selected darkness tier.
    pub fn night(&self, darkness: Darkness) -> DateInterval {
        self.nights.get(darkness.into())
    }

    pub fn solar_midnight(&self) -> Epoch {
        self.events.solar_midnight
    }
}

#[cfg(test)]
mod solar_test {
    use super::*;
    use crate::time::to_datetime;
    use approx::assert_abs_diff_eq;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_solar_position_equinox_and_solstice() {
        let equinox = Epoch::from_gregorian_utc_hms(2024, 3, 20, 3, 6, 0);
        let sun = SolarPosition::at(equinox);
        assert_abs_diff_eq!(sun.dec, 0.0, epsilon = 0.05);
        assert!(sun.ra < 0.1 || sun.ra > 359.9);

        let solstice = Epoch::from_gregorian_utc_hms(2024, 6, 20, 20, 51, 0);
        let sun = SolarPosition::at(solstice);
        assert_abs_diff_eq!(sun.dec, 23.44, epsilon = 0.05);
        assert_abs_diff_eq!(sun.ra, 90.0, epsilon = 0.1);
    }

    #[test]
    fn test_equator_equinox() {
        let site = Location::new(0.0, 0.0, chrono_tz::UTC).unwrap();
        let data = SunData::compute(&site, date(2024, 3, 20));

        assert_abs_diff_eq!(data.noon_altitude, 90.0, epsilon = 1.0);
        assert_abs_diff_eq!(data.midnight_altitude, -90.0, epsilon = 1.0);

        let noon = to_datetime(data.events.solar_noon, chrono_tz::UTC).unwrap();
        assert_eq!(noon.hour(), 12);
        assert!(noon.minute() < 15);

        let sunset = to_datetime(data.events.sunset().unwrap(), chrono_tz::UTC).unwrap();
        assert_eq!(sunset.hour(), 18);

        // roughly twelve hours of night, and each darker tier is shorter
        let nights = data.nights;
        assert_abs_diff_eq!(
            nights.sunset_to_sunrise.duration_seconds() / 3600.0,
            12.0,
            epsilon = 0.2
        );
        assert!(nights.civil.duration_seconds() < nights.sunset_to_sunrise.duration_seconds());
        assert!(nights.nautical.duration_seconds() < nights.civil.duration_seconds());
        assert!(nights.astronomical.duration_seconds() < nights.nautical.duration_seconds());
    }

    #[test]
    fn test_london_midsummer_never_fully_dark() {
        let site = Location::new(51.4769, -0.0005, chrono_tz::Europe::London).unwrap();
        let data = SunData::compute(&site, date(2024, 6, 21));

        let noon = to_datetime(data.events.solar_noon, chrono_tz::UTC).unwrap();
        assert_eq!(noon.hour(), 12);
        assert!(noon.minute() < 10);

        assert!(data.events.sunset_sunrise.is_some());
        assert!(data.events.civil.is_some());
        assert!(data.events.nautical.is_some());
        assert!(data.events.astronomical.is_none());

        let dark = data.night(Darkness::Astronomical);
        assert!(dark.is_zero_length());
        assert_eq!(dark.start(), data.solar_midnight());

        // nesting
        let nights = data.nights;
        assert!(nights.sunset_to_sunrise.contains_interval(&nights.civil));
        assert!(nights.civil.contains_interval(&nights.nautical));
        assert!(nights.nautical.contains_interval(&nights.astronomical));
    }

    #[test]
    fn test_tromso_polar_night() {
        let site = Location::new(69.6492, 18.9553, chrono_tz::Europe::Oslo).unwrap();
        let data = SunData::compute(&site, date(2024, 12, 21));

        assert!(data.noon_altitude < 0.0);
        assert!(data.events.sunset_sunrise.is_none());
        assert_abs_diff_eq!(
            data.nights.sunset_to_sunrise.duration_seconds(),
            SECONDS_PER_DAY,
            epsilon = 1e-6
        );
        assert_eq!(data.nights.sunset_to_sunrise.start(), data.events.solar_noon);

        // the sun still climbs above -6°
        assert!(data.events.civil.is_some());
        let civil = data.night(Darkness::Civil);
        assert!(civil.duration_seconds() > 12.0 * 3600.0);
        assert!(civil.duration_seconds() < SECONDS_PER_DAY);
    }

    #[test]
    fn test_poles_keep_the_requested_day() {
        let day = date(2024, 3, 1);

        // sun a few degrees below the horizon all day long
        let north = Location::new(90.0, 0.0, chrono_tz::UTC).unwrap();
        let data = SunData::compute(&north, day);
        let noon = to_datetime(data.events.solar_noon, chrono_tz::UTC).unwrap();
        assert_eq!(noon.date_naive(), day);
        assert!(data.noon_altitude < -6.0 && data.noon_altitude > -9.0);
        assert!(data.events.sunset_sunrise.is_none());
        assert_abs_diff_eq!(
            data.nights.sunset_to_sunrise.duration_seconds(),
            SECONDS_PER_DAY,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            data.nights.civil.duration_seconds(),
            SECONDS_PER_DAY,
            epsilon = 1e-6
        );
        assert!(data.night(Darkness::Nautical).is_zero_length());

        // midnight sun
        let south = Location::new(-90.0, 0.0, chrono_tz::UTC).unwrap();
        let data = SunData::compute(&south, day);
        let noon = to_datetime(data.events.solar_noon, chrono_tz::UTC).unwrap();
        assert_eq!(noon.date_naive(), day);
        assert!(data.midnight_altitude > 0.0);
        assert!(data.nights.sunset_to_sunrise.is_zero_length());
        assert!(data.night(Darkness::Astronomical).is_zero_length());
    }

    #[test]
    fn test_dusk_and_dawn_bracket_threshold() {
        let site = Location::new(45.0, 7.0, chrono_tz::Europe::Rome).unwrap();
        let data = SunData::compute(&site, date(2024, 10, 1));

        for tier in Twilight::ALL {
            let pair = data.events.pair(tier).unwrap();
            let h = tier.threshold();
            assert!(sun_altitude(&site, pair.dusk) > h);
            assert!(sun_altitude(&site, pair.dusk + seconds(120.0)) < h);
            assert!(sun_altitude(&site, pair.dawn) < h);
            assert!(sun_altitude(&site, pair.dawn + seconds(120.0)) > h);
            assert!(pair.dusk < data.solar_midnight() && data.solar_midnight() < pair.dawn);
        }
    }
}
