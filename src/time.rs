//! # Time helpers and date intervals
//!
//! The engine uses [`hifitime::Epoch`] as its *instant* type and [`hifitime::Duration`] for
//! spans. Calendar dates and IANA zones come from the caller as [`chrono::NaiveDate`] and
//! [`chrono_tz::Tz`]; this module is the only place the two time libraries meet.
//!
//! Components
//! -----------------
//! * [`days_since_j2000`] / [`ut_hours`] – the two time arguments of the sidereal-time formula.
//! * [`local_noon`] – the seed instant of every culmination search.
//! * [`DateInterval`] – a closed `[start, end]` span supporting intersection and duration queries.
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use hifitime::{Duration, Epoch};

use crate::constants::{JD2000, SECONDS_PER_DAY, SECONDS_PER_HOUR};

/// Build a [`Duration`] from a number of seconds.
#[inline]
pub fn seconds(s: f64) -> Duration {
    Duration::from_seconds(s)
}

/// Fractional number of days elapsed since J2000.0 (2000-01-01 12:00 UTC).
pub fn days_since_j2000(epoch: Epoch) -> f64 {
    epoch.to_jde_utc_days() - JD2000
}

/// UTC time of day of `epoch`, in fractional hours.
pub fn ut_hours(epoch: Epoch) -> f64 {
    let (_, _, _, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    hour as f64 + minute as f64 / 60.0 + (second as f64 + nanos as f64 * 1e-9) / SECONDS_PER_HOUR
}

/// Convert a UTC wall-clock time into an [`Epoch`].
pub fn epoch_from_naive_utc(datetime: NaiveDateTime) -> Epoch {
    Epoch::from_unix_milliseconds(datetime.and_utc().timestamp_millis() as f64)
}

/// Convert a zoned chrono timestamp into an [`Epoch`].
pub fn epoch_from_datetime<T: TimeZone>(datetime: &DateTime<T>) -> Epoch {
    Epoch::from_unix_milliseconds(datetime.timestamp_millis() as f64)
}

/// Express `epoch` as a wall-clock time in `tz`.
///
/// Returns `None` only when the instant is outside chrono's representable range.
pub fn to_datetime(epoch: Epoch, tz: Tz) -> Option<DateTime<Tz>> {
    let millis = epoch.to_unix_milliseconds().round() as i64;
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|utc| utc.with_timezone(&tz))
}

/// Instant of 12:00 local wall-clock time on `date` in the zone `tz`.
///
/// Arguments
/// -----------------
/// * `date`: the calendar date of the night being planned (the evening side).
/// * `tz`: the observer's IANA time zone.
///
/// Return
/// ----------
/// * The UTC instant of local noon. When a daylight-saving transition makes local noon
///   ambiguous the earliest mapping is used; when it does not exist at all the wall time
///   is read as UTC.
pub fn local_noon(date: NaiveDate, tz: Tz) -> Epoch {
    let naive = date.and_time(NaiveTime::MIN) + TimeDelta::hours(12);
    match tz.from_local_datetime(&naive).earliest() {
        Some(local) => epoch_from_datetime(&local),
        None => epoch_from_naive_utc(naive),
    }
}

/// A closed span of time `[start, end]`.
///
/// The span may be zero-length, which is how the engine represents "the sun never got dark
/// enough" and similar degenerate nights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateInterval {
    start: Epoch,
    end: Epoch,
}

impl DateInterval {
    /// Build an interval from two instants, in either order.
    pub fn new(a: Epoch, b: Epoch) -> Self {
        if b < a {
            DateInterval { start: b, end: a }
        } else {
            DateInterval { start: a, end: b }
        }
    }

    /// Build an interval from a start instant and a (possibly negative) duration.
    pub fn from_duration(start: Epoch, duration: Duration) -> Self {
        DateInterval::new(start, start + duration)
    }

    /// A zero-length interval located at `at`.
    pub fn zero_length(at: Epoch) -> Self {
        DateInterval { start: at, end: at }
    }

    pub fn start(&self) -> Epoch {
        self.start
    }

    pub fn end(&self) -> Epoch {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Duration of the interval in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.duration().to_seconds()
    }

    /// Duration of the interval in days.
    pub fn duration_days(&self) -> f64 {
        self.duration_seconds() / SECONDS_PER_DAY
    }

    pub fn is_zero_length(&self) -> bool {
        self.duration_seconds() == 0.0
    }

    pub fn contains(&self, epoch: Epoch) -> bool {
        self.start <= epoch && epoch <= self.end
    }

    /// `true` if `other` lies entirely inside `self`.
    pub fn contains_interval(&self, other: &DateInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Common part of two intervals, or `None` when they are disjoint.
    ///
    /// Intervals touching at a single instant intersect in a zero-length interval.
    pub fn intersection(&self, other: &DateInterval) -> Option<DateInterval> {
        let start = if self.start > other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end < other.end {
            self.end
        } else {
            other.end
        };
        (start <= end).then_some(DateInterval { start, end })
    }

    /// Length of the common part of two intervals; zero when disjoint.
    pub fn overlap(&self, other: &DateInterval) -> Duration {
        self.intersection(other)
            .map_or(Duration::ZERO, |common| common.duration())
    }
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_days_since_j2000() {
        let j2000 = Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0);
        assert_abs_diff_eq!(days_since_j2000(j2000), 0.0, epsilon = 1e-9);

        let next = Epoch::from_gregorian_utc_hms(2000, 1, 2, 0, 0, 0);
        assert_abs_diff_eq!(days_since_j2000(next), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_ut_hours() {
        let epoch = Epoch::from_gregorian_utc_hms(2024, 3, 20, 18, 30, 36);
        assert_abs_diff_eq!(ut_hours(epoch), 18.51, epsilon = 1e-9);
    }

    #[test]
    fn test_local_noon() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        let paris = local_noon(date, chrono_tz::Europe::Paris);
        let expected = Epoch::from_gregorian_utc_hms(2024, 7, 1, 10, 0, 0);
        assert!((paris - expected).abs() < seconds(1e-3));

        let la = local_noon(date, chrono_tz::America::Los_Angeles);
        let expected = Epoch::from_gregorian_utc_hms(2024, 7, 1, 19, 0, 0);
        assert!((la - expected).abs() < seconds(1e-3));

        let local = to_datetime(la, chrono_tz::America::Los_Angeles).unwrap();
        assert_eq!(local.naive_local().date(), date);
        assert_eq!(local.naive_local().time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn test_interval_intersection() {
        let t0 = Epoch::from_gregorian_utc_hms(2024, 1, 1, 0, 0, 0);
        let a = DateInterval::from_duration(t0, seconds(4.0 * 3600.0));
        let b = DateInterval::new(t0 + seconds(3.0 * 3600.0), t0 + seconds(6.0 * 3600.0));

        let common = a.intersection(&b).unwrap();
        assert_eq!(common.start(), t0 + seconds(3.0 * 3600.0));
        assert_eq!(common.end(), t0 + seconds(4.0 * 3600.0));
        assert_abs_diff_eq!(a.overlap(&b).to_seconds(), 3600.0, epsilon = 1e-6);

        let c = DateInterval::from_duration(t0 + seconds(5.0 * 3600.0), seconds(60.0));
        assert!(a.intersection(&c).is_none());
        assert_eq!(a.overlap(&c), Duration::ZERO);
    }

    #[test]
    fn test_interval_ordering_and_zero_length() {
        let t0 = Epoch::from_gregorian_utc_hms(2024, 1, 1, 0, 0, 0);
        let t1 = t0 + seconds(90.0);

        let swapped = DateInterval::new(t1, t0);
        assert_eq!(swapped.start(), t0);
        assert_eq!(swapped.end(), t1);
        assert!(swapped.contains(t0 + seconds(30.0)));

        let point = DateInterval::zero_length(t1);
        assert!(point.is_zero_length());
        assert!(swapped.contains_interval(&point));
        assert_eq!(point.duration_days(), 0.0);
    }
}
