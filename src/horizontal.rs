//! # Equatorial → horizontal transform
//!
//! Altitude of a fixed equatorial coordinate above the observer's horizon, using the
//! low-precision local sidereal time
//!
//! ```text
//! LST = 100.46 + 0.985647·d + λ + 15·UT      (mod 360)
//! HA  = LST − α                              (mod 360)
//! h   = asin( sin δ · sin φ + cos δ · cos φ · cos HA )
//! ```
//!
//! where `d` is the fractional number of days since J2000.0, `λ`/`φ` the site longitude and
//! latitude, and `α`/`δ` the right ascension and declination, all in degrees.
use hifitime::Epoch;

use crate::constants::{Degree, LST_J2000, LST_PER_UT_HOUR, LST_RATE, RADEG};
use crate::observers::Location;
use crate::time::{days_since_j2000, ut_hours};

/// Local sidereal time at `epoch` for the site longitude, in degrees `[0, 360)`.
pub fn local_sidereal_time(location: &Location, epoch: Epoch) -> Degree {
    let d = days_since_j2000(epoch);
    (LST_J2000 + LST_RATE * d + location.longitude() + LST_PER_UT_HOUR * ut_hours(epoch))
        .rem_euclid(360.0)
}

/// Hour angle of a right ascension at `epoch`, in degrees `[0, 360)`.
pub fn hour_angle(location: &Location, epoch: Epoch, ra: Degree) -> Degree {
    (local_sidereal_time(location, epoch) - ra).rem_euclid(360.0)
}

/// Altitude above the horizon of the coordinate `(ra, dec)` seen from `location` at `epoch`.
///
/// Arguments
/// -----------------
/// * `location`: the observing site.
/// * `epoch`: the instant of the observation.
/// * `ra`: right ascension in degrees.
/// * `dec`: declination in degrees.
///
/// Return
/// ----------
/// * The altitude in degrees, in `[-90, 90]`. The `asin` argument is clamped so that
///   rounding can never produce a NaN.
pub fn altitude(location: &Location, epoch: Epoch, ra: Degree, dec: Degree) -> Degree {
    let ha = hour_angle(location, epoch, ra) * RADEG;
    let lat = location.latitude() * RADEG;
    let dec = dec * RADEG;

    let sin_alt = dec.sin() * lat.sin() + dec.cos() * lat.cos() * ha.cos();
    sin_alt.clamp(-1.0, 1.0).asin() / RADEG
}

#[cfg(test)]
mod horizontal_test {
    use super::*;
    use crate::time::seconds;
    use approx::assert_abs_diff_eq;

    fn site(lat: f64, lon: f64) -> Location {
        Location::new(lat, lon, chrono_tz::UTC).unwrap()
    }

    #[test]
    fn test_lst_at_j2000() {
        let j2000 = Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0);
        // 100.46 + 15 * 12h
        assert_abs_diff_eq!(
            local_sidereal_time(&site(0.0, 0.0), j2000),
            280.46,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            local_sidereal_time(&site(0.0, 100.0), j2000),
            20.46,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_altitude_on_meridian() {
        let location = site(40.0, 0.0);
        let epoch = Epoch::from_gregorian_utc_hms(2024, 3, 20, 0, 0, 0);

        // A coordinate whose RA equals the current LST is on the meridian.
        let ra = local_sidereal_time(&location, epoch);
        assert_abs_diff_eq!(altitude(&location, epoch, ra, 0.0), 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(altitude(&location, epoch, ra, 40.0), 90.0, epsilon = 1e-6);
        assert_abs_diff_eq!(altitude(&location, epoch, ra, -60.0), -10.0, epsilon = 1e-9);

        // Twelve hours of hour angle later it sits at its lowest.
        let lower = (ra + 180.0).rem_euclid(360.0);
        assert_abs_diff_eq!(
            altitude(&location, epoch, lower, 0.0),
            -50.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_altitude_is_bounded_at_poles() {
        let pole = site(90.0, 0.0);
        let epoch = Epoch::from_gregorian_utc_hms(2024, 6, 1, 3, 0, 0);
        for k in 0..24 {
            let t = epoch + seconds(k as f64 * 3600.0);
            let alt = altitude(&pole, t, 123.0, 90.0);
            assert!(alt.is_finite());
            assert_abs_diff_eq!(alt, 90.0, epsilon = 1e-6);
        }
    }
}
