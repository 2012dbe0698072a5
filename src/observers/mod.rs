//! # Observer location
//!
//! A [`Location`] is the observing site every visibility computation is made for: a
//! geodetic latitude/longitude pair in degrees and the IANA time zone used to find the
//! local noon that seeds the culmination searches.
//!
//! ## Conventions
//!
//! - Latitude: **degrees**, north positive, validated to lie in `[-90, 90]`.
//! - Longitude: **degrees**, east positive. Any value is accepted; the sidereal-time formula
//!   reduces it modulo 360.
//! - Time zone: a [`chrono_tz::Tz`], serialized by its IANA name (e.g. `"Europe/Paris"`).
//!
//! A `Location` is a small `Copy` value; the engine only ever reads it. Deserializing one
//! applies the same latitude check as [`Location::new`].
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::Degree;
use crate::deepsky_errors::DeepSkyError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    latitude: Degree,
    longitude: Degree,
    timezone: Tz,
}

impl Location {
    /// Construct a new observing site.
    ///
    /// Arguments
    /// -----------------
    /// * `latitude`: geodetic latitude in degrees, north positive.
    /// * `longitude`: longitude in degrees, east positive.
    /// * `timezone`: IANA time zone of the site.
    ///
    /// Return
    /// ----------
    /// * The location, or [`DeepSkyError::InvalidLatitude`] when the latitude is outside
    ///   `[-90, 90]` (or NaN).
    pub fn new(latitude: Degree, longitude: Degree, timezone: Tz) -> Result<Self, DeepSkyError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DeepSkyError::InvalidLatitude(latitude));
        }
        Ok(Location {
            latitude,
            longitude,
            timezone,
        })
    }

    pub fn latitude(&self) -> Degree {
        self.latitude
    }

    pub fn longitude(&self) -> Degree {
        self.longitude
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

#[derive(Deserialize)]
struct RawLocation {
    latitude: Degree,
    longitude: Degree,
    timezone: Tz,
}

impl TryFrom<RawLocation> for Location {
    type Error = DeepSkyError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Location::new(raw.latitude, raw.longitude, raw.timezone)
    }
}

#[cfg(test)]
mod location_test {
    use super::*;

    #[test]
    fn test_location_constructor() {
        let site = Location::new(28.7624, -17.8892, chrono_tz::Atlantic::Canary).unwrap();
        assert_eq!(site.latitude(), 28.7624);
        assert_eq!(site.longitude(), -17.8892);
        assert_eq!(site.timezone(), chrono_tz::Atlantic::Canary);

        assert!(Location::new(90.0, 0.0, chrono_tz::UTC).is_ok());
        assert!(Location::new(-90.0, 0.0, chrono_tz::UTC).is_ok());
    }

    #[test]
    fn test_location_rejects_bad_latitude() {
        assert_eq!(
            Location::new(91.0, 0.0, chrono_tz::UTC),
            Err(DeepSkyError::InvalidLatitude(91.0))
        );
        assert!(Location::new(f64::NAN, 0.0, chrono_tz::UTC).is_err());
    }

    #[test]
    fn test_location_deserialization_checks_latitude() {
        let site: Location = serde_json::from_str(
            r#"{"latitude": 45.0, "longitude": 7.0, "timezone": "Europe/Rome"}"#,
        )
        .unwrap();
        assert_eq!(site, Location::new(45.0, 7.0, chrono_tz::Europe::Rome).unwrap());

        let err = serde_json::from_str::<Location>(
            r#"{"latitude": 95.0, "longitude": 7.0, "timezone": "Europe/Rome"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Latitude out of range"));
    }
}
