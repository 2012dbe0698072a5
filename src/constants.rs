//! # Constants and type definitions for deepsky
//!
//! This module centralizes the **astronomical constants**, **conversion factors**, the
//! **numeric search parameters** and the **type aliases** shared by the visibility engine.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, arcminutes ↔ degrees)
//! - The J2000.0 reference epoch used by the sidereal-time and solar formulas
//! - Step sizes of the boundary search and the culmination offsets
//! - Twilight thresholds and report-pipeline cut-offs
//!
//! Angles are carried as plain `f64` aliases, the way the rest of the crate reads them:
//! a [`Degree`] is always an angle in degrees, an [`ArcMinute`] an angular size.

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcminutes per degree
pub const ARCMIN_PER_DEG: f64 = 60.0;

/// Arcseconds per radian
pub const ARCSEC_PER_RAD: f64 = 206_264.806_247_096_36;

/// Julian date of the J2000.0 epoch (2000-01-01 12:00:00)
pub const JD2000: f64 = 2_451_545.0;

// -------------------------------------------------------------------------------------------------
// Sidereal time (low precision)
// -------------------------------------------------------------------------------------------------

/// Local sidereal time at J2000.0 for longitude 0 and 0h UT, in degrees
pub const LST_J2000: f64 = 100.46;

/// Daily advance of the sidereal time, in degrees per day
pub const LST_RATE: f64 = 0.985647;

/// Sidereal hour angle swept per UT hour, in degrees
pub const LST_PER_UT_HOUR: f64 = 15.0;

// -------------------------------------------------------------------------------------------------
// Boundary search
// -------------------------------------------------------------------------------------------------

/// Initial step of every boundary search, in seconds (6 h)
pub const SEARCH_INITIAL_STEP: f64 = 6.0 * SECONDS_PER_HOUR;

/// Minimum step of every boundary search, in seconds
pub const SEARCH_MIN_STEP: f64 = 60.0;

/// Guard against predicates that never flip (e.g. a target sitting on the pole)
pub const SEARCH_MAX_ITERATIONS: usize = 10_000;

/// Sampling gap used for the numeric altitude slope, in seconds
pub const SLOPE_SAMPLE_GAP: f64 = 1.0;

/// Offset between a target's culmination and its anti-culmination, in seconds.
///
/// Two minutes short of twelve hours.
pub const ANTI_CULMINATION_OFFSET: f64 = 43_080.0;

/// Offset between solar noon and solar midnight, in seconds
pub const SOLAR_MIDNIGHT_OFFSET: f64 = 12.0 * SECONDS_PER_HOUR;

/// Farthest a nearest-culmination search may move from its seed, in seconds.
///
/// At the poles the daily altitude swing vanishes and the slope only follows the slow
/// drift in declination; past this offset the seed itself is taken as the culmination.
pub const CULMINATION_MAX_OFFSET: f64 = 12.0 * SECONDS_PER_HOUR;

// -------------------------------------------------------------------------------------------------
// Twilight thresholds
// -------------------------------------------------------------------------------------------------

/// Sun altitude at sunset/sunrise, in degrees
pub const SUNSET_ALTITUDE: Degree = 0.0;

/// Sun altitude at the end of civil twilight, in degrees
pub const CIVIL_TWILIGHT_ALTITUDE: Degree = -6.0;

/// Sun altitude at the end of nautical twilight, in degrees
pub const NAUTICAL_TWILIGHT_ALTITUDE: Degree = -12.0;

/// Sun altitude at the end of astronomical twilight, in degrees
pub const ASTRONOMICAL_TWILIGHT_ALTITUDE: Degree = -18.0;

// -------------------------------------------------------------------------------------------------
// Report pipeline
// -------------------------------------------------------------------------------------------------

/// Season score below which a target is out of season
pub const MIN_SEASON_SCORE: f64 = 0.5;

/// Fraction of the viewing interval the moon must cover before it is a problem
pub const MOON_OVERLAP_FRACTION: f64 = 0.1;

/// Targets filling more than this fraction of the frame are left out
pub const MAX_FOV_COVERAGE: f64 = 0.9;

/// Length of the overall list of a nightly report
pub const TOP_OVERALL_COUNT: usize = 5;

/// Length of each per-group list of a nightly report
pub const TOP_GROUP_COUNT: usize = 10;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angular size in arcminutes
pub type ArcMinute = f64;
/// Angular size in arcseconds
pub type ArcSec = f64;
