//! # User thresholds and imaging presets
//!
//! This module defines the read-only configuration the host application hands to the
//! engine on every call:
//!
//! * [`ReportThresholds`] – what makes a target worth putting in the nightly report
//!   (minimum visibility, frame coverage, moon cut-off, darkness tier, broadband preference).
//!   Built through [`ReportThresholdsBuilder`], which validates the ranges.
//! * [`TargetThresholds`] – the limiting altitude and the targets the user chose to hide.
//! * [`ImagingPreset`] – an optical train (focal length, pixel size, sensor resolution) from
//!   which the field of view is derived.
//!
//! All three implement `serde` so the host can persist them in whatever format it uses.
//! Deserialization goes through the same validation as the constructors, and missing
//! fields of the thresholds fall back to the [`Default`] values.
//!
//! ## Example
//!
//! ```rust
//! use deepsky::solar::Darkness;
//! use deepsky::thresholds::ReportThresholds;
//!
//! let thresholds = ReportThresholds::builder()
//!     .min_visibility(0.6)
//!     .min_fov_coverage(0.2)
//!     .moon_illumination_cutoff(0.3)
//!     .darkness(Darkness::Nautical)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(thresholds.darkness, Darkness::Nautical);
//! ```
use std::cmp::Ordering::{Equal, Greater, Less};
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{ArcMinute, ArcSec, Degree, ARCMIN_PER_DEG, ARCSEC_PER_RAD, RADEG};
use crate::deepsky_errors::DeepSkyError;
use crate::solar::Darkness;

#[inline]
fn gt0(x: f64) -> bool {
    x.partial_cmp(&0.0) == Some(Greater)
}

#[inline]
fn ge0(x: f64) -> bool {
    matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
}

#[inline]
fn le(a: f64, b: f64) -> bool {
    matches!(a.partial_cmp(&b), Some(Less) | Some(Equal))
}

/// Thresholds of the nightly report.
///
/// Fields
/// -----------------
/// * `min_visibility` – minimum visibility score, in `[0, 1]`.
/// * `min_fov_coverage` – minimum ratio of target length to field-of-view length, in `(0, 1)`.
/// * `moon_illumination_cutoff` – moon illuminated fraction above which only narrowband
///   targets are suggested, in `[0, 1]`.
/// * `darkness` – darkness tier defining the default viewing interval.
/// * `prefer_broadband` – restrict suggestions to broadband targets when the moon is no
///   problem.
///
/// Defaults: `0.5`, `0.3`, `0.2`, astronomical, `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReportThresholds")]
pub struct ReportThresholds {
    pub min_visibility: f64,
    pub min_fov_coverage: f64,
    pub moon_illumination_cutoff: f64,
    pub darkness: Darkness,
    pub prefer_broadband: bool,
}

impl ReportThresholds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fluent, validating builder starting from the defaults.
    pub fn builder() -> ReportThresholdsBuilder {
        ReportThresholdsBuilder::new()
    }
}

impl Default for ReportThresholds {
    fn default() -> Self {
        ReportThresholds {
            min_visibility: 0.5,
            min_fov_coverage: 0.3,
            moon_illumination_cutoff: 0.2,
            darkness: Darkness::Astronomical,
            prefer_broadband: false,
        }
    }
}

/// Builder for [`ReportThresholds`], with validation.
#[derive(Debug, Clone, Default)]
pub struct ReportThresholdsBuilder {
    thresholds: ReportThresholds,
}

impl ReportThresholdsBuilder {
    pub fn new() -> Self {
        Self {
            thresholds: ReportThresholds::default(),
        }
    }

    pub fn min_visibility(mut self, v: f64) -> Self {
        self.thresholds.min_visibility = v;
        self
    }
    pub fn min_fov_coverage(mut self, v: f64) -> Self {
        self.thresholds.min_fov_coverage = v;
        self
    }
    pub fn moon_illumination_cutoff(mut self, v: f64) -> Self {
        self.thresholds.moon_illumination_cutoff = v;
        self
    }
    pub fn darkness(mut self, v: Darkness) -> Self {
        self.thresholds.darkness = v;
        self
    }
    pub fn prefer_broadband(mut self, v: bool) -> Self {
        self.thresholds.prefer_broadband = v;
        self
    }

    pub fn build(self) -> Result<ReportThresholds, DeepSkyError> {
        let t = &self.thresholds;

        if !(ge0(t.min_visibility) && le(t.min_visibility, 1.0)) {
            return Err(DeepSkyError::InvalidParameter(
                "min_visibility must be in [0, 1]".into(),
            ));
        }
        if !(gt0(t.min_fov_coverage) && t.min_fov_coverage < 1.0) {
            return Err(DeepSkyError::InvalidParameter(
                "min_fov_coverage must be in (0, 1)".into(),
            ));
        }
        if !(ge0(t.moon_illumination_cutoff) && le(t.moon_illumination_cutoff, 1.0)) {
            return Err(DeepSkyError::InvalidParameter(
                "moon_illumination_cutoff must be in [0, 1]".into(),
            ));
        }

        Ok(self.thresholds)
    }
}

/// Unvalidated mirror of [`ReportThresholds`], as read from a configuration file.
#[derive(Deserialize)]
#[serde(default)]
struct RawReportThresholds {
    min_visibility: f64,
    min_fov_coverage: f64,
    moon_illumination_cutoff: f64,
    darkness: Darkness,
    prefer_broadband: bool,
}

impl Default for RawReportThresholds {
    fn default() -> Self {
        let d = ReportThresholds::default();
        RawReportThresholds {
            min_visibility: d.min_visibility,
            min_fov_coverage: d.min_fov_coverage,
            moon_illumination_cutoff: d.moon_illumination_cutoff,
            darkness: d.darkness,
            prefer_broadband: d.prefer_broadband,
        }
    }
}

impl TryFrom<RawReportThresholds> for ReportThresholds {
    type Error = DeepSkyError;

    fn try_from(raw: RawReportThresholds) -> Result<Self, Self::Error> {
        ReportThresholds::builder()
            .min_visibility(raw.min_visibility)
            .min_fov_coverage(raw.min_fov_coverage)
            .moon_illumination_cutoff(raw.moon_illumination_cutoff)
            .darkness(raw.darkness)
            .prefer_broadband(raw.prefer_broadband)
            .build()
    }
}

impl fmt::Display for ReportThresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 40;
            writeln!(f, "Report thresholds")?;
            writeln!(f, "-----------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            line!(
                "min_visibility           = {:.2}",
                self.min_visibility,
                "Minimum fraction of the night above the limit"
            )?;
            line!(
                "min_fov_coverage         = {:.2}",
                self.min_fov_coverage,
                "Minimum target/frame length ratio"
            )?;
            line!(
                "moon_illumination_cutoff = {:.2}",
                self.moon_illumination_cutoff,
                "Narrowband only above this illumination"
            )?;
            line!(
                "darkness                 = {:?}",
                self.darkness,
                "Twilight tier of the viewing interval"
            )?;
            line!(
                "prefer_broadband         = {}",
                self.prefer_broadband,
                "Broadband targets only on moonless nights"
            )?;
            Ok(())
        } else {
            write!(
                f,
                "ReportThresholds(min_visibility={:.2}, min_fov_coverage={:.2}, moon_cutoff={:.2}, darkness={:?}, prefer_broadband={})",
                self.min_visibility,
                self.min_fov_coverage,
                self.moon_illumination_cutoff,
                self.darkness,
                self.prefer_broadband
            )
        }
    }
}

/// Per-user target thresholds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTargetThresholds")]
pub struct TargetThresholds {
    /// Minimum usable altitude, in degrees.
    pub limiting_altitude: Degree,
    /// Leave out targets that never clear the limiting altitude.
    pub hide_never_rises: bool,
    /// Identifiers of targets the user does not want suggested.
    pub hidden_targets: HashSet<String>,
}

impl TargetThresholds {
    pub fn new(limiting_altitude: Degree) -> Result<Self, DeepSkyError> {
        if !(-90.0..=90.0).contains(&limiting_altitude) {
            return Err(DeepSkyError::InvalidParameter(
                "limiting_altitude must be in [-90, 90]".into(),
            ));
        }
        Ok(TargetThresholds {
            limiting_altitude,
            ..Default::default()
        })
    }

    pub fn hide_never_rises(mut self, v: bool) -> Self {
        self.hide_never_rises = v;
        self
    }

    pub fn hide<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden_targets.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden_targets.contains(id)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawTargetThresholds {
    limiting_altitude: Degree,
    hide_never_rises: bool,
    hidden_targets: HashSet<String>,
}

impl TryFrom<RawTargetThresholds> for TargetThresholds {
    type Error = DeepSkyError;

    fn try_from(raw: RawTargetThresholds) -> Result<Self, Self::Error> {
        Ok(TargetThresholds::new(raw.limiting_altitude)?
            .hide_never_rises(raw.hide_never_rises)
            .hide(raw.hidden_targets))
    }
}

/// An imaging train: telescope focal length and camera sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawImagingPreset")]
pub struct ImagingPreset {
    /// Focal length, millimetres.
    pub focal_length: f64,
    /// Pixel pitch, micrometres.
    pub pixel_size: f64,
    /// Pixels along the long side of the sensor.
    pub resolution_length: u32,
    /// Pixels along the short side of the sensor.
    pub resolution_width: u32,
}

impl ImagingPreset {
    pub fn new(
        focal_length: f64,
        pixel_size: f64,
        resolution_length: u32,
        resolution_width: u32,
    ) -> Result<Self, DeepSkyError> {
        if !gt0(focal_length) || !gt0(pixel_size) {
            return Err(DeepSkyError::InvalidParameter(
                "focal_length and pixel_size must be > 0".into(),
            ));
        }
        if resolution_length == 0 || resolution_width == 0 {
            return Err(DeepSkyError::InvalidParameter(
                "sensor resolution must be >= 1 pixel".into(),
            ));
        }
        Ok(ImagingPreset {
            focal_length,
            pixel_size,
            resolution_length,
            resolution_width,
        })
    }

    /// Sky angle covered by one pixel, in arcseconds.
    pub fn pixel_scale(&self) -> ArcSec {
        ARCSEC_PER_RAD * (self.pixel_size * 1e-3) / self.focal_length
    }

    fn fov(&self, pixels: u32) -> ArcMinute {
        let sensor_mm = self.pixel_size * 1e-3 * pixels as f64;
        let angle: Degree = 2.0 * (sensor_mm / (2.0 * self.focal_length)).atan() / RADEG;
        angle * ARCMIN_PER_DEG
    }

    /// Field of view along the long side of the sensor, in arcminutes.
    pub fn fov_length(&self) -> ArcMinute {
        self.fov(self.resolution_length)
    }

    /// Field of view along the short side of the sensor, in arcminutes.
    pub fn fov_width(&self) -> ArcMinute {
        self.fov(self.resolution_width)
    }
}

#[derive(Deserialize)]
struct RawImagingPreset {
    focal_length: f64,
    pixel_size: f64,
    resolution_length: u32,
    resolution_width: u32,
}

impl TryFrom<RawImagingPreset> for ImagingPreset {
    type Error = DeepSkyError;

    fn try_from(raw: RawImagingPreset) -> Result<Self, Self::Error> {
        ImagingPreset::new(
            raw.focal_length,
            raw.pixel_size,
            raw.resolution_length,
            raw.resolution_width,
        )
    }
}

#[cfg(test)]
mod thresholds_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_report_thresholds_builder() {
        let t = ReportThresholds::builder()
            .min_visibility(0.7)
            .prefer_broadband(true)
            .build()
            .unwrap();
        assert_eq!(t.min_visibility, 0.7);
        assert!(t.prefer_broadband);
        assert_eq!(t.min_fov_coverage, 0.3);

        assert_eq!(
            ReportThresholds::builder().min_fov_coverage(1.0).build(),
            Err(DeepSkyError::InvalidParameter(
                "min_fov_coverage must be in (0, 1)".into()
            ))
        );
        assert!(ReportThresholds::builder().min_fov_coverage(0.0).build().is_err());
        assert!(ReportThresholds::builder().min_visibility(1.2).build().is_err());
        assert!(ReportThresholds::builder()
            .moon_illumination_cutoff(f64::NAN)
            .build()
            .is_err());
    }

    #[test]
    fn test_report_thresholds_display() {
        let table = format!("{:#}", ReportThresholds::default());
        assert!(table.starts_with("Report thresholds"));
        assert!(table.contains("min_fov_coverage         = 0.30"));
        assert!(table.contains("darkness                 = Astronomical"));

        let short = ReportThresholds::default().to_string();
        assert!(short.starts_with("ReportThresholds(min_visibility=0.50"));
    }

    #[test]
    fn test_target_thresholds() {
        let t = TargetThresholds::new(20.0)
            .unwrap()
            .hide_never_rises(true)
            .hide(["m42", "ngc7000"]);
        assert!(t.is_hidden("m42"));
        assert!(!t.is_hidden("m31"));
        assert!(t.hide_never_rises);

        assert!(TargetThresholds::new(95.0).is_err());
    }

    #[test]
    fn test_imaging_preset_fov() {
        // 400 mm refractor with an APS-C IMX571 sensor
        let preset = ImagingPreset::new(400.0, 3.76, 6248, 4176).unwrap();
        assert_abs_diff_eq!(preset.pixel_scale(), 1.939, epsilon = 1e-3);
        assert_abs_diff_eq!(preset.fov_length(), 201.85, epsilon = 0.5);
        assert!(preset.fov_width() < preset.fov_length());

        assert!(ImagingPreset::new(0.0, 3.76, 6248, 4176).is_err());
        assert!(ImagingPreset::new(400.0, 3.76, 0, 4176).is_err());
    }

    #[test]
    fn test_deserialization_is_validated() {
        let t: ReportThresholds = serde_json::from_str(r#"{"min_visibility": 0.8}"#).unwrap();
        assert_eq!(t.min_visibility, 0.8);
        assert_eq!(t.min_fov_coverage, 0.3);
        assert_eq!(t.darkness, Darkness::Astronomical);

        let err = serde_json::from_str::<ReportThresholds>(r#"{"min_fov_coverage": 1.5}"#)
            .unwrap_err();
        assert!(err.to_string().contains("min_fov_coverage must be in (0, 1)"));
        assert!(serde_json::from_str::<ReportThresholds>(r#"{"min_visibility": -0.1}"#).is_err());

        let t: TargetThresholds =
            serde_json::from_str(r#"{"limiting_altitude": 25.0, "hidden_targets": ["m42"]}"#)
                .unwrap();
        assert_eq!(t.limiting_altitude, 25.0);
        assert!(t.is_hidden("m42"));
        assert!(!t.hide_never_rises);
        assert_eq!(
            serde_json::from_str::<TargetThresholds>("{}").unwrap(),
            TargetThresholds::default()
        );
        assert!(serde_json::from_str::<TargetThresholds>(r#"{"limiting_altitude": 120.0}"#).is_err());

        let preset: ImagingPreset = serde_json::from_str(
            r#"{"focal_length": 400.0, "pixel_size": 3.76, "resolution_length": 6248, "resolution_width": 4176}"#,
        )
        .unwrap();
        assert_eq!(preset, ImagingPreset::new(400.0, 3.76, 6248, 4176).unwrap());
        assert!(serde_json::from_str::<ImagingPreset>(
            r#"{"focal_length": -400.0, "pixel_size": 3.76, "resolution_length": 6248, "resolution_width": 4176}"#,
        )
        .is_err());
        assert!(serde_json::from_str::<ImagingPreset>(
            r#"{"focal_length": 400.0, "pixel_size": 3.76, "resolution_length": 0, "resolution_width": 4176}"#,
        )
        .is_err());
    }
}
