//! # Catalog queries
//!
//! A [`TargetQuery`] collects the control values of every filter plus a sort method and
//! direction, and [`TargetQuery::run`] applies them to a catalog for one night described by
//! a [`QueryContext`].
//!
//! The filters always run in this order, each one over the output of the previous:
//!
//! 1. hidden targets (from [`TargetThresholds`]),
//! 2. free text,
//! 3. catalogs,
//! 4. constellations,
//! 5. types,
//! 6. magnitude range,
//! 7. size range,
//! 8. never-rising targets (when [`TargetThresholds::hide_never_rises`] is set),
//! 9. minimum visibility score,
//! 10. minimum season score.
//!
//! The cheap property filters come first so the altitude searches only run on what is left.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use deepsky::catalog::query::{QueryContext, TargetQuery};
//! use deepsky::catalog::sort::{SortDirection, SortMethod};
//! use deepsky::catalog::Catalog;
//! use deepsky::observers::Location;
//! use deepsky::solar::Darkness;
//! use deepsky::targets::TargetType;
//! use deepsky::thresholds::TargetThresholds;
//!
//! let catalog = Catalog::from_csv_path("targets.csv").unwrap();
//! let location = Location::new(45.0, 7.0, chrono_tz::Europe::Rome).unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
//! let ctx = QueryContext::new(location, date, Darkness::Astronomical, TargetThresholds::default());
//!
//! let galaxies = TargetQuery::new()
//!     .types([TargetType::SpiralGalaxy, TargetType::EllipticalGalaxy])
//!     .min_visibility(0.5)
//!     .sort(SortMethod::Season, SortDirection::Descending)
//!     .run(catalog.as_slice(), &ctx);
//! ```
use std::collections::HashSet;

use chrono::NaiveDate;
use log::debug;

use crate::catalog::filters::{
    by_catalogs, by_constellations, by_magnitude, by_min_season, by_min_visibility, by_size,
    by_text, by_types, without_hidden, without_never_rises,
};
use crate::catalog::sort::{sort_targets, SortDirection, SortMethod};
use crate::observers::Location;
use crate::scoring::{Scores, TargetDetail};
use crate::solar::{Darkness, SunData};
use crate::target_interval::TargetInterval;
use crate::targets::{Target, TargetCatalog, TargetType};
use crate::thresholds::TargetThresholds;
use crate::time::DateInterval;

/// Everything that depends on the night rather than on the target: site, date, sun data,
/// the viewing interval scores are measured against, and the user's target thresholds.
#[derive(Debug, Clone)]
pub struct QueryContext {
    location: Location,
    date: NaiveDate,
    sun: SunData,
    viewing: DateInterval,
    thresholds: TargetThresholds,
}

impl QueryContext {
    /// Compute the sun data of `date` and take the viewing interval from the `darkness` tier.
    pub fn new(
        location: Location,
        date: NaiveDate,
        darkness: Darkness,
        thresholds: TargetThresholds,
    ) -> Self {
        let sun = SunData::compute(&location, date);
        let viewing = sun.night(darkness);
        QueryContext {
            location,
            date,
            sun,
            viewing,
            thresholds,
        }
    }

    /// Replace the viewing interval by a custom one.
    pub fn with_viewing_interval(mut self, viewing: DateInterval) -> Self {
        self.viewing = viewing;
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sun(&self) -> &SunData {
        &self.sun
    }

    pub fn viewing_interval(&self) -> &DateInterval {
        &self.viewing
    }

    pub fn thresholds(&self) -> &TargetThresholds {
        &self.thresholds
    }

    pub fn interval(&self, target: &Target) -> TargetInterval {
        TargetInterval::resolve(
            target,
            &self.location,
            self.date,
            self.thresholds.limiting_altitude,
        )
    }

    pub fn scores(&self, target: &Target) -> Scores {
        Scores::from_interval(
            &self.interval(target),
            &self.viewing,
            self.sun.solar_midnight(),
        )
    }

    pub fn detail(&self, target: &Target) -> TargetDetail {
        TargetDetail::compute(
            target,
            &self.location,
            self.date,
            &self.sun,
            &self.viewing,
            self.thresholds.limiting_altitude,
        )
    }
}

/// Filter and sort settings of one catalog query. Every field starts inactive.
#[derive(Debug, Clone)]
pub struct TargetQuery {
    pub text: String,
    pub catalogs: HashSet<TargetCatalog>,
    pub constellations: HashSet<String>,
    pub types: HashSet<TargetType>,
    pub min_magnitude: f64,
    /// NaN for no upper bound.
    pub max_magnitude: f64,
    pub min_size: f64,
    /// NaN for no upper bound.
    pub max_size: f64,
    pub min_visibility: f64,
    pub min_season: f64,
    pub sort_method: SortMethod,
    pub sort_direction: SortDirection,
}

impl Default for TargetQuery {
    fn default() -> Self {
        TargetQuery {
            text: String::new(),
            catalogs: HashSet::new(),
            constellations: HashSet::new(),
            types: HashSet::new(),
            min_magnitude: 0.0,
            max_magnitude: f64::NAN,
            min_size: 0.0,
            max_size: f64::NAN,
            min_visibility: 0.0,
            min_season: 0.0,
            sort_method: SortMethod::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

impl TargetQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn catalogs(mut self, catalogs: impl IntoIterator<Item = TargetCatalog>) -> Self {
        self.catalogs = catalogs.into_iter().collect();
        self
    }

    pub fn constellations<S: Into<String>>(
        mut self,
        constellations: impl IntoIterator<Item = S>,
    ) -> Self {
        self.constellations = constellations.into_iter().map(Into::into).collect();
        self
    }

    pub fn types(mut self, types: impl IntoIterator<Item = TargetType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    pub fn magnitude(mut self, min: f64, max: f64) -> Self {
        self.min_magnitude = min;
        self.max_magnitude = max;
        self
    }

    pub fn size(mut self, min: f64, max: f64) -> Self {
        self.min_size = min;
        self.max_size = max;
        self
    }

    pub fn min_visibility(mut self, min: f64) -> Self {
        self.min_visibility = min;
        self
    }

    pub fn min_season(mut self, min: f64) -> Self {
        self.min_season = min;
        self
    }

    pub fn sort(mut self, method: SortMethod, direction: SortDirection) -> Self {
        self.sort_method = method;
        self.sort_direction = direction;
        self
    }

    /// Narrow `targets` with every active filter, without sorting.
    pub fn filter<'a>(&self, targets: &'a [Target], ctx: &QueryContext) -> Vec<&'a Target> {
        let thresholds = ctx.thresholds();

        let mut narrowed = without_hidden(targets.iter().collect(), &thresholds.hidden_targets);
        narrowed = by_text(narrowed, &self.text);
        narrowed = by_catalogs(narrowed, &self.catalogs);
        narrowed = by_constellations(narrowed, &self.constellations);
        narrowed = by_types(narrowed, &self.types);
        narrowed = by_magnitude(narrowed, self.min_magnitude, self.max_magnitude);
        narrowed = by_size(narrowed, self.min_size, self.max_size);
        if thresholds.hide_never_rises {
            narrowed = without_never_rises(narrowed, ctx);
        }
        narrowed = by_min_visibility(narrowed, self.min_visibility, ctx);
        narrowed = by_min_season(narrowed, self.min_season, ctx);
        narrowed
    }

    /// Filter then sort `targets` for the night described by `ctx`.
    ///
    /// Return
    /// ----------
    /// * References into `targets`, in the requested order. May be empty.
    pub fn run<'a>(&self, targets: &'a [Target], ctx: &QueryContext) -> Vec<&'a Target> {
        let narrowed = self.filter(targets, ctx);
        debug!(
            "Query on {}: {} of {} targets kept, sorted by {:?} {:?}",
            ctx.date(),
            narrowed.len(),
            targets.len(),
            self.sort_method,
            self.sort_direction
        );
        sort_targets(narrowed, self.sort_method, self.sort_direction, ctx)
    }
}
