//! # Nightly report
//!
//! The nightly report answers "what should I image tonight?" with four short lists:
//!
//! * the overall top five,
//! * the top ten nebulae,
//! * the top ten galaxies,
//! * the top ten star clusters.
//!
//! ## Pipeline
//!
//! Every list goes through the same steps:
//!
//! 1. the catalog minus the targets the user hid,
//! 2. drop targets with a season score below [`MIN_SEASON_SCORE`],
//! 3. drop targets with a visibility score below the minimum visibility,
//! 4. if the moon is brighter than the illumination cut-off **and** its problem interval
//!    covers more than [`MOON_OVERLAP_FRACTION`] of the viewing interval, keep only
//!    narrowband-suitable types; otherwise, if broadband is preferred, keep only
//!    broadband-suitable types,
//! 5. keep the type group of the list (the overall list keeps every type),
//! 6. with an imaging preset, keep targets whose `arc_length / fov_length` ratio is above the
//!    minimum coverage and at most [`MAX_FOV_COVERAGE`],
//! 7. sort by visibility score, descending,
//! 8. keep the first five (overall) or ten (groups).
//!
//! Steps 1 to 4 and 6 do not depend on the list, so they run once and each list only applies
//! its group and truncation. Lists may come out empty.
use chrono::NaiveDate;
use log::{debug, trace};

use crate::catalog::query::QueryContext;
use crate::catalog::Catalog;
use crate::constants::{
    ArcMinute, MAX_FOV_COVERAGE, MIN_SEASON_SCORE, MOON_OVERLAP_FRACTION, TOP_GROUP_COUNT,
    TOP_OVERALL_COUNT,
};
use crate::observers::Location;
use crate::targets::{Target, TypeGroup};
use crate::thresholds::{ImagingPreset, ReportThresholds, TargetThresholds};
use crate::time::DateInterval;

/// Moon conditions of the night, provided by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoonState {
    /// Illuminated fraction of the disc, in `[0, 1]`.
    pub illumination: f64,
    /// Time span during which the moon gets in the way, if any.
    pub problem_interval: Option<DateInterval>,
}

impl MoonState {
    pub fn new(illumination: f64, problem_interval: Option<DateInterval>) -> Self {
        MoonState {
            illumination,
            problem_interval,
        }
    }

    /// `true` when the moon is bright enough and up long enough during `viewing` to rule out
    /// broadband imaging.
    pub fn is_problem(&self, viewing: &DateInterval, illumination_cutoff: f64) -> bool {
        if self.illumination <= illumination_cutoff {
            return false;
        }
        self.problem_interval.is_some_and(|moon| {
            viewing.overlap(&moon).to_seconds()
                > MOON_OVERLAP_FRACTION * viewing.duration_seconds()
        })
    }
}

/// `true` when a target of length `arc_length` fills the frame enough without overflowing it.
pub fn frame_fits(arc_length: ArcMinute, fov_length: ArcMinute, min_coverage: f64) -> bool {
    let ratio = arc_length / fov_length;
    ratio > min_coverage && ratio <= MAX_FOV_COVERAGE
}

/// All the inputs of a report.
#[derive(Debug, Clone)]
pub struct ReportInputs {
    pub location: Location,
    pub date: NaiveDate,
    /// Custom viewing interval. `None` uses the night of [`ReportThresholds::darkness`].
    pub viewing_interval: Option<DateInterval>,
    pub thresholds: ReportThresholds,
    pub target_thresholds: TargetThresholds,
    pub imaging_preset: Option<ImagingPreset>,
    pub moon: MoonState,
}

impl ReportInputs {
    /// Inputs with default thresholds, no imaging preset and no moon.
    pub fn new(location: Location, date: NaiveDate) -> Self {
        ReportInputs {
            location,
            date,
            viewing_interval: None,
            thresholds: ReportThresholds::default(),
            target_thresholds: TargetThresholds::default(),
            imaging_preset: None,
            moon: MoonState::default(),
        }
    }

    pub fn with_viewing_interval(mut self, viewing: DateInterval) -> Self {
        self.viewing_interval = Some(viewing);
        self
    }

    pub fn with_thresholds(mut self, thresholds: ReportThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_target_thresholds(mut self, thresholds: TargetThresholds) -> Self {
        self.target_thresholds = thresholds;
        self
    }

    pub fn with_imaging_preset(mut self, preset: ImagingPreset) -> Self {
        self.imaging_preset = Some(preset);
        self
    }

    pub fn with_moon(mut self, moon: MoonState) -> Self {
        self.moon = moon;
        self
    }

    /// Night context of these inputs: sun data, viewing interval and target thresholds.
    pub fn context(&self) -> QueryContext {
        let ctx = QueryContext::new(
            self.location,
            self.date,
            self.thresholds.darkness,
            self.target_thresholds.clone(),
        );
        match self.viewing_interval {
            Some(viewing) => ctx.with_viewing_interval(viewing),
            None => ctx,
        }
    }
}

/// The four suggestion lists of one night, borrowing from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct NightlyReport<'a> {
    pub viewing_interval: DateInterval,
    pub top_five: Vec<&'a Target>,
    pub top_nebulae: Vec<&'a Target>,
    pub top_galaxies: Vec<&'a Target>,
    pub top_star_clusters: Vec<&'a Target>,
}

impl<'a> NightlyReport<'a> {
    /// Build the report of `inputs` over `catalog`.
    ///
    /// Arguments
    /// -----------------
    /// * `catalog`: the target catalog, borrowed for the lifetime of the report.
    /// * `inputs`: site, date, thresholds, optional imaging preset and moon state.
    ///
    /// Return
    /// ----------
    /// * The four lists, each sorted by visibility score, descending.
    pub fn generate(catalog: &'a Catalog, inputs: &ReportInputs) -> NightlyReport<'a> {
        let ctx = inputs.context();
        Self::generate_with(catalog, inputs, &ctx)
    }

    /// Same as [`NightlyReport::generate`] with an already computed night context.
    pub fn generate_with(
        catalog: &'a Catalog,
        inputs: &ReportInputs,
        ctx: &QueryContext,
    ) -> NightlyReport<'a> {
        let thresholds = &inputs.thresholds;
        let viewing = *ctx.viewing_interval();

        let visible: Vec<(&'a Target, f64)> = catalog
            .iter()
            .filter(|t| !inputs.target_thresholds.is_hidden(&t.id))
            .filter_map(|t| {
                let scores = ctx.scores(t);
                trace!(
                    "{}: visibility {:.3}, season {:.3}",
                    t.id,
                    scores.visibility,
                    scores.season
                );
                (scores.season >= MIN_SEASON_SCORE
                    && scores.visibility >= thresholds.min_visibility)
                    .then_some((t, scores.visibility))
            })
            .collect();

        let moon_problem = inputs
            .moon
            .is_problem(&viewing, thresholds.moon_illumination_cutoff);

        let candidates: Vec<(&'a Target, f64)> = visible
            .into_iter()
            .filter(|(t, _)| {
                if moon_problem {
                    t.target_type.is_narrowband()
                } else if thresholds.prefer_broadband {
                    t.target_type.is_broadband()
                } else {
                    true
                }
            })
            .filter(|(t, _)| {
                inputs.imaging_preset.is_none_or(|preset| {
                    frame_fits(t.arc_length, preset.fov_length(), thresholds.min_fov_coverage)
                })
            })
            .collect();

        debug!(
            "Nightly report for {}: {} candidates out of {} targets (moon problem: {})",
            inputs.date,
            candidates.len(),
            catalog.len(),
            moon_problem
        );

        let top = |group: Option<TypeGroup>, count: usize| -> Vec<&'a Target> {
            let mut members: Vec<(&'a Target, f64)> = candidates
                .iter()
                .copied()
                .filter(|(t, _)| group.is_none_or(|g| g.contains(t.target_type)))
                .collect();
            members.sort_by(|(_, a), (_, b)| b.total_cmp(a));
            members.into_iter().take(count).map(|(t, _)| t).collect()
        };

        let report = NightlyReport {
            viewing_interval: viewing,
            top_five: top(None, TOP_OVERALL_COUNT),
            top_nebulae: top(Some(TypeGroup::Nebulae), TOP_GROUP_COUNT),
            top_galaxies: top(Some(TypeGroup::Galaxies), TOP_GROUP_COUNT),
            top_star_clusters: top(Some(TypeGroup::StarClusters), TOP_GROUP_COUNT),
        };

        debug!(
            "Nightly report for {}: {} overall, {} nebulae, {} galaxies, {} star clusters",
            inputs.date,
            report.top_five.len(),
            report.top_nebulae.len(),
            report.top_galaxies.len(),
            report.top_star_clusters.len()
        );
        report
    }

    /// `true` when every list is empty.
    pub fn is_empty(&self) -> bool {
        self.top_five.is_empty()
            && self.top_nebulae.is_empty()
            && self.top_galaxies.is_empty()
            && self.top_star_clusters.is_empty()
    }
}
