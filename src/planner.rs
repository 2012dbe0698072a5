//! # Planner
//!
//! [`Planner`] is the entry point a host application keeps around: it owns the catalog
//! behind an [`Arc`] and exposes the read-only operations of the engine. Cloning a planner
//! only bumps the reference count, and since nothing in it is mutable after construction it
//! can be used from several threads at once.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use deepsky::catalog::Catalog;
//! use deepsky::observers::Location;
//! use deepsky::planner::Planner;
//! use deepsky::report::ReportInputs;
//!
//! let planner = Planner::new(Catalog::from_csv_path("targets.csv").unwrap());
//! let location = Location::new(45.0, 7.0, chrono_tz::Europe::Rome).unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
//!
//! let report = planner.report(&ReportInputs::new(location, date));
//! for target in &report.top_five {
//!     println!("{target}");
//! }
//! ```
use std::sync::Arc;

use chrono::NaiveDate;

use crate::catalog::query::{QueryContext, TargetQuery};
use crate::catalog::Catalog;
use crate::observers::Location;
use crate::report::{NightlyReport, ReportInputs};
use crate::scoring::TargetDetail;
use crate::solar::SunData;
use crate::targets::Target;

#[derive(Debug, Clone)]
pub struct Planner {
    catalog: Arc<Catalog>,
}

impl Planner {
    pub fn new(catalog: Catalog) -> Self {
        Planner {
            catalog: Arc::new(catalog),
        }
    }

    /// Build a planner over a catalog already shared elsewhere.
    pub fn from_shared(catalog: Arc<Catalog>) -> Self {
        Planner { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Sun events and night intervals of `date` at `location`.
    pub fn sun_data(&self, location: &Location, date: NaiveDate) -> SunData {
        SunData::compute(location, date)
    }

    /// Filtered and sorted targets of the catalog.
    pub fn query(&self, query: &TargetQuery, ctx: &QueryContext) -> Vec<&Target> {
        query.run(self.catalog.as_slice(), ctx)
    }

    pub fn report(&self, inputs: &ReportInputs) -> NightlyReport<'_> {
        NightlyReport::generate(&self.catalog, inputs)
    }

    /// Interval and scores of the target `id`, `None` if the catalog has no such target.
    pub fn detail(&self, id: &str, ctx: &QueryContext) -> Option<TargetDetail> {
        self.catalog.get(id).map(|target| ctx.detail(target))
    }
}
