//! # Target catalog
//!
//! The [`Catalog`] is the read-only repository of every [`Target`] the planner knows about.
//! It is built once, either from an in-memory `Vec<Target>` or from a CSV file, and then only
//! borrowed: queries and reports hand out `&Target` references into it, so a catalog can be
//! shared by several callers (for instance behind an `Arc`) without any locking.
//!
//! ## CSV layout
//!
//! One row per target, with a header line:
//!
//! ```text
//! id,name,ra,dec,arc_length,arc_width,apparent_magnitude,target_type,constellation,designations
//! m31,Andromeda Galaxy,10.68,41.27,190,60,3.4,spiral_galaxy,Andromeda,M 31;NGC 224
//! ```
//!
//! * `ra` / `dec` are J2000 degrees, `arc_length` / `arc_width` arcminutes.
//! * `apparent_magnitude` may be left empty.
//! * `target_type` accepts the snake_case label or its spaced form (`Emission Nebula`).
//! * `designations` is a `;`-separated list parsed with [`Designation::from_str`].
//!
//! See also
//! ------------
//! * [`filters`] – the narrowing filters applied by queries.
//! * [`sort`] – the sort keys.
//! * [`query::TargetQuery`] – the builder chaining both.
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use serde::Deserialize;

use crate::deepsky_errors::DeepSkyError;
use crate::targets::{Designation, Target, TargetType};

pub mod filters;
pub mod query;
pub mod sort;

/// One CSV row, before validation.
#[derive(Debug, Deserialize)]
struct TargetRecord {
    id: String,
    name: String,
    ra: f64,
    dec: f64,
    arc_length: f64,
    arc_width: f64,
    apparent_magnitude: Option<f64>,
    target_type: String,
    constellation: String,
    #[serde(default)]
    designations: String,
}

impl TryFrom<TargetRecord> for Target {
    type Error = DeepSkyError;

    fn try_from(record: TargetRecord) -> Result<Self, Self::Error> {
        let designations = record
            .designations
            .split(';')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(Designation::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Target {
            id: record.id,
            name: record.name,
            ra: record.ra,
            dec: record.dec,
            arc_length: record.arc_length,
            arc_width: record.arc_width,
            apparent_magnitude: record.apparent_magnitude,
            target_type: TargetType::from_str(&record.target_type)?,
            constellation: record.constellation,
            designations,
        })
    }
}

/// Immutable, ordered collection of targets with unique identifiers.
#[derive(Debug, Clone)]
pub struct Catalog {
    targets: Vec<Target>,
}

impl Catalog {
    /// Build a catalog from already parsed targets.
    ///
    /// Return
    /// ----------
    /// * [`DeepSkyError::EmptyCatalog`] when `targets` is empty,
    ///   [`DeepSkyError::DuplicateTarget`] when two targets share an identifier.
    pub fn new(targets: Vec<Target>) -> Result<Self, DeepSkyError> {
        if targets.is_empty() {
            return Err(DeepSkyError::EmptyCatalog);
        }
        if let Some(dup) = targets.iter().map(|t| t.id.as_str()).duplicates().next() {
            return Err(DeepSkyError::DuplicateTarget(dup.to_string()));
        }
        Ok(Catalog { targets })
    }

    /// Read a catalog from any CSV source (see the module documentation for the layout).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DeepSkyError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let targets = rdr
            .deserialize::<TargetRecord>()
            .map(|record| Target::try_from(record?))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Parsed {} targets from CSV", targets.len());
        Catalog::new(targets)
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, DeepSkyError> {
        let file = std::fs::File::open(path.as_ref())?;
        debug!("Loading target catalog from {}", path.as_ref().display());
        Catalog::from_csv_reader(file)
    }

    pub fn get(&self, id: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }

    pub fn as_slice(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Always `false`: an empty catalog cannot be built.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}
