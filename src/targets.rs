//! # Deep-sky targets
//!
//! A [`Target`] is one catalog entry: a fixed J2000 position, an angular extent, an optional
//! apparent magnitude, a [`TargetType`] and the list of catalog [`Designation`]s it is known
//! by (e.g. `M 31`, `NGC 224`). Targets are loaded once by the catalog and never mutated.
//!
//! ## Type groups
//!
//! The nightly report works with groups of types rather than with single types:
//!
//! | Group                | Members                                                     |
//! |----------------------|-------------------------------------------------------------|
//! | [`TypeGroup::Nebulae`]      | emission, reflection, dark, planetary, supernova remnant |
//! | [`TypeGroup::Galaxies`]     | spiral, elliptical, lenticular, irregular, galaxy group  |
//! | [`TypeGroup::StarClusters`] | open cluster, globular cluster, star cloud               |
//!
//! Independently, a type is **narrowband-suitable** when most of its light is in emission
//! lines (emission nebulae, planetary nebulae, supernova remnants) and **broadband-suitable**
//! otherwise.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ArcMinute, Degree};
use crate::deepsky_errors::DeepSkyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    EmissionNebula,
    ReflectionNebula,
    DarkNebula,
    PlanetaryNebula,
    SupernovaRemnant,
    SpiralGalaxy,
    EllipticalGalaxy,
    LenticularGalaxy,
    IrregularGalaxy,
    GalaxyGroup,
    OpenCluster,
    GlobularCluster,
    StarCloud,
    Asterism,
}

impl TargetType {
    pub const ALL: [TargetType; 14] = [
        TargetType::EmissionNebula,
        TargetType::ReflectionNebula,
        TargetType::DarkNebula,
        TargetType::PlanetaryNebula,
        TargetType::SupernovaRemnant,
        TargetType::SpiralGalaxy,
        TargetType::EllipticalGalaxy,
        TargetType::LenticularGalaxy,
        TargetType::IrregularGalaxy,
        TargetType::GalaxyGroup,
        TargetType::OpenCluster,
        TargetType::GlobularCluster,
        TargetType::StarCloud,
        TargetType::Asterism,
    ];

    /// `true` for types that image well through narrowband (emission-line) filters.
    pub fn is_narrowband(&self) -> bool {
        matches!(
            self,
            TargetType::EmissionNebula | TargetType::PlanetaryNebula | TargetType::SupernovaRemnant
        )
    }

    /// `true` for types that need broadband (continuum) imaging.
    pub fn is_broadband(&self) -> bool {
        !self.is_narrowband()
    }

    /// Report group of this type, if any.
    pub fn group(&self) -> Option<TypeGroup> {
        use TargetType::*;
        match self {
            EmissionNebula | ReflectionNebula | DarkNebula | PlanetaryNebula
            | SupernovaRemnant => Some(TypeGroup::Nebulae),
            SpiralGalaxy | EllipticalGalaxy | LenticularGalaxy | IrregularGalaxy | GalaxyGroup => {
                Some(TypeGroup::Galaxies)
            }
            OpenCluster | GlobularCluster | StarCloud => Some(TypeGroup::StarClusters),
            Asterism => None,
        }
    }

    fn label(&self) -> &'static str {
        use TargetType::*;
        match self {
            EmissionNebula => "emission_nebula",
            ReflectionNebula => "reflection_nebula",
            DarkNebula => "dark_nebula",
            PlanetaryNebula => "planetary_nebula",
            SupernovaRemnant => "supernova_remnant",
            SpiralGalaxy => "spiral_galaxy",
            EllipticalGalaxy => "elliptical_galaxy",
            LenticularGalaxy => "lenticular_galaxy",
            IrregularGalaxy => "irregular_galaxy",
            GalaxyGroup => "galaxy_group",
            OpenCluster => "open_cluster",
            GlobularCluster => "globular_cluster",
            StarCloud => "star_cloud",
            Asterism => "asterism",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TargetType {
    type Err = DeepSkyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        TargetType::ALL
            .into_iter()
            .find(|t| t.label() == wanted)
            .ok_or_else(|| DeepSkyError::UnknownTargetType(s.to_string()))
    }
}

/// Groups of target types used by the nightly report lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeGroup {
    Nebulae,
    Galaxies,
    StarClusters,
}

impl TypeGroup {
    pub fn contains(&self, target_type: TargetType) -> bool {
        target_type.group() == Some(*self)
    }
}

/// Catalogs a target can be designated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TargetCatalog {
    Messier,
    Caldwell,
    Ngc,
    Ic,
    Sharpless,
    Barnard,
    Lbn,
    Ldn,
    Melotte,
    Collinder,
}

impl TargetCatalog {
    pub const ALL: [TargetCatalog; 10] = [
        TargetCatalog::Messier,
        TargetCatalog::Caldwell,
        TargetCatalog::Ngc,
        TargetCatalog::Ic,
        TargetCatalog::Sharpless,
        TargetCatalog::Barnard,
        TargetCatalog::Lbn,
        TargetCatalog::Ldn,
        TargetCatalog::Melotte,
        TargetCatalog::Collinder,
    ];

    /// Conventional prefix of the catalog.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            TargetCatalog::Messier => "M",
            TargetCatalog::Caldwell => "C",
            TargetCatalog::Ngc => "NGC",
            TargetCatalog::Ic => "IC",
            TargetCatalog::Sharpless => "Sh2-",
            TargetCatalog::Barnard => "B",
            TargetCatalog::Lbn => "LBN",
            TargetCatalog::Ldn => "LDN",
            TargetCatalog::Melotte => "Mel",
            TargetCatalog::Collinder => "Cr",
        }
    }
}

/// A catalog designation such as `M 31` or `Sh2-155`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Designation {
    pub catalog: TargetCatalog,
    pub number: u32,
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.catalog {
            TargetCatalog::Sharpless => write!(f, "Sh2-{}", self.number),
            catalog => write!(f, "{} {}", catalog.abbreviation(), self.number),
        }
    }
}

impl FromStr for Designation {
    type Err = DeepSkyError;

    /// Parse a designation, ignoring case and the space between prefix and number
    /// (`"M31"`, `"m 31"`, `"NGC 7000"`, `"sh2-155"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DeepSkyError::InvalidDesignation(s.to_string());

        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let split = compact
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (prefix, digits) = compact.split_at(split);

        // "Sh2-" carries a digit in its prefix
        let (prefix, digits) = if prefix.eq_ignore_ascii_case("sh") {
            let rest = digits.strip_prefix("2-").ok_or_else(invalid)?;
            ("sh2-", rest)
        } else {
            (prefix, digits)
        };

        let catalog = TargetCatalog::ALL
            .into_iter()
            .find(|c| c.abbreviation().eq_ignore_ascii_case(prefix))
            .ok_or_else(invalid)?;
        let number = digits.parse::<u32>().map_err(|_| invalid())?;

        Ok(Designation { catalog, number })
    }
}

/// One deep-sky object of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Stable identifier, unique within a catalog.
    pub id: String,
    /// Common name ("Andromeda Galaxy").
    pub name: String,
    /// Right ascension (J2000), degrees.
    pub ra: Degree,
    /// Declination (J2000), degrees.
    pub dec: Degree,
    /// Angular length (major axis), arcminutes.
    pub arc_length: ArcMinute,
    /// Angular width (minor axis), arcminutes.
    pub arc_width: ArcMinute,
    pub apparent_magnitude: Option<f64>,
    pub target_type: TargetType,
    pub constellation: String,
    pub designations: Vec<Designation>,
}

impl Target {
    /// Magnitude used for comparisons: a missing magnitude sorts as the dimmest possible.
    pub fn magnitude_key(&self) -> f64 {
        self.apparent_magnitude.unwrap_or(f64::INFINITY)
    }

    pub fn is_designated_in(&self, catalog: TargetCatalog) -> bool {
        self.designations.iter().any(|d| d.catalog == catalog)
    }

    /// Name shown to the user: the common name, or the first designation when unnamed.
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        self.designations
            .first()
            .map_or_else(|| self.id.clone(), |d| d.to_string())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.target_type)
    }
}
