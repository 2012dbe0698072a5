use chrono::NaiveDate;
use deepsky::catalog::query::QueryContext;
use deepsky::catalog::Catalog;
use deepsky::observers::Location;
use deepsky::solar::Darkness;
use deepsky::targets::Target;
use deepsky::thresholds::TargetThresholds;

/// Ten well known targets: autumn galaxies and nebulae, a summer globular, a spring galaxy
/// and a southern cluster.
pub fn sample_catalog() -> Catalog {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/targets.csv");
    Catalog::from_csv_path(path).unwrap()
}

/// Turin, 45°N 7°E.
pub fn turin() -> Location {
    Location::new(45.0, 7.0, chrono_tz::Europe::Rome).unwrap()
}

pub fn tromso() -> Location {
    Location::new(69.65, 18.96, chrono_tz::Europe::Oslo).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Astronomical night of 1 October 2024 in Turin.
pub fn autumn_context() -> QueryContext {
    QueryContext::new(
        turin(),
        date(2024, 10, 1),
        Darkness::Astronomical,
        TargetThresholds::default(),
    )
}

pub fn ids(targets: &[&Target]) -> Vec<String> {
    targets.iter().map(|t| t.id.clone()).collect()
}
