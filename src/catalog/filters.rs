//! # Narrowing filters
//!
//! Every filter takes the current (already narrowed) collection of targets by value and
//! returns the subset that passes. None of them ever adds a target, and each one looks at a
//! single independent property, so applying a filter twice is the same as applying it once
//! and the final set does not depend on the order they run in.
//!
//! Each filter is a no-op at its inactive value:
//!
//! | Filter                      | Inactive when                          |
//! |-----------------------------|----------------------------------------|
//! | [`by_text`]                 | the text is empty or blank             |
//! | [`by_catalogs`]             | the set is empty                       |
//! | [`by_constellations`]       | the set is empty                       |
//! | [`by_types`]                | the set is empty                       |
//! | [`by_magnitude`]            | `min == 0` and `max` is NaN            |
//! | [`by_size`]                 | `min == 0` and `max` is NaN            |
//! | [`without_hidden`]          | the set is empty                       |
//! | [`by_min_visibility`]       | `min == 0`                             |
//! | [`by_min_season`]           | `min == 0`                             |
//!
//! A NaN upper bound leaves a range open-ended. A missing magnitude compares as `+∞`.
use std::collections::HashSet;

use crate::catalog::query::QueryContext;
use crate::targets::{Target, TargetCatalog, TargetType};

/// Lowercase words joined by single spaces.
fn words(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase with every whitespace removed.
fn compact(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn in_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && (max.is_nan() || value <= max)
}

fn range_inactive(min: f64, max: f64) -> bool {
    min == 0.0 && max.is_nan()
}

/// Case-insensitive substring match on the name, the identifier and every designation.
///
/// Names keep their word boundaries: surrounding blanks are ignored and inner runs of
/// whitespace count as one space, so `"north america"` matches but `"northamerica"` does
/// not. Identifiers and designations ignore whitespace entirely, so `"m31"`, `"M 31"` and
/// `"ngc 224"` all find the Andromeda Galaxy.
pub fn by_text<'a>(targets: Vec<&'a Target>, text: &str) -> Vec<&'a Target> {
    let needle = words(text);
    if needle.is_empty() {
        return targets;
    }
    let code = compact(text);
    targets
        .into_iter()
        .filter(|t| {
            words(&t.name).contains(&needle)
                || compact(&t.id).contains(&code)
                || t
                    .designations
                    .iter()
                    .any(|d| compact(&d.to_string()).contains(&code))
        })
        .collect()
}

/// Keep targets designated in at least one of `catalogs`.
pub fn by_catalogs<'a>(
    targets: Vec<&'a Target>,
    catalogs: &HashSet<TargetCatalog>,
) -> Vec<&'a Target> {
    if catalogs.is_empty() {
        return targets;
    }
    targets
        .into_iter()
        .filter(|t| t.designations.iter().any(|d| catalogs.contains(&d.catalog)))
        .collect()
}

/// Keep targets lying in one of `constellations` (names compared case-insensitively).
pub fn by_constellations<'a>(
    targets: Vec<&'a Target>,
    constellations: &HashSet<String>,
) -> Vec<&'a Target> {
    if constellations.is_empty() {
        return targets;
    }
    targets
        .into_iter()
        .filter(|t| {
            constellations
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&t.constellation))
        })
        .collect()
}

pub fn by_types<'a>(targets: Vec<&'a Target>, types: &HashSet<TargetType>) -> Vec<&'a Target> {
    if types.is_empty() {
        return targets;
    }
    targets
        .into_iter()
        .filter(|t| types.contains(&t.target_type))
        .collect()
}

/// Keep targets whose magnitude lies in `[min, max]`; a NaN `max` leaves the range open.
pub fn by_magnitude<'a>(targets: Vec<&'a Target>, min: f64, max: f64) -> Vec<&'a Target> {
    if range_inactive(min, max) {
        return targets;
    }
    targets
        .into_iter()
        .filter(|t| in_range(t.magnitude_key(), min, max))
        .collect()
}

/// Keep targets whose angular length (arcminutes) lies in `[min, max]`.
pub fn by_size<'a>(targets: Vec<&'a Target>, min: f64, max: f64) -> Vec<&'a Target> {
    if range_inactive(min, max) {
        return targets;
    }
    targets
        .into_iter()
        .filter(|t| in_range(t.arc_length, min, max))
        .collect()
}

pub fn without_hidden<'a>(targets: Vec<&'a Target>, hidden: &HashSet<String>) -> Vec<&'a Target> {
    if hidden.is_empty() {
        return targets;
    }
    targets
        .into_iter()
        .filter(|t| !hidden.contains(&t.id))
        .collect()
}

/// Drop targets that never clear the limiting altitude on the context's date.
pub fn without_never_rises<'a>(targets: Vec<&'a Target>, ctx: &QueryContext) -> Vec<&'a Target> {
    targets
        .into_iter()
        .filter(|t| !ctx.interval(t).is_never())
        .collect()
}

pub fn by_min_visibility<'a>(
    targets: Vec<&'a Target>,
    min: f64,
    ctx: &QueryContext,
) -> Vec<&'a Target> {
    if min == 0.0 {
        return targets;
    }
    targets
        .into_iter()
        .filter(|t| ctx.scores(t).visibility >= min)
        .collect()
}

pub fn by_min_season<'a>(targets: Vec<&'a Target>, min: f64, ctx: &QueryContext) -> Vec<&'a Target> {
    if min == 0.0 {
        return targets;
    }
    targets
        .into_iter()
        .filter(|t| ctx.scores(t).season >= min)
        .collect()
}
