//! # Sorting
//!
//! Targets are always sorted **descending** on the chosen key with a stable sort, so targets
//! with equal keys keep their catalog order. An ascending request is served by reversing the
//! whole descending list afterwards, which also reverses the order of ties; it is *not* a
//! second ascending sort.
//!
//! Keys are compared with [`f64::total_cmp`]. A missing magnitude is `+∞`, so it leads a
//! descending magnitude sort and trails an ascending one.
use serde::{Deserialize, Serialize};

use crate::catalog::query::QueryContext;
use crate::targets::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMethod {
    #[default]
    Visibility,
    Season,
    Declination,
    RightAscension,
    Magnitude,
    /// Angular length.
    Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Descending,
    Ascending,
}

impl SortMethod {
    fn key(&self, target: &Target, ctx: &QueryContext) -> f64 {
        match self {
            SortMethod::Visibility => ctx.scores(target).visibility,
            SortMethod::Season => ctx.scores(target).season,
            SortMethod::Declination => target.dec,
            SortMethod::RightAscension => target.ra,
            SortMethod::Magnitude => target.magnitude_key(),
            SortMethod::Size => target.arc_length,
        }
    }
}

/// Stable descending sort of `targets` on precomputed keys.
pub fn sort_descending_by<'a, F>(targets: Vec<&'a Target>, mut key: F) -> Vec<&'a Target>
where
    F: FnMut(&Target) -> f64,
{
    let mut keyed: Vec<(f64, &'a Target)> = targets.into_iter().map(|t| (key(t), t)).collect();
    keyed.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    keyed.into_iter().map(|(_, t)| t).collect()
}

/// Sort `targets` by `method`, then reverse the whole list if `direction` is ascending.
///
/// Arguments
/// -----------------
/// * `targets`: the collection to order.
/// * `method`: the sort key.
/// * `direction`: descending keeps the sorted list, ascending reverses it.
/// * `ctx`: the night context, needed for the score keys.
pub fn sort_targets<'a>(
    targets: Vec<&'a Target>,
    method: SortMethod,
    direction: SortDirection,
    ctx: &QueryContext,
) -> Vec<&'a Target> {
    let mut sorted = sort_descending_by(targets, |t| method.key(t, ctx));
    if direction == SortDirection::Ascending {
        sorted.reverse();
    }
    sorted
}
