pub(crate) mod fuzzy;
pub mod geo;
pub mod notice;
pub mod time;

pub use geo::*;
pub use notice::*;
pub use time::*;

use rayon::prelude::*;
use std::cmp::Ordering;

const MIN_SEARCH_SCORE: f64 = 0.5;

pub trait Identifiable {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn normalized_name(&self) -> &str;
}

/// Generic fuzzy search function built for multithreaded searching.
/// Results are ordered best match first, ties keep their input order.
pub fn search<'a, T>(needle: &str, haystack: &'a [T]) -> Vec<&'a T>
where
    T: Send + Sync + Identifiable,
{
    let normalized_needle = fuzzy::normalize(needle);
    if normalized_needle.is_empty() {
        return Vec::new();
    }
    let mut results: Vec<(&T, f64)> = haystack
        .par_iter()
        .filter_map(|hay| {
            let score = fuzzy::score(&normalized_needle, hay.normalized_name());
            if score >= MIN_SEARCH_SCORE {
                Some((hay, score))
            } else {
                None
            }
        })
        .collect();

    results.par_sort_by(|(_, a): &(_, f64), (_, b): &(_, f64)| {
        b.partial_cmp(a).unwrap_or(Ordering::Equal)
    });
    results.into_iter().map(|(entity, _)| entity).collect()
}

pub(crate) fn normalize_name(name: &str) -> String {
    fuzzy::normalize(name)
}
