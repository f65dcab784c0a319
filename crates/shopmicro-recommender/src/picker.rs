//! Random selection of recommended names.

use rand::seq::IndexedRandom;
use rand::Rng;

/// Most names returned per recommendation.
pub const MAX_PICKS: usize = 3;

/// Picks `min(MAX_PICKS, names.len())` distinct entries.
#[must_use]
pub fn pick(names: &[String]) -> Vec<String> {
    pick_with(names, &mut rand::rng())
}

/// Like [`pick`], drawing from `rng`.
pub fn pick_with<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> Vec<String> {
    names
        .choose_multiple(rng, MAX_PICKS.min(names.len()))
        .cloned()
        .collect()
}
